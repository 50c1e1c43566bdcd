//! ChatCoordinator
//!
//! 接続ごとのイベントを受け取り、セッションの状態に応じて各ユースケースに振り分けます。
//! 状態に合わないイベント（参加前の入力中通知、切断後のイベントなど）は黙って無視し、
//! ストアの失敗はログに残して処理を続けます。どのイベントの失敗もプロセスや
//! 他の接続には影響しません。

use std::sync::Arc;

use crate::domain::{
    ChatMessage, MessagePusher, MessageRepository, PresenceRegistry, PusherChannel, Username,
};

use super::{
    ConnectClientUseCase, DisconnectClientUseCase, JoinChatUseCase, JoinError,
    NotifyTypingUseCase, PresenceLock, SendMessageUseCase, TypingState, session::ChatSession,
    settings::ChatSettings,
};

pub struct ChatCoordinator {
    connect_client: ConnectClientUseCase,
    join_chat: JoinChatUseCase,
    notify_typing: NotifyTypingUseCase,
    send_message: SendMessageUseCase,
    disconnect_client: DisconnectClientUseCase,
}

impl ChatCoordinator {
    pub fn new(
        presence: Arc<dyn PresenceRegistry>,
        messages: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        settings: ChatSettings,
    ) -> Self {
        // 参加と退出で共有する
        let presence_lock = PresenceLock::new();
        Self {
            connect_client: ConnectClientUseCase::new(message_pusher.clone()),
            join_chat: JoinChatUseCase::new(
                presence.clone(),
                messages.clone(),
                message_pusher.clone(),
                presence_lock.clone(),
                settings,
            ),
            notify_typing: NotifyTypingUseCase::new(message_pusher.clone()),
            send_message: SendMessageUseCase::new(messages, message_pusher.clone(), settings),
            disconnect_client: DisconnectClientUseCase::new(presence, message_pusher, presence_lock),
        }
    }

    /// 接続を受け付ける（`Connected`）
    pub async fn connect(&self, sender: PusherChannel) -> ChatSession {
        let session = self.connect_client.execute(sender).await;
        tracing::info!("Connection '{}' opened", session.id);
        session
    }

    /// `set-username`
    pub async fn join(
        &self,
        session: &mut ChatSession,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Option<Username> {
        match self.join_chat.execute(session, first_name, last_name).await {
            Ok(username) => Some(username),
            Err(JoinError::InvalidName(e)) => {
                tracing::info!("Connection '{}' rejected: {}", session.id, e);
                None
            }
            Err(e) => {
                tracing::debug!("Ignored set-username from '{}': {}", session.id, e);
                None
            }
        }
    }

    /// `typing` / `stop-typing`
    pub async fn typing(&self, session: &ChatSession, state: TypingState) {
        if let Err(e) = self.notify_typing.execute(session, state).await {
            tracing::debug!("Ignored {:?} from '{}': {}", state, session.id, e);
        }
    }

    /// `new-message`
    pub async fn new_message(
        &self,
        session: &ChatSession,
        text: Option<&str>,
    ) -> Option<ChatMessage> {
        use super::SendMessageError::*;

        match self.send_message.execute(session, text).await {
            Ok(message) => Some(message),
            Err(e @ (NotJoined | EmptyMessage)) => {
                tracing::debug!("Ignored new-message from '{}': {}", session.id, e);
                None
            }
            Err(e @ Persistence(_)) => {
                tracing::error!("Dropped message from '{}': {}", session.id, e);
                None
            }
            Err(e @ BroadcastFailed(_)) => {
                tracing::warn!("Message from '{}' saved but not delivered: {}", session.id, e);
                None
            }
        }
    }

    /// 接続の終了（`Disconnected`）
    pub async fn disconnect(&self, session: &mut ChatSession) -> Option<Username> {
        let left = self.disconnect_client.execute(session).await;
        tracing::info!("Connection '{}' closed", session.id);
        left
    }
}
