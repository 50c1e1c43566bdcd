//! UseCase: チャット参加処理
//!
//! ## 通知の順序と対象
//!
//! 1. 本人: `user-joined`（"you joined"）
//! 2. 本人以外の全員: `user-joined`（"<username> joined"）
//! 3. 全員: `update-users`（オンライン一覧）
//! 4. 本人: `last-20-messages`（直近の履歴、古い順）
//!
//! 1〜3 は `PresenceLock` の下で行い、同時に参加・退出があっても
//! 最後に届くオンライン一覧が PresenceRegistry の内容と一致するようにします。
//! 履歴の取得に失敗しても参加は取り消されず、履歴なしで続行します。

use std::sync::Arc;

use crate::domain::{
    ChatEvent, ConnectionState, MessagePusher, MessageRepository, PresenceRegistry, Username,
    validate_name,
};

use super::{
    audience::{PresenceLock, everyone, others, within},
    error::JoinError,
    session::ChatSession,
    settings::ChatSettings,
};

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    presence: Arc<dyn PresenceRegistry>,
    messages: Arc<dyn MessageRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    presence_lock: PresenceLock,
    settings: ChatSettings,
}

impl JoinChatUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRegistry>,
        messages: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        presence_lock: PresenceLock,
        settings: ChatSettings,
    ) -> Self {
        Self {
            presence,
            messages,
            message_pusher,
            presence_lock,
            settings,
        }
    }

    /// 参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Username)` - 参加成功（セッションは `Joined` に遷移）
    /// * `Err(JoinError::InvalidName)` - 名前が検証ルールを満たさない（本人に `join-rejected` を通知）
    /// * `Err(JoinError::AlreadyJoined | Disconnected)` - `Connected` 以外の状態からの参加
    pub async fn execute(
        &self,
        session: &mut ChatSession,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Username, JoinError> {
        match session.state {
            ConnectionState::Connected => {}
            ConnectionState::Joined { .. } => return Err(JoinError::AlreadyJoined),
            ConnectionState::Disconnected => return Err(JoinError::Disconnected),
        }

        let username = match validate_name(first_name, last_name) {
            Ok(username) => username,
            Err(reason) => {
                self.push_to_self(session, &ChatEvent::JoinRejected { reason })
                    .await;
                return Err(reason.into());
            }
        };

        let presence_guard = self.presence_lock.acquire().await;

        // 1. PresenceRegistry に登録
        self.presence.register(session.id, username.clone()).await;
        session.state = ConnectionState::Joined {
            username: username.clone(),
        };
        tracing::info!("'{}' joined as connection '{}'", username, session.id);

        // 2. 参加通知（本人 / 本人以外）
        self.push_to_self(session, &ChatEvent::joined_self(username.clone()))
            .await;
        let targets = others(&*self.message_pusher, &session.id).await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &ChatEvent::joined_others(username.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast user-joined: {}", e);
        }

        // 3. オンライン一覧を全員に通知
        let online = self.presence.snapshot().await;
        let targets = everyone(&*self.message_pusher).await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &ChatEvent::PresenceUpdated(online))
            .await
        {
            tracing::warn!("Failed to broadcast update-users: {}", e);
        }
        drop(presence_guard);

        // 4. 直近の履歴を本人に送信
        match within(
            self.settings.store_timeout,
            self.messages.recent(self.settings.history_limit),
        )
        .await
        {
            Ok(history) => {
                self.push_to_self(session, &ChatEvent::History(history))
                    .await
            }
            Err(e) => tracing::error!("Failed to load history for '{}': {}", username, e),
        }

        Ok(username)
    }

    async fn push_to_self(&self, session: &ChatSession, event: &ChatEvent) {
        if let Err(e) = self.message_pusher.push_to(&session.id, event).await {
            tracing::warn!("Failed to push to client '{}': {}", session.id, e);
        }
    }
}
