//! UseCase: メッセージ送信処理
//!
//! メッセージを永続化し、成功した場合だけ送信者を含む全員にブロードキャストします。
//! 永続化とブロードキャストは 1 つのロックの下で行い、ブロードキャストの順序と
//! タイムスタンプの順序を一致させます。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ChatEvent, ChatMessage, MessagePusher, MessageRepository};

use super::{
    audience::{everyone, within},
    error::SendMessageError,
    session::ChatSession,
    settings::ChatSettings,
};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    messages: Arc<dyn MessageRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    settings: ChatSettings,
    /// 追記 → ブロードキャストを直列化する
    publish_lock: Mutex<()>,
}

impl SendMessageUseCase {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        settings: ChatSettings,
    ) -> Self {
        Self {
            messages,
            message_pusher,
            settings,
            publish_lock: Mutex::new(()),
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - 永続化されたメッセージ（タイムスタンプ付き）
    /// * `Err(SendMessageError::NotJoined | EmptyMessage)` - 無視されるべき送信
    /// * `Err(SendMessageError::Persistence)` - 永続化に失敗（ブロードキャストしない、再試行しない）
    pub async fn execute(
        &self,
        session: &ChatSession,
        text: Option<&str>,
    ) -> Result<ChatMessage, SendMessageError> {
        let username = session.state.username().ok_or(SendMessageError::NotJoined)?;
        let text = text
            .filter(|text| !text.is_empty())
            .ok_or(SendMessageError::EmptyMessage)?;

        let _publishing = self.publish_lock.lock().await;

        // 1. 永続化
        let message = within(
            self.settings.store_timeout,
            self.messages.append(username.as_str(), text),
        )
        .await?;

        // 2. 送信者を含む全員にブロードキャスト
        let targets = everyone(&*self.message_pusher).await;
        self.message_pusher
            .broadcast(targets, &ChatEvent::MessagePosted(message.clone()))
            .await?;

        Ok(message)
    }
}
