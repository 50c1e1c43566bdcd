//! UseCase: 入力中通知
//!
//! 入力中 / 入力終了を本人以外の全員に通知します。本人には送りません。

use std::sync::Arc;

use crate::domain::{ChatEvent, MessagePusher};

use super::{audience::others, error::TypingError, session::ChatSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingState {
    Started,
    Stopped,
}

/// 入力中通知のユースケース
pub struct NotifyTypingUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl NotifyTypingUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 入力中通知を実行
    ///
    /// 表示名が未設定（参加前・切断後）の場合は `TypingError::NotJoined` を返し、何も通知しません。
    pub async fn execute(&self, session: &ChatSession, state: TypingState) -> Result<(), TypingError> {
        let username = session.state.username().ok_or(TypingError::NotJoined)?.clone();

        let event = match state {
            TypingState::Started => ChatEvent::Typing { username },
            TypingState::Stopped => ChatEvent::StopTyping { username },
        };
        let targets = others(&*self.message_pusher, &session.id).await;
        self.message_pusher.broadcast(targets, &event).await?;

        Ok(())
    }
}
