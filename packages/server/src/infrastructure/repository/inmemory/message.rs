//! InMemory MessageRepository 実装
//!
//! プロセスが終了するとメッセージは失われます。`DATABASE_URL` が設定されていない
//! 場合や、テストで使用します。

use std::sync::Arc;

use async_trait::async_trait;
use hiroba_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageRepository, PersistenceError, Timestamp};

/// インメモリ MessageRepository 実装
pub struct InMemoryMessageRepository {
    /// 追記順に並んだメッセージ
    messages: Mutex<Vec<ChatMessage>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// 保存されているメッセージ数
    pub async fn count(&self) -> usize {
        self.messages.lock().await.len()
    }
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, username: &str, text: &str) -> Result<ChatMessage, PersistenceError> {
        let message = ChatMessage::new(username, text, Timestamp::new(self.clock.now_millis()));
        self.messages.lock().await.push(message.clone());
        Ok(message)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ChatMessage>, PersistenceError> {
        let messages = self.messages.lock().await;

        // stable sort: 同じタイムスタンプは追記順のまま
        let mut by_time: Vec<&ChatMessage> = messages.iter().collect();
        by_time.sort_by_key(|message| message.timestamp);

        let skip = by_time.len().saturating_sub(limit);
        Ok(by_time.into_iter().skip(skip).cloned().collect())
    }
}
