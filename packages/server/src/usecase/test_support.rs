//! ユースケースのテスト用ヘルパー

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    domain::{
        ChatMessage, ConnectionId, MessageRepository, PersistenceError, PresenceRegistry,
        Timestamp, Username,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryPresenceRegistry,
    },
    usecase::ChatSession,
};

use super::ConnectClientUseCase;

/// テスト用のクライアント（セッションと受信チャンネル）
pub(super) struct TestClient {
    pub session: ChatSession,
    pub rx: mpsc::UnboundedReceiver<String>,
}

impl TestClient {
    /// これまでに届いたフレームを全て取り出す
    pub fn drain(&mut self) -> Vec<Value> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.rx.try_recv() {
            frames.push(serde_json::from_str(&frame).unwrap());
        }
        frames
    }

    /// これまでに届いたイベント名を全て取り出す
    pub fn drain_events(&mut self) -> Vec<String> {
        self.drain()
            .into_iter()
            .map(|frame| frame["event"].as_str().unwrap().to_string())
            .collect()
    }
}

pub(super) fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::default())
}

pub(super) async fn connect(pusher: &Arc<WebSocketMessagePusher>) -> TestClient {
    let (tx, rx) = mpsc::unbounded_channel();
    let session = ConnectClientUseCase::new(pusher.clone()).execute(tx).await;
    TestClient { session, rx }
}

/// 次の `snapshot()` だけ応答を遅らせる PresenceRegistry
///
/// スナップショットの取得から送信までの間に、他の参加・退出が割り込める状況を作ります。
#[derive(Default)]
pub(super) struct DelayedSnapshotRegistry {
    inner: InMemoryPresenceRegistry,
    delay_next: AtomicBool,
}

impl DelayedSnapshotRegistry {
    pub fn delay_next_snapshot(&self) {
        self.delay_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl PresenceRegistry for DelayedSnapshotRegistry {
    async fn register(&self, connection_id: ConnectionId, username: Username) {
        self.inner.register(connection_id, username).await
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Username> {
        self.inner.unregister(connection_id).await
    }

    async fn snapshot(&self) -> Vec<Username> {
        let online = self.inner.snapshot().await;
        if self.delay_next.swap(false, Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        online
    }
}

/// 最後に届いた `update-users` の内容
pub(super) fn last_presence(frames: &[Value]) -> Option<Value> {
    frames
        .iter()
        .rev()
        .find(|frame| frame["event"] == "update-users")
        .map(|frame| frame["data"].clone())
}

/// PresenceRegistry の内容を JSON で
pub(super) async fn presence_json(presence: &dyn PresenceRegistry) -> Value {
    serde_json::json!(
        presence
            .snapshot()
            .await
            .into_iter()
            .map(Username::into_string)
            .collect::<Vec<_>>()
    )
}

/// 応答に 1 時間かかるメッセージストア
pub(super) struct SlowMessageRepository;

#[async_trait]
impl MessageRepository for SlowMessageRepository {
    async fn append(&self, username: &str, text: &str) -> Result<ChatMessage, PersistenceError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(ChatMessage::new(username, text, Timestamp::new(0)))
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<ChatMessage>, PersistenceError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![])
    }
}
