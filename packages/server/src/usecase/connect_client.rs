//! UseCase: クライアント接続処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

use super::session::ChatSession;

/// クライアント接続のユースケース
///
/// 接続 ID を払い出し、送信チャンネルを MessagePusher に登録します。通知は行いません。
pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を受け付け、`Connected` 状態のセッションを返す
    pub async fn execute(&self, sender: PusherChannel) -> ChatSession {
        let session = ChatSession::new(ConnectionId::generate());
        self.message_pusher.register_client(session.id, sender).await;
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::ConnectionState, infrastructure::message_pusher::WebSocketMessagePusher};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_registers_client_without_notification() {
        // テスト項目: 接続したクライアントが登録され、通知は送られない
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectClientUseCase::new(pusher.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let session = usecase.execute(tx).await;

        // then (期待する結果):
        assert_eq!(session.state, ConnectionState::Connected);
        assert_eq!(pusher.connected_clients().await, vec![session.id]);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_each_connection_gets_its_own_id() {
        // テスト項目: 接続ごとに異なる接続 ID が払い出される
        // given (前提条件):
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = ConnectClientUseCase::new(pusher.clone());

        // when (操作):
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let first = usecase.execute(tx1).await;
        let second = usecase.execute(tx2).await;

        // then (期待する結果):
        assert_ne!(first.id, second.id);
        assert_eq!(pusher.connected_clients().await.len(), 2);
    }
}
