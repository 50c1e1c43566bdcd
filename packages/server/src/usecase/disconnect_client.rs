//! UseCase: クライアント切断処理
//!
//! 切断したクライアントは通知対象から外れます。表示名を設定済みだった場合だけ、
//! 残りの全員に `user-left` とオンライン一覧を通知します。
//! 削除から `update-users` の送信までは参加処理と同じ `PresenceLock` の下で行います。

use std::sync::Arc;

use crate::domain::{ChatEvent, ConnectionState, MessagePusher, PresenceRegistry, Username};

use super::{
    audience::{PresenceLock, everyone},
    session::ChatSession,
};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    presence: Arc<dyn PresenceRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    presence_lock: PresenceLock,
}

impl DisconnectClientUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        presence_lock: PresenceLock,
    ) -> Self {
        Self {
            presence,
            message_pusher,
            presence_lock,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 参加済みだった場合はその表示名。参加前の切断や 2 回目の切断では `None`。
    pub async fn execute(&self, session: &mut ChatSession) -> Option<Username> {
        if session.state.is_disconnected() {
            return None;
        }
        session.state = ConnectionState::Disconnected;

        let _presence_guard = self.presence_lock.acquire().await;

        // 1. 送信チャンネルと PresenceRegistry から削除
        self.message_pusher.unregister_client(&session.id).await;
        let username = self.presence.unregister(&session.id).await?;
        tracing::info!("'{}' left (connection '{}')", username, session.id);

        // 2. 残りの全員に退出とオンライン一覧を通知
        let targets = everyone(&*self.message_pusher).await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &ChatEvent::left(username.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast user-left: {}", e);
        }

        let online = self.presence.snapshot().await;
        let targets = everyone(&*self.message_pusher).await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &ChatEvent::PresenceUpdated(online))
            .await
        {
            tracing::warn!("Failed to broadcast update-users: {}", e);
        }

        Some(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::validate_name,
        infrastructure::repository::InMemoryPresenceRegistry,
        usecase::test_support::{TestClient, connect, create_test_message_pusher},
    };

    async fn join(
        presence: &InMemoryPresenceRegistry,
        client: &mut TestClient,
        first: &str,
        last: &str,
    ) {
        let username = validate_name(Some(first), Some(last)).unwrap();
        presence.register(client.session.id, username.clone()).await;
        client.session.state = ConnectionState::Joined { username };
    }

    #[tokio::test]
    async fn test_disconnect_after_join_notifies_remaining_clients() {
        // テスト項目: 参加済みの切断で、残りの全員に user-left が 1 回ずつ届き、一覧から消える
        // given (前提条件):
        let presence = Arc::new(InMemoryPresenceRegistry::new());
        let pusher = create_test_message_pusher();
        let usecase =
            DisconnectClientUseCase::new(presence.clone(), pusher.clone(), PresenceLock::new());
        let mut ann = connect(&pusher).await;
        join(&presence, &mut ann, "Ann", "Lee").await;
        let mut bob = connect(&pusher).await;
        join(&presence, &mut bob, "Bob", "Ray").await;
        let mut lurker = connect(&pusher).await;

        // when (操作):
        let left = usecase.execute(&mut ann.session).await;

        // then (期待する結果):
        assert_eq!(left.map(Username::into_string), Some("Ann Lee".to_string()));
        assert_eq!(ann.session.state, ConnectionState::Disconnected);
        assert!(ann.drain().is_empty());

        let online: Vec<String> = presence
            .snapshot()
            .await
            .into_iter()
            .map(Username::into_string)
            .collect();
        assert_eq!(online, vec!["Bob Ray"]);

        for client in [&mut bob, &mut lurker] {
            let frames = client.drain();
            assert_eq!(frames.len(), 2);
            assert_eq!(frames[0]["event"], "user-left");
            assert_eq!(frames[0]["data"]["username"], "Ann Lee");
            assert_eq!(frames[0]["data"]["message"], "Ann Lee left");
            assert_eq!(frames[1]["event"], "update-users");
            assert_eq!(frames[1]["data"], serde_json::json!(["Bob Ray"]));
        }
    }

    #[tokio::test]
    async fn test_disconnect_before_join_is_silent() {
        // テスト項目: 参加前の切断では誰にも通知されない
        // given (前提条件):
        let presence = Arc::new(InMemoryPresenceRegistry::new());
        let pusher = create_test_message_pusher();
        let usecase =
            DisconnectClientUseCase::new(presence.clone(), pusher.clone(), PresenceLock::new());
        let mut ann = connect(&pusher).await;
        let mut bob = connect(&pusher).await;

        // when (操作):
        let left = usecase.execute(&mut ann.session).await;

        // then (期待する結果):
        assert_eq!(left, None);
        assert_eq!(ann.session.state, ConnectionState::Disconnected);
        assert!(bob.drain().is_empty());
        assert_eq!(pusher.connected_clients().await, vec![bob.session.id]);
    }

    #[tokio::test]
    async fn test_second_disconnect_is_noop() {
        // テスト項目: 切断済みのセッションを再度切断しても何も起きない
        // given (前提条件):
        let presence = Arc::new(InMemoryPresenceRegistry::new());
        let pusher = create_test_message_pusher();
        let usecase =
            DisconnectClientUseCase::new(presence.clone(), pusher.clone(), PresenceLock::new());
        let mut ann = connect(&pusher).await;
        join(&presence, &mut ann, "Ann", "Lee").await;
        let mut bob = connect(&pusher).await;
        usecase.execute(&mut ann.session).await;
        bob.drain();

        // when (操作):
        let left = usecase.execute(&mut ann.session).await;

        // then (期待する結果):
        assert_eq!(left, None);
        assert!(bob.drain().is_empty());
    }
}
