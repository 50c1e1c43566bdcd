//! InMemory PresenceRegistry 実装
//!
//! HashMap を単一の Mutex で保護し、登録・削除・スナップショットを直列化します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PresenceRegistry, Username};

#[derive(Debug, Default)]
struct Entries {
    /// Key: 接続 ID, Value: (登録順, 表示名)
    by_connection: HashMap<ConnectionId, (u64, Username)>,
    next_seq: u64,
}

/// インメモリ PresenceRegistry 実装
///
/// スナップショットは登録順に並べて返します（契約ではありません）。
#[derive(Debug, Default)]
pub struct InMemoryPresenceRegistry {
    entries: Mutex<Entries>,
}

impl InMemoryPresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn register(&self, connection_id: ConnectionId, username: Username) {
        let mut entries = self.entries.lock().await;
        let seq = entries.next_seq;
        entries.next_seq += 1;
        entries.by_connection.insert(connection_id, (seq, username));
        tracing::debug!("Connection '{}' registered to presence", connection_id);
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Username> {
        let mut entries = self.entries.lock().await;
        let removed = entries
            .by_connection
            .remove(connection_id)
            .map(|(_, username)| username);
        if removed.is_some() {
            tracing::debug!("Connection '{}' unregistered from presence", connection_id);
        }
        removed
    }

    async fn snapshot(&self) -> Vec<Username> {
        let entries = self.entries.lock().await;
        let mut online: Vec<&(u64, Username)> = entries.by_connection.values().collect();
        online.sort_by_key(|(seq, _)| *seq);
        online
            .into_iter()
            .map(|(_, username)| username.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate_name;

    fn username(first: &str, last: &str) -> Username {
        validate_name(Some(first), Some(last)).unwrap()
    }

    #[tokio::test]
    async fn test_register_and_unregister() {
        // テスト項目: 登録した表示名がスナップショットに含まれ、削除後は消える
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();
        let c1 = ConnectionId::generate();
        let c2 = ConnectionId::generate();

        // when (操作):
        registry.register(c1, username("Ab", "Bc")).await;
        registry.register(c2, username("Cd", "De")).await;

        // then (期待する結果):
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains(&username("Ab", "Bc")));
        assert!(snapshot.contains(&username("Cd", "De")));

        // when (操作): c1 を削除
        let removed = registry.unregister(&c1).await;

        // then (期待する結果):
        assert_eq!(removed, Some(username("Ab", "Bc")));
        assert_eq!(registry.snapshot().await, vec![username("Cd", "De")]);
    }

    #[tokio::test]
    async fn test_unregister_unknown_connection_is_noop() {
        // テスト項目: 未登録の接続 ID の削除は何もせず None を返す
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();
        let joined = ConnectionId::generate();
        registry.register(joined, username("Ann", "Lee")).await;

        // when (操作):
        let removed = registry.unregister(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert_eq!(removed, None);
        assert_eq!(registry.snapshot().await, vec![username("Ann", "Lee")]);
    }

    #[tokio::test]
    async fn test_register_overwrites_existing_entry() {
        // テスト項目: 同じ接続 ID への再登録はエントリを上書きする
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();
        let c1 = ConnectionId::generate();
        registry.register(c1, username("Ann", "Lee")).await;

        // when (操作):
        registry.register(c1, username("Bob", "Ray")).await;

        // then (期待する結果):
        assert_eq!(registry.snapshot().await, vec![username("Bob", "Ray")]);
    }

    #[tokio::test]
    async fn test_duplicate_usernames_are_allowed() {
        // テスト項目: 異なる接続が同じ表示名を持てる
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();

        // when (操作):
        registry
            .register(ConnectionId::generate(), username("Ann", "Lee"))
            .await;
        registry
            .register(ConnectionId::generate(), username("Ann", "Lee"))
            .await;

        // then (期待する結果):
        assert_eq!(registry.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_follows_registration_order() {
        // テスト項目: スナップショットが登録順に並ぶ
        // given (前提条件):
        let registry = InMemoryPresenceRegistry::new();
        let names = [("Ann", "Lee"), ("Bob", "Ray"), ("Cy", "Dow")];

        // when (操作):
        for (first, last) in names {
            registry
                .register(ConnectionId::generate(), username(first, last))
                .await;
        }

        // then (期待する結果):
        let snapshot: Vec<String> = registry
            .snapshot()
            .await
            .into_iter()
            .map(Username::into_string)
            .collect();
        assert_eq!(snapshot, vec!["Ann Lee", "Bob Ray", "Cy Dow"]);
    }
}
