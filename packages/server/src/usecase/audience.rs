//! 通知対象の選定とストア操作の共通処理

use std::{future::Future, sync::Arc, time::Duration};

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{ConnectionId, MessagePusher, PersistenceError};

/// 参加・退出の処理を直列化するロック
///
/// PresenceRegistry の更新から `update-users` の送信までをこのロックの下で行い、
/// 最後に届くオンライン一覧が常に PresenceRegistry の内容と一致するようにします。
#[derive(Debug, Clone, Default)]
pub struct PresenceLock(Arc<Mutex<()>>);

impl PresenceLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.0.lock().await
    }
}

/// 接続中の全てのクライアント（表示名の有無を問わない）
pub(super) async fn everyone(pusher: &dyn MessagePusher) -> Vec<ConnectionId> {
    pusher.connected_clients().await
}

/// 指定したクライアント以外の全てのクライアント
pub(super) async fn others(
    pusher: &dyn MessagePusher,
    exclude: &ConnectionId,
) -> Vec<ConnectionId> {
    pusher
        .connected_clients()
        .await
        .into_iter()
        .filter(|id| id != exclude)
        .collect()
}

/// ストア操作を制限時間付きで 1 回だけ実行する
pub(super) async fn within<T>(
    limit: Duration,
    operation: impl Future<Output = Result<T, PersistenceError>>,
) -> Result<T, PersistenceError> {
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| PersistenceError::Timeout)?
}
