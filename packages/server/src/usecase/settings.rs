//! ユースケースの設定値

use std::time::Duration;

/// 参加時に送る履歴の既定件数
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// メッセージストア操作の既定の制限時間
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatSettings {
    /// 参加時に本人へ送る直近のメッセージ数
    pub history_limit: usize,
    /// メッセージストアの 1 操作あたりの制限時間（超過は `PersistenceError::Timeout`）
    pub store_timeout: Duration,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }
}
