//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatMessage, ConnectionId, PersistenceError, Username};

/// メッセージストア
///
/// 追記専用のチャットメッセージのログ。新しい順に問い合わせることができます。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// メッセージを追記する
    ///
    /// タイムスタンプはストア側で現在時刻が割り当てられます。
    async fn append(&self, username: &str, text: &str) -> Result<ChatMessage, PersistenceError>;

    /// 新しい方から `limit` 件のメッセージを取得し、古い順に並べて返す
    async fn recent(&self, limit: usize) -> Result<Vec<ChatMessage>, PersistenceError>;
}

/// オンライン中のユーザーの登録簿
///
/// 接続 ID と表示名の対応を保持し、「今誰がオンラインか」の唯一の情報源となります。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// 接続 ID に表示名を登録する（既存のエントリは上書き）
    async fn register(&self, connection_id: ConnectionId, username: Username);

    /// 接続 ID のエントリを削除し、登録されていた表示名を返す
    ///
    /// 未登録の接続 ID に対しては何もせず `None` を返します。
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Username>;

    /// 現在オンラインの全ての表示名
    ///
    /// 順序は保証されません。
    async fn snapshot(&self) -> Vec<Username>;
}
