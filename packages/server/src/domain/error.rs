//! ドメインエラー

use thiserror::Error;

/// 名前の検証エラー
///
/// メッセージはそのまま HTTP レスポンスやクライアントへの通知に使われます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameValidationError {
    #[error("First name and last name are required")]
    MissingField,

    #[error("First name and last name must be at least 2 characters long")]
    TooShort,

    #[error("First name and last name may only contain letters")]
    InvalidCharacters,
}

/// メッセージストアのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// ストレージが利用できない、または読み書きに失敗した
    #[error("Message store unavailable: {0}")]
    Unavailable(String),

    /// 操作が制限時間内に完了しなかった
    #[error("Message store operation timed out")]
    Timeout,
}

/// メッセージ送信（通知）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to encode event: {0}")]
    EncodeFailed(String),
}
