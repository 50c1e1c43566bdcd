//! UseCase のエラー
//!
//! 状態に合わないイベント（参加前の入力中通知など）もエラーとして返しますが、
//! `ChatCoordinator` はそれらを黙って無視します。

use thiserror::Error;

use crate::domain::{MessagePushError, NameValidationError, PersistenceError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameValidationError),

    #[error("Connection has already joined")]
    AlreadyJoined,

    #[error("Connection is closed")]
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypingError {
    #[error("Connection has not joined")]
    NotJoined,

    #[error("Failed to broadcast: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("Connection has not joined")]
    NotJoined,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Failed to persist message: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Failed to broadcast: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}
