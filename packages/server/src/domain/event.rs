//! サーバーからクライアントへ通知するイベント
//!
//! ワイヤーフォーマットへの変換は Infrastructure 層（`infrastructure::dto`）が行います。

use super::{ChatMessage, NameValidationError, Username};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// ユーザーが参加した（本人向けと他の参加者向けで `message` が異なる）
    UserJoined { username: Username, message: String },
    /// オンライン中のユーザー一覧
    PresenceUpdated(Vec<Username>),
    /// 参加直後に本人へ送る直近のメッセージ（古い順）
    History(Vec<ChatMessage>),
    Typing { username: Username },
    StopTyping { username: Username },
    /// 永続化済みのメッセージ
    MessagePosted(ChatMessage),
    UserLeft { username: Username, message: String },
    /// 表示名が検証ルールを満たさず参加できなかった
    JoinRejected { reason: NameValidationError },
}

impl ChatEvent {
    /// 参加した本人に送る参加通知
    pub fn joined_self(username: Username) -> Self {
        Self::UserJoined {
            username,
            message: "you joined".to_string(),
        }
    }

    /// 他の参加者に送る参加通知
    pub fn joined_others(username: Username) -> Self {
        let message = format!("{} joined", username);
        Self::UserJoined { username, message }
    }

    pub fn left(username: Username) -> Self {
        let message = format!("{} left", username);
        Self::UserLeft { username, message }
    }
}
