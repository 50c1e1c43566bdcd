//! エンティティ

use super::value_object::{Timestamp, Username};

/// 永続化されたチャットメッセージ
///
/// 一度保存されたら変更・削除されません。`username` は送信時点の表示名の
/// スナップショットであり、送信者が切断した後も有効です。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub username: String,
    pub text: String,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(username: impl Into<String>, text: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
            timestamp,
        }
    }
}

/// 接続ごとの状態
///
/// ```text
/// Connected ──join──▶ Joined ──disconnect──▶ Disconnected
///     └──────────────disconnect──────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// 接続済み、表示名は未設定
    Connected,
    /// 表示名を設定済み
    Joined { username: Username },
    /// 切断済み（終端状態）
    Disconnected,
}

impl ConnectionState {
    /// `Joined` のときだけ表示名を返す
    pub fn username(&self) -> Option<&Username> {
        match self {
            Self::Joined { username } => Some(username),
            _ => None,
        }
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(self, Self::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_only_available_when_joined() {
        // テスト項目: Joined 状態のときだけ表示名が取得できる
        // given (前提条件):
        let username = Username::compose("Ann", "Lee");
        let joined = ConnectionState::Joined {
            username: username.clone(),
        };

        // then (期待する結果):
        assert_eq!(joined.username(), Some(&username));
        assert_eq!(ConnectionState::Connected.username(), None);
        assert_eq!(ConnectionState::Disconnected.username(), None);
    }

    #[test]
    fn test_is_disconnected() {
        // テスト項目: Disconnected 状態だけが終端状態として判定される
        // then (期待する結果):
        assert!(ConnectionState::Disconnected.is_disconnected());
        assert!(!ConnectionState::Connected.is_disconnected());
    }
}
