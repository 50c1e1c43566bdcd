//! 値オブジェクト
//!
//! 不変で、値によって同一性が決まるドメインの基本型。

use std::fmt;

use uuid::Uuid;

/// 接続ごとに割り当てられる不透明な識別子
///
/// トランスポート層が接続の確立時に生成し、接続が生きている間だけ有効です。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しいランダムな ConnectionId を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 表示名（検証済みの「名 姓」）
///
/// 一意ではありません。複数の接続が同じ表示名を使うことができます。
/// 生成は [`crate::domain::validate_name`] を通してのみ行われます。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// 検証済みの名と姓から表示名を組み立てる
    pub(crate) fn compose(first_name: &str, last_name: &str) -> Self {
        Self(format!("{} {}", first_name, last_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// タイムスタンプ（Unix ミリ秒、UTC）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_generate_is_unique() {
        // テスト項目: 生成される ConnectionId が毎回異なる
        // given (前提条件):

        // when (操作):
        let id1 = ConnectionId::generate();
        let id2 = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_username_compose_joins_with_single_space() {
        // テスト項目: 名と姓が半角スペース 1 つで連結される
        // given (前提条件):
        let first_name = "Ann";
        let last_name = "Lee";

        // when (操作):
        let username = Username::compose(first_name, last_name);

        // then (期待する結果):
        assert_eq!(username.as_str(), "Ann Lee");
        assert_eq!(username.to_string(), "Ann Lee");
    }

    #[test]
    fn test_timestamp_ordering() {
        // テスト項目: Timestamp が値の大小で比較される
        // given (前提条件):
        let earlier = Timestamp::new(1_000);
        let later = Timestamp::new(2_000);

        // then (期待する結果):
        assert!(earlier < later);
        assert_eq!(later.value(), 2_000);
    }
}
