//! 接続ごとのセッション

use crate::domain::{ConnectionId, ConnectionState};

/// 1 本の WebSocket 接続に対応するセッション
///
/// 状態は接続オブジェクトと一緒に持ち回り、PresenceRegistry への登録有無で
/// 代用しません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: ConnectionId,
    pub state: ConnectionState,
}

impl ChatSession {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            state: ConnectionState::Connected,
        }
    }
}
