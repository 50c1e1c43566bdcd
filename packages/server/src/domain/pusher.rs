//! MessagePusher trait 定義
//!
//! クライアントへのイベント送信（通知）を抽象化します。
//! 接続中の全てのクライアント（表示名を設定していないクライアントを含む）の
//! 送信チャンネルを管理します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatEvent, ConnectionId, MessagePushError};

/// クライアントへの送信チャンネル（エンコード済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 接続中の全てのクライアント ID
    async fn connected_clients(&self) -> Vec<ConnectionId>;

    /// 特定のクライアントにイベントを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ChatEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントにイベントを送信
    ///
    /// 一部のクライアントへの送信失敗は許容されます。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &ChatEvent,
    ) -> Result<(), MessagePushError>;
}
