//! Domain 層
//!
//! チャットのドメインモデル、名前の検証ルール、および UseCase 層が依存する
//! インターフェース（Repository / MessagePusher）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod pusher;
pub mod repository;
pub mod validator;
pub mod value_object;

pub use entity::{ChatMessage, ConnectionState};
pub use error::{MessagePushError, NameValidationError, PersistenceError};
pub use event::ChatEvent;
pub use pusher::{MessagePusher, PusherChannel};
pub use repository::{MessageRepository, PresenceRegistry};
pub use validator::validate_name;
pub use value_object::{ConnectionId, Timestamp, Username};
