//! UseCase 層
//!
//! 接続ごとのイベント（接続・参加・入力中・メッセージ送信・切断）を 1 イベント 1 ユースケース
//! で処理し、`ChatCoordinator` が接続の状態に応じて振り分けます。

mod audience;
mod connect_client;
mod coordinator;
mod disconnect_client;
mod error;
mod get_online_users;
mod join_chat;
mod notify_typing;
mod send_message;
mod session;
mod settings;
mod verify_user;

#[cfg(test)]
mod test_support;

pub use audience::PresenceLock;
pub use connect_client::ConnectClientUseCase;
pub use coordinator::ChatCoordinator;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{JoinError, SendMessageError, TypingError};
pub use get_online_users::GetOnlineUsersUseCase;
pub use join_chat::JoinChatUseCase;
pub use notify_typing::{NotifyTypingUseCase, TypingState};
pub use send_message::SendMessageUseCase;
pub use session::ChatSession;
pub use settings::ChatSettings;
pub use verify_user::VerifyUserUseCase;
