mod http;
mod websocket;

pub use http::{health_check, online_users, verify_user};
pub use websocket::websocket_handler;
