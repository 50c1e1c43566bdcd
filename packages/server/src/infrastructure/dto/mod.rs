//! Data Transfer Objects (DTOs)
//!
//! - `websocket`: WebSocket フレーム（クライアント → サーバー / サーバー → クライアント）
//! - `http`: HTTP API のリクエスト・レスポンス
//! - `conversion`: ドメインモデルと DTO の変換

pub mod conversion;
pub mod http;
pub mod websocket;
