//! Infrastructure 層
//!
//! ドメイン層が定義するインターフェースの具体的な実装と、外部との入出力に使う DTO。

pub mod dto;
pub mod message_pusher;
pub mod repository;
