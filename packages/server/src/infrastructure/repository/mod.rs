//! Repository の実装
//!
//! - `inmemory`: プロセス内のメモリを使った実装
//! - `sqlite`: SQLite を使った永続化実装

pub mod inmemory;
pub mod sqlite;

pub use inmemory::{InMemoryMessageRepository, InMemoryPresenceRegistry};
pub use sqlite::SqliteMessageRepository;
