//! SQLite MessageRepository 実装
//!
//! メッセージは `messages` テーブルに追記され、サーバーを再起動しても残ります。

use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use hiroba_shared::time::{Clock, SystemClock};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::domain::{ChatMessage, MessageRepository, PersistenceError, Timestamp};

const CREATE_MESSAGES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS messages (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    username  TEXT    NOT NULL,
    text      TEXT    NOT NULL,
    timestamp INTEGER NOT NULL
)"#;

const CREATE_TIMESTAMP_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS messages_timestamp_idx ON messages (timestamp)";

/// SQLite を使った MessageRepository 実装
pub struct SqliteMessageRepository {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl SqliteMessageRepository {
    /// データベースに接続し、テーブルが無ければ作成する
    ///
    /// # Arguments
    ///
    /// * `database_url` - e.g. `sqlite://hiroba.db`
    pub async fn connect(database_url: &str) -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(store_error)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(16)
            .connect_with(options)
            .await
            .map_err(store_error)?;

        let repository = Self::from_pool(pool, Arc::new(SystemClock));
        repository.migrate().await?;
        Ok(repository)
    }

    pub fn from_pool(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// スキーマを作成する（冪等）
    pub async fn migrate(&self) -> Result<(), PersistenceError> {
        sqlx::query(CREATE_MESSAGES_TABLE)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        sqlx::query(CREATE_TIMESTAMP_INDEX)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

fn store_error(e: sqlx::Error) -> PersistenceError {
    PersistenceError::Unavailable(e.to_string())
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn append(&self, username: &str, text: &str) -> Result<ChatMessage, PersistenceError> {
        let timestamp = Timestamp::new(self.clock.now_millis());

        sqlx::query("INSERT INTO messages (username, text, timestamp) VALUES (?, ?, ?)")
            .bind(username)
            .bind(text)
            .bind(timestamp.value())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(ChatMessage::new(username, text, timestamp))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ChatMessage>, PersistenceError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<(String, String, i64)> = sqlx::query_as(
            "SELECT username, text, timestamp FROM messages ORDER BY timestamp DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(rows
            .into_iter()
            .rev()
            .map(|(username, text, timestamp)| {
                ChatMessage::new(username, text, Timestamp::new(timestamp))
            })
            .collect())
    }
}
