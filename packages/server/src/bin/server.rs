//! Hiroba group chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --port 3000 --database-url sqlite://hiroba.db
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use hiroba_server::{
    domain::MessageRepository,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryMessageRepository, InMemoryPresenceRegistry, SqliteMessageRepository,
        },
    },
    ui::Server,
    usecase::{ChatCoordinator, ChatSettings, GetOnlineUsersUseCase},
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Group chat server with presence and message history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "5000")]
    port: u16,

    /// SQLite database URL; messages are kept in memory when omitted
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Number of recent messages sent to a client when it joins
    #[arg(long, env = "HISTORY_LIMIT", default_value = "20")]
    history_limit: usize,

    /// Time limit for a single message store operation, in milliseconds
    #[arg(long, env = "PERSISTENCE_TIMEOUT_MS", default_value = "5000")]
    persistence_timeout_ms: u64,
}

#[tokio::main]
async fn main() {
    // .env is optional
    dotenv::dotenv().ok();

    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // 1. Create Repositories
    let messages: Arc<dyn MessageRepository> = match &args.database_url {
        Some(url) => match SqliteMessageRepository::connect(url).await {
            Ok(repository) => {
                tracing::info!("Message store connected: {}", url);
                Arc::new(repository)
            }
            Err(e) => {
                tracing::error!("Failed to connect to message store: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("DATABASE_URL is not set; messages are kept in memory only");
            Arc::new(InMemoryMessageRepository::new())
        }
    };
    let presence = Arc::new(InMemoryPresenceRegistry::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create UseCases
    let settings = ChatSettings {
        history_limit: args.history_limit,
        store_timeout: Duration::from_millis(args.persistence_timeout_ms),
    };
    let coordinator = Arc::new(ChatCoordinator::new(
        presence.clone(),
        messages,
        message_pusher,
        settings,
    ));
    let get_online_users_usecase = Arc::new(GetOnlineUsersUseCase::new(presence));

    // 4. Create and run the server
    let server = Server::new(coordinator, get_online_users_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
