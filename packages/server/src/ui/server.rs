//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::{ChatCoordinator, GetOnlineUsersUseCase, VerifyUserUseCase};

use super::{
    handler::{health_check, online_users, verify_user, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router.
///
/// Exposed separately from [`Server::run`] so that tests can serve it on an ephemeral port.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/verify-user", post(verify_user))
        .route("/api/health", get(health_check))
        .route("/api/users", get(online_users))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Group chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(coordinator, get_online_users_usecase);
/// server.run("0.0.0.0".to_string(), 5000).await?;
/// ```
pub struct Server {
    coordinator: Arc<ChatCoordinator>,
    get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
}

impl Server {
    pub fn new(
        coordinator: Arc<ChatCoordinator>,
        get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
    ) -> Self {
        Self {
            coordinator,
            get_online_users_usecase,
        }
    }

    /// Run the chat server until a shutdown signal is received
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            coordinator: self.coordinator,
            verify_user_usecase: VerifyUserUseCase::new(),
            get_online_users_usecase: self.get_online_users_usecase,
        });
        let app = router(app_state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
