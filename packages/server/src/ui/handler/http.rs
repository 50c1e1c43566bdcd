//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{
        ErrorResponse, OnlineUsersDto, VerifiedUserDto, VerifyUserRequest, VerifyUserResponse,
    },
    ui::state::AppState,
};

/// Validate a display name before the client opens the chat connection.
///
/// Responds `400 {"error": ...}` when a rule is violated. A body that cannot be
/// read as the request (not JSON, non-string names) counts as missing names.
pub async fn verify_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<VerifyUserRequest>, JsonRejection>,
) -> Result<Json<VerifyUserResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!("Unreadable /verify-user body: {}", rejection);
            VerifyUserRequest::default()
        }
    };
    let first_name = request.first_name.as_deref();
    let last_name = request.last_name.as_deref();

    match state.verify_user_usecase.execute(first_name, last_name) {
        Ok(_username) => Ok(Json(VerifyUserResponse {
            message: "user verified".to_string(),
            user: VerifiedUserDto {
                first_name: first_name.unwrap_or_default().to_string(),
                last_name: last_name.unwrap_or_default().to_string(),
            },
        })),
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Usernames of everyone currently online
pub async fn online_users(State(state): State<Arc<AppState>>) -> Json<OnlineUsersDto> {
    let users = state.get_online_users_usecase.execute().await;
    Json(OnlineUsersDto {
        users: users.into_iter().map(|u| u.into_string()).collect(),
    })
}
