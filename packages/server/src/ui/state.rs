//! Server state shared by all handlers.

use std::sync::Arc;

use crate::usecase::{ChatCoordinator, GetOnlineUsersUseCase, VerifyUserUseCase};

/// Shared application state
pub struct AppState {
    /// ChatCoordinator（WebSocket のイベント処理）
    pub coordinator: Arc<ChatCoordinator>,
    /// VerifyUserUseCase（名前の事前検証）
    pub verify_user_usecase: VerifyUserUseCase,
    /// GetOnlineUsersUseCase（オンライン一覧の取得）
    pub get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
}
