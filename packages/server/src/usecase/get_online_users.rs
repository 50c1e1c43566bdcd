//! UseCase: オンライン中のユーザー一覧の取得

use std::sync::Arc;

use crate::domain::{PresenceRegistry, Username};

pub struct GetOnlineUsersUseCase {
    presence: Arc<dyn PresenceRegistry>,
}

impl GetOnlineUsersUseCase {
    pub fn new(presence: Arc<dyn PresenceRegistry>) -> Self {
        Self { presence }
    }

    pub async fn execute(&self) -> Vec<Username> {
        self.presence.snapshot().await
    }
}
