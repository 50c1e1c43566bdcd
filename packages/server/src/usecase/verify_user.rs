//! UseCase: 表示名の事前検証（HTTP）
//!
//! クライアントがチャット接続を開く前に名前を確認するためのユースケース。
//! チャットへの参加はこの検証が行われたかどうかに依存しません。

use crate::domain::{NameValidationError, Username, validate_name};

#[derive(Debug, Default, Clone, Copy)]
pub struct VerifyUserUseCase;

impl VerifyUserUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(
        &self,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Username, NameValidationError> {
        let result = validate_name(first_name, last_name);
        if let Err(e) = &result {
            tracing::debug!("Rejected name {:?} {:?}: {}", first_name, last_name, e);
        }
        result
    }
}
