use serde::{Deserialize, Serialize};

use super::non_blank;
use crate::api::response_errors::CreateUserError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
}

impl CreateUserRequest {
    /// Returns the trimmed username
    pub fn validate(self) -> Result<String, CreateUserError> {
        non_blank(self.username).ok_or(CreateUserError::UsernameRequired)
    }
}
