use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::users::repo_types::{NewUser, User};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
}

impl TryFrom<RegisterRequest> for NewUser {
    type Error = AppError;

    fn try_from(req: RegisterRequest) -> Result<Self, Self::Error> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name must not be empty"));
        }
        Ok(NewUser {
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<User>,
}

/// Single lookup; keyed `users` like the listing.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    #[serde(rename = "users")]
    pub user: Option<User>,
}
