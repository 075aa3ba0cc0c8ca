use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing)]
    pub session_id: Uuid, // bearer token, never echoed back
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Validated registration command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
}

impl User {
    pub fn new(session_id: Uuid, cmd: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: cmd.name,
            session_id,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
