use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account role, fixed at signup. Drives which profile row exists and which
/// operations the principal may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    #[serde(rename = "PLAYER")]
    Player,
    #[serde(rename = "COACH")]
    Coach,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Player => "PLAYER",
            UserRole::Coach => "COACH",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "PLAYER" => Some(UserRole::Player),
            "COACH" => Some(UserRole::Coach),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account row as the auth module sees it.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub email_verified_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}
