use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{UserRecord, UserRole};

/// Data needed to create an account. The role-specific profile row is created
/// inside the same transaction as the user row: a user never exists without
/// exactly one profile.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user and its role profile atomically.
    async fn create_user_with_profile(
        &self,
        user: NewUser,
    ) -> Result<UserRecord, UserRepositoryError>;

    /// Transition `email_verified_at` from null to now. Idempotent for an
    /// already-verified user.
    async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), UserRepositoryError>;

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError>;

    /// Hard delete. FK cascades remove the profile, media, posts,
    /// conversation participation and sent messages.
    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
