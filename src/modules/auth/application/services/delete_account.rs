use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::{UserRepository, UserRepositoryError};

#[derive(Debug, Clone, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait DeleteAccountUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<(), DeleteAccountError>;
}

/// Deletes the caller's own account. Profiles, tokens, posts, conversations
/// and messages go with it via foreign-key cascades.
pub struct DeleteAccountService<R>
where
    R: UserRepository,
{
    user_repository: R,
}

impl<R> DeleteAccountService<R>
where
    R: UserRepository,
{
    pub fn new(user_repository: R) -> Self {
        Self { user_repository }
    }
}

#[async_trait]
impl<R> DeleteAccountUseCase for DeleteAccountService<R>
where
    R: UserRepository,
{
    async fn execute(&self, user_id: Uuid) -> Result<(), DeleteAccountError> {
        self.user_repository
            .delete_user(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => DeleteAccountError::UserNotFound,
                other => DeleteAccountError::DatabaseError(other.to_string()),
            })?;

        info!(user_id = %user_id, "Account deleted");
        Ok(())
    }
}
