use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserRecord;

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserQueryError>;

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRecord>, UserQueryError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
