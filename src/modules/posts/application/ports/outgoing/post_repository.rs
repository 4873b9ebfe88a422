use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::posts::application::domain::post::{Post, PostStatus, PostType};

#[derive(Debug, Clone)]
pub struct NewPost {
    pub coach_user_id: Uuid,
    pub post_type: PostType,
    pub title: String,
    pub description: String,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub region: String,
    pub needs: Option<String>,
}

/// Full-replacement update; ownership is checked by the repository against
/// `coach_user_id`, never taken from the payload.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub post_type: PostType,
    pub title: String,
    pub description: String,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub region: String,
    pub needs: Option<String>,
    pub status: PostStatus,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PostRepositoryError {
    /// Absent and not-owned are the same error on purpose.
    #[error("Post not found")]
    PostNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, PostRepositoryError>;

    async fn update_owned(
        &self,
        post_id: Uuid,
        coach_user_id: Uuid,
        update: PostUpdate,
    ) -> Result<Post, PostRepositoryError>;

    async fn delete_owned(
        &self,
        post_id: Uuid,
        coach_user_id: Uuid,
    ) -> Result<(), PostRepositoryError>;
}
