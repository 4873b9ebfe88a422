use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::posts::application::domain::post::{Post, PostType};

#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub post_type: Option<PostType>,
    /// Matches the owning coach's profile `level`.
    pub level: Option<String>,
    /// Matches the owning coach's profile `region`.
    pub region: Option<String>,
    /// Case-insensitive substring over title, description and location.
    pub search: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PostQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read side of the post board. Public listings carry only active posts of
/// public, verified coaches; newest first.
#[async_trait]
pub trait PostQuery: Send + Sync {
    async fn list_public(&self, filter: PostFilter) -> Result<Vec<Post>, PostQueryError>;

    async fn find_by_id(&self, post_id: Uuid) -> Result<Option<Post>, PostQueryError>;

    /// All of a coach's posts, any status, newest first.
    async fn list_by_coach(&self, coach_user_id: Uuid) -> Result<Vec<Post>, PostQueryError>;

    /// Active posts only, for the public coach detail page.
    async fn list_active_by_coach(&self, coach_user_id: Uuid)
        -> Result<Vec<Post>, PostQueryError>;
}
