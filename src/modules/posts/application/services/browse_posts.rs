use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::posts::application::domain::post::Post;
use crate::modules::posts::application::ports::outgoing::{PostFilter, PostQuery};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PostBrowseError {
    /// Covers absent posts and inactive posts viewed by anyone but their
    /// author.
    #[error("Post not found")]
    PostNotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait PostBrowseUseCase: Send + Sync {
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, PostBrowseError>;

    /// `viewer` is the authenticated caller, if any. Inactive posts are
    /// visible only to their author.
    async fn get(&self, post_id: Uuid, viewer: Option<Uuid>) -> Result<Post, PostBrowseError>;

    /// The caller's own posts, any status.
    async fn mine(&self, coach_user_id: Uuid) -> Result<Vec<Post>, PostBrowseError>;
}

pub struct PostBrowseService<Q>
where
    Q: PostQuery,
{
    post_query: Q,
}

impl<Q> PostBrowseService<Q>
where
    Q: PostQuery,
{
    pub fn new(post_query: Q) -> Self {
        Self { post_query }
    }
}

#[async_trait]
impl<Q> PostBrowseUseCase for PostBrowseService<Q>
where
    Q: PostQuery,
{
    async fn list(&self, filter: PostFilter) -> Result<Vec<Post>, PostBrowseError> {
        self.post_query
            .list_public(filter)
            .await
            .map_err(|e| PostBrowseError::QueryError(e.to_string()))
    }

    async fn get(&self, post_id: Uuid, viewer: Option<Uuid>) -> Result<Post, PostBrowseError> {
        let post = self
            .post_query
            .find_by_id(post_id)
            .await
            .map_err(|e| PostBrowseError::QueryError(e.to_string()))?
            .ok_or(PostBrowseError::PostNotFound)?;

        if !post.is_active() && viewer != Some(post.coach_user_id) {
            return Err(PostBrowseError::PostNotFound);
        }

        Ok(post)
    }

    async fn mine(&self, coach_user_id: Uuid) -> Result<Vec<Post>, PostBrowseError> {
        self.post_query
            .list_by_coach(coach_user_id)
            .await
            .map_err(|e| PostBrowseError::QueryError(e.to_string()))
    }
}
