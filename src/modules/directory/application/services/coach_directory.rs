use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::directory::application::domain::profiles::{CoachDetail, CoachListItem};
use crate::modules::directory::application::ports::outgoing::{CoachFilter, ProfileQuery};
use crate::modules::posts::application::domain::post::Post;
use crate::modules::posts::application::ports::outgoing::PostQuery;

/// Public coach page: the profile plus the coach's active posts.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachProfileWithPosts {
    #[serde(flatten)]
    pub detail: CoachDetail,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CoachDirectoryError {
    /// Covers absent, private and unverified profiles alike.
    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait CoachDirectoryUseCase: Send + Sync {
    async fn list(&self, filter: CoachFilter) -> Result<Vec<CoachListItem>, CoachDirectoryError>;
    async fn get(&self, user_id: Uuid) -> Result<CoachProfileWithPosts, CoachDirectoryError>;
}

pub struct CoachDirectoryService<Q>
where
    Q: ProfileQuery,
{
    profile_query: Q,
    post_query: Arc<dyn PostQuery>,
}

impl<Q> CoachDirectoryService<Q>
where
    Q: ProfileQuery,
{
    pub fn new(profile_query: Q, post_query: Arc<dyn PostQuery>) -> Self {
        Self {
            profile_query,
            post_query,
        }
    }
}

#[async_trait]
impl<Q> CoachDirectoryUseCase for CoachDirectoryService<Q>
where
    Q: ProfileQuery,
{
    async fn list(&self, filter: CoachFilter) -> Result<Vec<CoachListItem>, CoachDirectoryError> {
        self.profile_query
            .list_coaches(filter)
            .await
            .map_err(|e| CoachDirectoryError::QueryError(e.to_string()))
    }

    async fn get(&self, user_id: Uuid) -> Result<CoachProfileWithPosts, CoachDirectoryError> {
        let detail = self
            .profile_query
            .find_public_coach(user_id)
            .await
            .map_err(|e| CoachDirectoryError::QueryError(e.to_string()))?
            .ok_or(CoachDirectoryError::ProfileNotFound)?;

        let posts = self
            .post_query
            .list_active_by_coach(user_id)
            .await
            .map_err(|e| CoachDirectoryError::QueryError(e.to_string()))?;

        Ok(CoachProfileWithPosts { detail, posts })
    }
}
