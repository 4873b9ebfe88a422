use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::directory::application::domain::profiles::{
    CoachProfile, OwnProfile, PlayerProfile,
};
use crate::modules::directory::application::ports::outgoing::{
    CoachProfileUpdate, PlayerProfileUpdate, ProfileQuery, ProfileRepository,
    ProfileRepositoryError,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum OwnProfileError {
    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// The caller's own profile: read and per-role full update. Role and
/// verification gating live in the route layer; user ids come from the
/// session principal.
#[async_trait]
pub trait OwnProfileUseCase: Send + Sync {
    async fn fetch(&self, user_id: Uuid) -> Result<OwnProfile, OwnProfileError>;

    async fn update_player(
        &self,
        user_id: Uuid,
        update: PlayerProfileUpdate,
    ) -> Result<PlayerProfile, OwnProfileError>;

    async fn update_coach(
        &self,
        user_id: Uuid,
        update: CoachProfileUpdate,
    ) -> Result<CoachProfile, OwnProfileError>;
}

pub struct OwnProfileService<Q>
where
    Q: ProfileQuery,
{
    profile_query: Q,
    profile_repository: Arc<dyn ProfileRepository>,
}

impl<Q> OwnProfileService<Q>
where
    Q: ProfileQuery,
{
    pub fn new(profile_query: Q, profile_repository: Arc<dyn ProfileRepository>) -> Self {
        Self {
            profile_query,
            profile_repository,
        }
    }
}

fn map_repo_error(e: ProfileRepositoryError) -> OwnProfileError {
    match e {
        ProfileRepositoryError::ProfileNotFound => OwnProfileError::ProfileNotFound,
        ProfileRepositoryError::DatabaseError(msg) => OwnProfileError::DatabaseError(msg),
    }
}

#[async_trait]
impl<Q> OwnProfileUseCase for OwnProfileService<Q>
where
    Q: ProfileQuery,
{
    async fn fetch(&self, user_id: Uuid) -> Result<OwnProfile, OwnProfileError> {
        self.profile_query
            .find_own_profile(user_id)
            .await
            .map_err(|e| OwnProfileError::DatabaseError(e.to_string()))?
            .ok_or(OwnProfileError::ProfileNotFound)
    }

    async fn update_player(
        &self,
        user_id: Uuid,
        update: PlayerProfileUpdate,
    ) -> Result<PlayerProfile, OwnProfileError> {
        self.profile_repository
            .update_player_profile(user_id, update)
            .await
            .map_err(map_repo_error)
    }

    async fn update_coach(
        &self,
        user_id: Uuid,
        update: CoachProfileUpdate,
    ) -> Result<CoachProfile, OwnProfileError> {
        self.profile_repository
            .update_coach_profile(user_id, update)
            .await
            .map_err(map_repo_error)
    }
}
