use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::directory::application::domain::profiles::{
    CoachDetail, CoachListItem, OwnProfile, PlayerDetail, PlayerListItem,
};

/// Directory sort order. `Newest` is account age, `Updated` is last profile
/// edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileSort {
    #[default]
    Newest,
    Updated,
}

#[derive(Debug, Clone, Default)]
pub struct PlayerFilter {
    pub age_group: Option<String>,
    pub level: Option<String>,
    pub position: Option<String>,
    /// Case-insensitive substring over first name, last name and team.
    pub search: Option<String>,
    pub sort: ProfileSort,
}

#[derive(Debug, Clone, Default)]
pub struct CoachFilter {
    pub level: Option<String>,
    pub region: Option<String>,
    /// Case-insensitive substring over first name, last name, club and team
    /// name.
    pub search: Option<String>,
    pub sort: ProfileSort,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Read side of the directory. Public lookups return only `is_public`
/// profiles of verified users; `None` covers absent, private and unverified
/// alike so callers cannot leak existence.
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    async fn list_players(
        &self,
        filter: PlayerFilter,
    ) -> Result<Vec<PlayerListItem>, ProfileQueryError>;

    async fn find_public_player(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PlayerDetail>, ProfileQueryError>;

    async fn list_coaches(
        &self,
        filter: CoachFilter,
    ) -> Result<Vec<CoachListItem>, ProfileQueryError>;

    async fn find_public_coach(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CoachDetail>, ProfileQueryError>;

    /// Owner view: no visibility gating.
    async fn find_own_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<OwnProfile>, ProfileQueryError>;
}
