use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::directory::application::domain::profiles::{CoachProfile, PlayerProfile};

/// Full-replacement update payloads: PUT semantics, a `None` clears the
/// column. `is_public` is the exception: `None` leaves it unchanged.
/// `photo_url` is owned by the media module and not touched here.
#[derive(Debug, Clone, Default)]
pub struct PlayerProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub level: Option<String>,
    pub age_group: Option<String>,
    pub region: Option<String>,
    pub bio: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct CoachProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub club: Option<String>,
    pub team_name: Option<String>,
    pub level: Option<String>,
    pub region: Option<String>,
    pub record: Option<String>,
    pub bio: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileRepositoryError {
    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn update_player_profile(
        &self,
        user_id: Uuid,
        update: PlayerProfileUpdate,
    ) -> Result<PlayerProfile, ProfileRepositoryError>;

    async fn update_coach_profile(
        &self,
        user_id: Uuid,
        update: CoachProfileUpdate,
    ) -> Result<CoachProfile, ProfileRepositoryError>;
}
