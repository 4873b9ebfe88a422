use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::directory::application::domain::profiles::MediaItem;

#[derive(Debug, Clone, thiserror::Error)]
pub enum MediaRepositoryError {
    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Sets the role profile's `photo_url` and replaces its IMAGE asset, in
    /// one transaction. A profile has exactly one photo.
    async fn set_profile_photo(
        &self,
        owner_user_id: Uuid,
        url: String,
    ) -> Result<MediaItem, MediaRepositoryError>;

    /// Appends a VIDEO asset; videos accumulate.
    async fn add_profile_video(
        &self,
        owner_user_id: Uuid,
        url: String,
        caption: Option<String>,
    ) -> Result<MediaItem, MediaRepositoryError>;
}
