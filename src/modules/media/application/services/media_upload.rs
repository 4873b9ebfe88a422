use async_trait::async_trait;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::directory::application::domain::profiles::MediaItem;
use crate::modules::media::application::domain::upload_policy::UploadPolicy;
use crate::modules::media::application::ports::outgoing::{
    MediaRepository, MediaRepositoryError, MediaStorage,
};
use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum MediaUploadError {
    #[error("{0}")]
    InvalidMedia(String),

    #[error("Wrong role for this upload")]
    WrongRole,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Client-side direct-upload settings for player highlight videos.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoUploadConfig {
    pub bucket: String,
    pub object_prefix: String,
    pub max_video_bytes: usize,
    pub allowed_mime_types: Vec<String>,
}

#[async_trait]
pub trait MediaUploadUseCase: Send + Sync {
    async fn upload_profile_photo(
        &self,
        user_id: Uuid,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaItem, MediaUploadError>;

    async fn upload_profile_video(
        &self,
        user_id: Uuid,
        content_type: &str,
        bytes: Vec<u8>,
        caption: Option<String>,
    ) -> Result<MediaItem, MediaUploadError>;

    /// Player-only: coaches do not have highlight reels.
    fn video_upload_config(&self, role: UserRole) -> Result<VideoUploadConfig, MediaUploadError>;
}

pub struct MediaUploadService {
    policy: UploadPolicy,
    storage: Arc<dyn MediaStorage>,
    repository: Arc<dyn MediaRepository>,
}

impl MediaUploadService {
    pub fn new(
        policy: UploadPolicy,
        storage: Arc<dyn MediaStorage>,
        repository: Arc<dyn MediaRepository>,
    ) -> Self {
        Self {
            policy,
            storage,
            repository,
        }
    }

    fn object_name(&self, user_id: Uuid, content_type: &str) -> String {
        format!(
            "{}/{}/{}.{}",
            self.policy.object_prefix,
            user_id,
            Uuid::new_v4(),
            UploadPolicy::extension_for(content_type)
        )
    }
}

fn map_repo_error(e: MediaRepositoryError) -> MediaUploadError {
    match e {
        MediaRepositoryError::ProfileNotFound => MediaUploadError::ProfileNotFound,
        MediaRepositoryError::DatabaseError(msg) => MediaUploadError::DatabaseError(msg),
    }
}

#[async_trait]
impl MediaUploadUseCase for MediaUploadService {
    async fn upload_profile_photo(
        &self,
        user_id: Uuid,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaItem, MediaUploadError> {
        self.policy
            .check_image(content_type, bytes.len())
            .map_err(MediaUploadError::InvalidMedia)?;

        let object_name = self.object_name(user_id, content_type);
        let url = self
            .storage
            .upload(&object_name, content_type, bytes)
            .await
            .map_err(|e| MediaUploadError::StorageError(e.to_string()))?;

        let item = self
            .repository
            .set_profile_photo(user_id, url)
            .await
            .map_err(map_repo_error)?;

        info!(user_id = %user_id, url = %item.url, "Profile photo replaced");
        Ok(item)
    }

    async fn upload_profile_video(
        &self,
        user_id: Uuid,
        content_type: &str,
        bytes: Vec<u8>,
        caption: Option<String>,
    ) -> Result<MediaItem, MediaUploadError> {
        self.policy
            .check_video(content_type, bytes.len())
            .map_err(MediaUploadError::InvalidMedia)?;

        let object_name = self.object_name(user_id, content_type);
        let url = self
            .storage
            .upload(&object_name, content_type, bytes)
            .await
            .map_err(|e| MediaUploadError::StorageError(e.to_string()))?;

        let item = self
            .repository
            .add_profile_video(user_id, url, caption)
            .await
            .map_err(map_repo_error)?;

        info!(user_id = %user_id, url = %item.url, "Profile video added");
        Ok(item)
    }

    fn video_upload_config(&self, role: UserRole) -> Result<VideoUploadConfig, MediaUploadError> {
        if role != UserRole::Player {
            return Err(MediaUploadError::WrongRole);
        }

        Ok(VideoUploadConfig {
            bucket: self.policy.bucket_name.clone(),
            object_prefix: self.policy.object_prefix.clone(),
            max_video_bytes: self.policy.max_video_bytes,
            allowed_mime_types: self
                .policy
                .allowed_video_mime_types
                .iter()
                .map(|m| m.to_string())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::media::application::ports::outgoing::MediaStorageError;
    use chrono::Utc;
    use mockall::mock;

    mock! {
        pub Storage {}
        #[async_trait]
        impl MediaStorage for Storage {
            async fn upload(
                &self,
                object_name: &str,
                content_type: &str,
                bytes: Vec<u8>,
            ) -> Result<String, MediaStorageError>;
        }
    }

    mock! {
        pub Repo {}
        #[async_trait]
        impl MediaRepository for Repo {
            async fn set_profile_photo(
                &self,
                owner_user_id: Uuid,
                url: String,
            ) -> Result<MediaItem, MediaRepositoryError>;
            async fn add_profile_video(
                &self,
                owner_user_id: Uuid,
                url: String,
                caption: Option<String>,
            ) -> Result<MediaItem, MediaRepositoryError>;
        }
    }

    fn item(kind: &str, url: &str) -> MediaItem {
        MediaItem {
            id: Uuid::new_v4(),
            kind: kind.to_string(),
            url: url.to_string(),
            caption: None,
            created_at: Utc::now(),
        }
    }

    fn service(storage: MockStorage, repo: MockRepo) -> MediaUploadService {
        MediaUploadService::new(
            UploadPolicy::new("test-bucket".to_string()),
            Arc::new(storage),
            Arc::new(repo),
        )
    }

    #[tokio::test]
    async fn rejected_photo_never_reaches_storage() {
        let storage = MockStorage::new(); // upload must not be called
        let repo = MockRepo::new();

        let result = service(storage, repo)
            .upload_profile_photo(Uuid::new_v4(), "application/pdf", vec![0u8; 16])
            .await;

        assert!(matches!(result, Err(MediaUploadError::InvalidMedia(_))));
    }

    #[tokio::test]
    async fn photo_upload_stores_then_records() {
        let user_id = Uuid::new_v4();

        let mut storage = MockStorage::new();
        storage
            .expect_upload()
            .withf(move |object, content_type, _| {
                object.starts_with(&format!("profiles/{user_id}/"))
                    && object.ends_with(".jpg")
                    && content_type == "image/jpeg"
            })
            .times(1)
            .returning(|_, _, _| Ok("https://storage.googleapis.com/test-bucket/x".to_string()));

        let mut repo = MockRepo::new();
        repo.expect_set_profile_photo()
            .withf(move |uid, _| *uid == user_id)
            .times(1)
            .returning(|_, url| Ok(item("IMAGE", &url)));

        let result = service(storage, repo)
            .upload_profile_photo(user_id, "image/jpeg", vec![0u8; 1024])
            .await
            .unwrap();

        assert_eq!(result.kind, "IMAGE");
    }

    #[tokio::test]
    async fn video_caption_is_passed_through() {
        let mut storage = MockStorage::new();
        storage
            .expect_upload()
            .returning(|_, _, _| Ok("https://storage.googleapis.com/test-bucket/v".to_string()));

        let mut repo = MockRepo::new();
        repo.expect_add_profile_video()
            .withf(|_, _, caption| caption.as_deref() == Some("Season highlights"))
            .times(1)
            .returning(|_, url, caption| {
                let mut i = item("VIDEO", &url);
                i.caption = caption;
                Ok(i)
            });

        let result = service(storage, repo)
            .upload_profile_video(
                Uuid::new_v4(),
                "video/mp4",
                vec![0u8; 1024],
                Some("Season highlights".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(result.caption.as_deref(), Some("Season highlights"));
    }

    #[tokio::test]
    async fn video_config_is_player_only() {
        let svc = service(MockStorage::new(), MockRepo::new());

        assert!(matches!(
            svc.video_upload_config(UserRole::Coach),
            Err(MediaUploadError::WrongRole)
        ));

        let config = svc.video_upload_config(UserRole::Player).unwrap();
        assert_eq!(config.bucket, "test-bucket");
        assert_eq!(config.object_prefix, "profiles");
    }
}
