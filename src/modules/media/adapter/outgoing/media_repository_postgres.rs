use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::adapter::outgoing::sea_orm_entity::users;
use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::directory::adapter::outgoing::sea_orm_entity::{
    coach_profiles, player_profiles,
};
use crate::modules::directory::application::domain::profiles::MediaItem;
use crate::modules::media::application::ports::outgoing::{
    MediaRepository, MediaRepositoryError,
};

use super::sea_orm_entity::media_assets;

/// Which role profile the asset hangs off; exactly one of the two FK
/// columns is set.
enum ProfileRef {
    Player(Uuid),
    Coach(Uuid),
}

#[derive(Clone)]
pub struct MediaRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl MediaRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn resolve_profile(
        &self,
        owner_user_id: Uuid,
    ) -> Result<ProfileRef, MediaRepositoryError> {
        let user = users::Entity::find_by_id(owner_user_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(MediaRepositoryError::ProfileNotFound)?;

        match UserRole::from_str(&user.role) {
            Some(UserRole::Player) => {
                let profile = player_profiles::Entity::find()
                    .filter(player_profiles::Column::UserId.eq(owner_user_id))
                    .one(&*self.db)
                    .await
                    .map_err(map_db_err)?
                    .ok_or(MediaRepositoryError::ProfileNotFound)?;
                Ok(ProfileRef::Player(profile.id))
            }
            Some(UserRole::Coach) => {
                let profile = coach_profiles::Entity::find()
                    .filter(coach_profiles::Column::UserId.eq(owner_user_id))
                    .one(&*self.db)
                    .await
                    .map_err(map_db_err)?
                    .ok_or(MediaRepositoryError::ProfileNotFound)?;
                Ok(ProfileRef::Coach(profile.id))
            }
            None => Err(MediaRepositoryError::DatabaseError(format!(
                "unknown role in users row: {}",
                user.role
            ))),
        }
    }
}

fn map_db_err(e: sea_orm::DbErr) -> MediaRepositoryError {
    MediaRepositoryError::DatabaseError(e.to_string())
}

fn media_item(model: media_assets::Model) -> MediaItem {
    MediaItem {
        id: model.id,
        kind: model.kind,
        url: model.url,
        caption: model.caption,
        created_at: model.created_at.into(),
    }
}

fn asset_row(
    owner_user_id: Uuid,
    profile: &ProfileRef,
    kind: &str,
    url: String,
    caption: Option<String>,
) -> media_assets::ActiveModel {
    let (player_profile_id, coach_profile_id) = match profile {
        ProfileRef::Player(id) => (Some(*id), None),
        ProfileRef::Coach(id) => (None, Some(*id)),
    };

    media_assets::ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_user_id: Set(owner_user_id),
        player_profile_id: Set(player_profile_id),
        coach_profile_id: Set(coach_profile_id),
        kind: Set(kind.to_string()),
        url: Set(url),
        caption: Set(caption),
        ..Default::default()
    }
}

#[async_trait]
impl MediaRepository for MediaRepositoryPostgres {
    async fn set_profile_photo(
        &self,
        owner_user_id: Uuid,
        url: String,
    ) -> Result<MediaItem, MediaRepositoryError> {
        let profile = self.resolve_profile(owner_user_id).await?;

        let txn = self.db.begin().await.map_err(map_db_err)?;

        // One photo per profile: drop the prior IMAGE asset, then point
        // photo_url at the new upload.
        match &profile {
            ProfileRef::Player(profile_id) => {
                media_assets::Entity::delete_many()
                    .filter(media_assets::Column::PlayerProfileId.eq(*profile_id))
                    .filter(media_assets::Column::Kind.eq("IMAGE"))
                    .exec(&txn)
                    .await
                    .map_err(map_db_err)?;

                let model = player_profiles::Entity::find_by_id(*profile_id)
                    .one(&txn)
                    .await
                    .map_err(map_db_err)?
                    .ok_or(MediaRepositoryError::ProfileNotFound)?;
                let mut active: player_profiles::ActiveModel = model.into();
                active.photo_url = Set(Some(url.clone()));
                active.update(&txn).await.map_err(map_db_err)?;
            }
            ProfileRef::Coach(profile_id) => {
                media_assets::Entity::delete_many()
                    .filter(media_assets::Column::CoachProfileId.eq(*profile_id))
                    .filter(media_assets::Column::Kind.eq("IMAGE"))
                    .exec(&txn)
                    .await
                    .map_err(map_db_err)?;

                let model = coach_profiles::Entity::find_by_id(*profile_id)
                    .one(&txn)
                    .await
                    .map_err(map_db_err)?
                    .ok_or(MediaRepositoryError::ProfileNotFound)?;
                let mut active: coach_profiles::ActiveModel = model.into();
                active.photo_url = Set(Some(url.clone()));
                active.update(&txn).await.map_err(map_db_err)?;
            }
        }

        let inserted = asset_row(owner_user_id, &profile, "IMAGE", url, None)
            .insert(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(media_item(inserted))
    }

    async fn add_profile_video(
        &self,
        owner_user_id: Uuid,
        url: String,
        caption: Option<String>,
    ) -> Result<MediaItem, MediaRepositoryError> {
        let profile = self.resolve_profile(owner_user_id).await?;

        let inserted = asset_row(owner_user_id, &profile, "VIDEO", url, caption)
            .insert(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(media_item(inserted))
    }
}
