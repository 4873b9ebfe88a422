use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Query as SubQuery};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::adapter::outgoing::sea_orm_entity::users;
use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::directory::application::domain::profiles::{
    CoachDetail, CoachListItem, CoachProfile, MediaItem, OwnProfile, PlayerDetail, PlayerListItem,
    PlayerProfile,
};
use crate::modules::directory::application::ports::outgoing::{
    CoachFilter, PlayerFilter, ProfileQuery, ProfileQueryError, ProfileSort,
};
use crate::modules::media::adapter::outgoing::sea_orm_entity::media_assets;

use super::sea_orm_entity::{coach_profiles, player_profiles};

#[derive(Clone)]
pub struct ProfileQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProfileQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Subquery over verified user accounts; public lookups join through it.
    fn verified_user_ids() -> sea_orm::sea_query::SelectStatement {
        SubQuery::select()
            .column(users::Column::Id)
            .from(users::Entity)
            .and_where(Expr::col(users::Column::EmailVerifiedAt).is_not_null())
            .to_owned()
    }

    async fn media_for_profiles(
        &self,
        column: media_assets::Column,
        profile_ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<MediaItem>>, ProfileQueryError> {
        if profile_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = media_assets::Entity::find()
            .filter(column.is_in(profile_ids))
            .order_by_asc(media_assets::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let mut by_profile: HashMap<Uuid, Vec<MediaItem>> = HashMap::new();
        for row in rows {
            let key = match column {
                media_assets::Column::PlayerProfileId => row.player_profile_id,
                _ => row.coach_profile_id,
            };
            if let Some(profile_id) = key {
                by_profile
                    .entry(profile_id)
                    .or_default()
                    .push(media_item(row));
            }
        }

        Ok(by_profile)
    }
}

fn map_db_err(e: sea_orm::DbErr) -> ProfileQueryError {
    ProfileQueryError::DatabaseError(e.to_string())
}

fn media_item(row: media_assets::Model) -> MediaItem {
    MediaItem {
        id: row.id,
        kind: row.kind,
        url: row.url,
        caption: row.caption,
        created_at: row.created_at.into(),
    }
}

pub(crate) fn player_profile(model: player_profiles::Model) -> PlayerProfile {
    PlayerProfile {
        user_id: model.user_id,
        first_name: model.first_name,
        last_name: model.last_name,
        team: model.team,
        position: model.position,
        level: model.level,
        age_group: model.age_group,
        region: model.region,
        bio: model.bio,
        contact_email: model.contact_email,
        contact_phone: model.contact_phone,
        photo_url: model.photo_url,
        is_public: model.is_public,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

pub(crate) fn coach_profile(model: coach_profiles::Model) -> CoachProfile {
    CoachProfile {
        user_id: model.user_id,
        first_name: model.first_name,
        last_name: model.last_name,
        club: model.club,
        team_name: model.team_name,
        level: model.level,
        region: model.region,
        record: model.record,
        bio: model.bio,
        contact_email: model.contact_email,
        contact_phone: model.contact_phone,
        photo_url: model.photo_url,
        is_public: model.is_public,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

#[async_trait]
impl ProfileQuery for ProfileQueryPostgres {
    async fn list_players(
        &self,
        filter: PlayerFilter,
    ) -> Result<Vec<PlayerListItem>, ProfileQueryError> {
        let mut query = player_profiles::Entity::find()
            .filter(player_profiles::Column::IsPublic.eq(true))
            .filter(player_profiles::Column::UserId.in_subquery(Self::verified_user_ids()));

        if let Some(ref age_group) = filter.age_group {
            query = query.filter(player_profiles::Column::AgeGroup.eq(age_group));
        }
        if let Some(ref level) = filter.level {
            query = query.filter(player_profiles::Column::Level.eq(level));
        }
        if let Some(ref position) = filter.position {
            query = query.filter(player_profiles::Column::Position.eq(position));
        }
        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", search.trim());
            query = query.filter(
                Condition::any()
                    .add(Expr::col(player_profiles::Column::FirstName).ilike(&pattern))
                    .add(Expr::col(player_profiles::Column::LastName).ilike(&pattern))
                    .add(Expr::col(player_profiles::Column::Team).ilike(&pattern)),
            );
        }

        query = match filter.sort {
            ProfileSort::Newest => query.order_by_desc(player_profiles::Column::CreatedAt),
            ProfileSort::Updated => query.order_by_desc(player_profiles::Column::UpdatedAt),
        };

        let models = query.all(&*self.db).await.map_err(map_db_err)?;
        let mut media = self
            .media_for_profiles(
                media_assets::Column::PlayerProfileId,
                models.iter().map(|m| m.id).collect(),
            )
            .await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let first_media = media
                    .remove(&model.id)
                    .and_then(|items| items.into_iter().next());
                PlayerListItem {
                    profile: player_profile(model),
                    first_media,
                }
            })
            .collect())
    }

    async fn find_public_player(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PlayerDetail>, ProfileQueryError> {
        let model = player_profiles::Entity::find()
            .filter(player_profiles::Column::UserId.eq(user_id))
            .filter(player_profiles::Column::IsPublic.eq(true))
            .filter(player_profiles::Column::UserId.in_subquery(Self::verified_user_ids()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        let Some(model) = model else {
            return Ok(None);
        };

        let media = self
            .media_for_profiles(media_assets::Column::PlayerProfileId, vec![model.id])
            .await?
            .remove(&model.id)
            .unwrap_or_default();

        Ok(Some(PlayerDetail {
            profile: player_profile(model),
            media,
        }))
    }

    async fn list_coaches(
        &self,
        filter: CoachFilter,
    ) -> Result<Vec<CoachListItem>, ProfileQueryError> {
        let mut query = coach_profiles::Entity::find()
            .filter(coach_profiles::Column::IsPublic.eq(true))
            .filter(coach_profiles::Column::UserId.in_subquery(Self::verified_user_ids()));

        if let Some(ref level) = filter.level {
            query = query.filter(coach_profiles::Column::Level.eq(level));
        }
        if let Some(ref region) = filter.region {
            query = query.filter(coach_profiles::Column::Region.eq(region));
        }
        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", search.trim());
            query = query.filter(
                Condition::any()
                    .add(Expr::col(coach_profiles::Column::FirstName).ilike(&pattern))
                    .add(Expr::col(coach_profiles::Column::LastName).ilike(&pattern))
                    .add(Expr::col(coach_profiles::Column::Club).ilike(&pattern))
                    .add(Expr::col(coach_profiles::Column::TeamName).ilike(&pattern)),
            );
        }

        query = match filter.sort {
            ProfileSort::Newest => query.order_by_desc(coach_profiles::Column::CreatedAt),
            ProfileSort::Updated => query.order_by_desc(coach_profiles::Column::UpdatedAt),
        };

        let models = query.all(&*self.db).await.map_err(map_db_err)?;
        let mut media = self
            .media_for_profiles(
                media_assets::Column::CoachProfileId,
                models.iter().map(|m| m.id).collect(),
            )
            .await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let first_media = media
                    .remove(&model.id)
                    .and_then(|items| items.into_iter().next());
                CoachListItem {
                    profile: coach_profile(model),
                    first_media,
                }
            })
            .collect())
    }

    async fn find_public_coach(
        &self,
        user_id: Uuid,
    ) -> Result<Option<CoachDetail>, ProfileQueryError> {
        let model = coach_profiles::Entity::find()
            .filter(coach_profiles::Column::UserId.eq(user_id))
            .filter(coach_profiles::Column::IsPublic.eq(true))
            .filter(coach_profiles::Column::UserId.in_subquery(Self::verified_user_ids()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        let Some(model) = model else {
            return Ok(None);
        };

        let media = self
            .media_for_profiles(media_assets::Column::CoachProfileId, vec![model.id])
            .await?
            .remove(&model.id)
            .unwrap_or_default();

        Ok(Some(CoachDetail {
            profile: coach_profile(model),
            media,
        }))
    }

    async fn find_own_profile(
        &self,
        user_id: Uuid,
    ) -> Result<Option<OwnProfile>, ProfileQueryError> {
        let user = users::Entity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        let Some(user) = user else {
            return Ok(None);
        };

        match UserRole::from_str(&user.role) {
            Some(UserRole::Player) => Ok(player_profiles::Entity::find()
                .filter(player_profiles::Column::UserId.eq(user_id))
                .one(&*self.db)
                .await
                .map_err(map_db_err)?
                .map(|model| OwnProfile::Player(player_profile(model)))),
            Some(UserRole::Coach) => Ok(coach_profiles::Entity::find()
                .filter(coach_profiles::Column::UserId.eq(user_id))
                .one(&*self.db)
                .await
                .map_err(map_db_err)?
                .map(|model| OwnProfile::Coach(coach_profile(model)))),
            None => Err(ProfileQueryError::DatabaseError(format!(
                "unknown role in users row: {}",
                user.role
            ))),
        }
    }
}
