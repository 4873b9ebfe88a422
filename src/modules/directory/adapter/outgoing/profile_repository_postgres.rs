use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::directory::application::domain::profiles::{CoachProfile, PlayerProfile};
use crate::modules::directory::application::ports::outgoing::{
    CoachProfileUpdate, PlayerProfileUpdate, ProfileRepository, ProfileRepositoryError,
};

use super::profile_query_postgres::{coach_profile, player_profile};
use super::sea_orm_entity::{coach_profiles, player_profiles};

#[derive(Clone)]
pub struct ProfileRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProfileRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: sea_orm::DbErr) -> ProfileRepositoryError {
    ProfileRepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProfileRepository for ProfileRepositoryPostgres {
    async fn update_player_profile(
        &self,
        user_id: Uuid,
        update: PlayerProfileUpdate,
    ) -> Result<PlayerProfile, ProfileRepositoryError> {
        let model = player_profiles::Entity::find()
            .filter(player_profiles::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(ProfileRepositoryError::ProfileNotFound)?;

        let mut active: player_profiles::ActiveModel = model.into();
        active.first_name = Set(update.first_name);
        active.last_name = Set(update.last_name);
        active.team = Set(update.team);
        active.position = Set(update.position);
        active.level = Set(update.level);
        active.age_group = Set(update.age_group);
        active.region = Set(update.region);
        active.bio = Set(update.bio);
        active.contact_email = Set(update.contact_email);
        active.contact_phone = Set(update.contact_phone);
        if let Some(is_public) = update.is_public {
            active.is_public = Set(is_public);
        }

        let updated = active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(player_profile(updated))
    }

    async fn update_coach_profile(
        &self,
        user_id: Uuid,
        update: CoachProfileUpdate,
    ) -> Result<CoachProfile, ProfileRepositoryError> {
        let model = coach_profiles::Entity::find()
            .filter(coach_profiles::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(ProfileRepositoryError::ProfileNotFound)?;

        let mut active: coach_profiles::ActiveModel = model.into();
        active.first_name = Set(update.first_name);
        active.last_name = Set(update.last_name);
        active.club = Set(update.club);
        active.team_name = Set(update.team_name);
        active.level = Set(update.level);
        active.region = Set(update.region);
        active.record = Set(update.record);
        active.bio = Set(update.bio);
        active.contact_email = Set(update.contact_email);
        active.contact_phone = Set(update.contact_phone);
        if let Some(is_public) = update.is_public {
            active.is_public = Set(is_public);
        }

        let updated = active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(coach_profile(updated))
    }
}
