use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set, TransactionTrait};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{UserRecord, UserRole};
use crate::modules::auth::application::ports::outgoing::{
    NewUser, UserRepository, UserRepositoryError,
};
use crate::modules::directory::adapter::outgoing::sea_orm_entity::coach_profiles::ActiveModel as CoachProfileActiveModel;
use crate::modules::directory::adapter::outgoing::sea_orm_entity::player_profiles::ActiveModel as PlayerProfileActiveModel;

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_record(model: UserModel) -> Result<UserRecord, UserRepositoryError> {
        let role = UserRole::from_str(&model.role).ok_or_else(|| {
            UserRepositoryError::DatabaseError(format!("unknown role in users row: {}", model.role))
        })?;

        Ok(UserRecord {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            role,
            email_verified_at: model.email_verified_at.map(Into::into),
        })
    }

    fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
        let err_str = err.to_string().to_lowercase();
        err_str.contains("23505")
            || err_str.contains("duplicate key")
            || err_str.contains("unique constraint")
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    /// Inserts the account and its empty role profile in one transaction so
    /// a half-registered user can never be observed.
    async fn create_user_with_profile(
        &self,
        user: NewUser,
    ) -> Result<UserRecord, UserRepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        let user_id = Uuid::new_v4();
        let active_user = UserActiveModel {
            id: Set(user_id),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(user.role.as_str().to_string()),
            email_verified_at: Set(None),
            created_at: NotSet,
            updated_at: NotSet,
        };

        let inserted = active_user.insert(&txn).await.map_err(|e| {
            if Self::is_unique_violation(&e) {
                UserRepositoryError::UserAlreadyExists
            } else {
                UserRepositoryError::DatabaseError(e.to_string())
            }
        })?;

        match user.role {
            UserRole::Player => {
                let profile = PlayerProfileActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    ..Default::default()
                };
                profile
                    .insert(&txn)
                    .await
                    .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;
            }
            UserRole::Coach => {
                let profile = CoachProfileActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    ..Default::default()
                };
                profile
                    .insert(&txn)
                    .await
                    .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Self::map_to_record(inserted)
    }

    async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), UserRepositoryError> {
        let user = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(UserRepositoryError::UserNotFound)?;

        // Verification is idempotent; keep the first timestamp.
        if user.email_verified_at.is_some() {
            return Ok(());
        }

        let mut active_user: UserActiveModel = user.into();
        active_user.email_verified_at = Set(Some(chrono::Utc::now().into()));
        active_user
            .update(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        let user = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(UserRepositoryError::UserNotFound)?;

        let mut active_user: UserActiveModel = user.into();
        active_user.password_hash = Set(new_password_hash);
        active_user
            .update(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Profiles, tokens, posts and messages follow via ON DELETE CASCADE.
    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError> {
        let user = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(UserRepositoryError::UserNotFound)?;

        user.delete(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
