use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::{UserRecord, UserRole};
use crate::modules::auth::application::ports::outgoing::{UserQuery, UserQueryError};

use super::sea_orm_entity::users::{Column as UserColumn, Entity as UserEntity, Model as UserModel};

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_record(model: UserModel) -> Result<UserRecord, UserQueryError> {
        let role = UserRole::from_str(&model.role).ok_or_else(|| {
            UserQueryError::DatabaseError(format!("unknown role in users row: {}", model.role))
        })?;

        Ok(UserRecord {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            role,
            email_verified_at: model.email_verified_at.map(Into::into),
        })
    }
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserQueryError> {
        UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?
            .map(Self::map_to_record)
            .transpose()
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRecord>, UserQueryError> {
        UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| UserQueryError::DatabaseError(e.to_string()))?
            .map(Self::map_to_record)
            .transpose()
    }
}
