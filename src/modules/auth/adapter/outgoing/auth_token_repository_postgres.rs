use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
    TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::{
    AuthTokenError, AuthTokenRepository, TokenPurpose,
};

use super::sea_orm_entity::auth_tokens::{
    ActiveModel as TokenActiveModel, Column as TokenColumn, Entity as TokenEntity,
};

#[derive(Clone, Debug)]
pub struct AuthTokenRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AuthTokenRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthTokenRepository for AuthTokenRepositoryPostgres {
    async fn replace(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
        token_digest: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthTokenError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AuthTokenError::DatabaseError(e.to_string()))?;

        // One live token per (user, purpose); re-requesting invalidates the
        // previous link.
        TokenEntity::delete_many()
            .filter(TokenColumn::UserId.eq(user_id))
            .filter(TokenColumn::Purpose.eq(purpose.as_str()))
            .exec(&txn)
            .await
            .map_err(|e| AuthTokenError::DatabaseError(e.to_string()))?;

        let token = TokenActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            purpose: Set(purpose.as_str().to_string()),
            token_digest: Set(token_digest),
            expires_at: Set(expires_at.into()),
            created_at: NotSet,
        };
        token
            .insert(&txn)
            .await
            .map_err(|e| AuthTokenError::DatabaseError(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AuthTokenError::DatabaseError(e.to_string()))
    }

    async fn consume(
        &self,
        token_digest: &str,
        purpose: TokenPurpose,
    ) -> Result<Uuid, AuthTokenError> {
        let token = TokenEntity::find()
            .filter(TokenColumn::TokenDigest.eq(token_digest))
            .filter(TokenColumn::Purpose.eq(purpose.as_str()))
            .one(&*self.db)
            .await
            .map_err(|e| AuthTokenError::DatabaseError(e.to_string()))?
            .ok_or(AuthTokenError::NotFound)?;

        let user_id = token.user_id;
        let expired = token.expires_at.with_timezone(&Utc) < Utc::now();

        // Single use either way: a presented token is burned even when it
        // turns out to be expired.
        token
            .delete(&*self.db)
            .await
            .map_err(|e| AuthTokenError::DatabaseError(e.to_string()))?;

        if expired {
            return Err(AuthTokenError::Expired);
        }

        Ok(user_id)
    }
}
