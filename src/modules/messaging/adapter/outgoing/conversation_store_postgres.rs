use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::adapter::outgoing::sea_orm_entity::users;
use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::directory::adapter::outgoing::sea_orm_entity::{
    coach_profiles, player_profiles,
};
use crate::modules::messaging::application::domain::conversation::{
    pair_key, Conversation, ConversationSummary, Counterpart, Message, Participation,
};
use crate::modules::messaging::application::ports::outgoing::{
    ConversationStore, ConversationStoreError,
};

use super::sea_orm_entity::{conversation_participants, conversations, messages};

#[derive(Clone)]
pub struct ConversationStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl ConversationStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
        let err_str = err.to_string().to_lowercase();
        err_str.contains("23505")
            || err_str.contains("duplicate key")
            || err_str.contains("unique constraint")
    }

    fn is_fk_violation(err: &sea_orm::DbErr) -> bool {
        let err_str = err.to_string().to_lowercase();
        err_str.contains("23503") || err_str.contains("foreign key")
    }

    async fn find_by_pair_key(
        &self,
        key: &str,
    ) -> Result<Option<conversations::Model>, ConversationStoreError> {
        conversations::Entity::find()
            .filter(conversations::Column::PairKey.eq(key))
            .one(&*self.db)
            .await
            .map_err(map_db_err)
    }

    async fn insert_pair(
        &self,
        key: &str,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<conversations::Model, sea_orm::DbErr> {
        let txn = self.db.begin().await?;

        let conversation = conversations::ActiveModel {
            id: Set(Uuid::new_v4()),
            pair_key: Set(key.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for user_id in [user_a, user_b] {
            conversation_participants::ActiveModel {
                id: Set(Uuid::new_v4()),
                conversation_id: Set(conversation.id),
                user_id: Set(user_id),
                is_blocked: Set(false),
                last_read_at: Set(None),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(conversation)
    }

    async fn counterpart_for(
        &self,
        conversation_id: Uuid,
        caller: Uuid,
    ) -> Result<Option<Counterpart>, ConversationStoreError> {
        let other = conversation_participants::Entity::find()
            .filter(conversation_participants::Column::ConversationId.eq(conversation_id))
            .filter(conversation_participants::Column::UserId.ne(caller))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        let Some(other) = other else {
            return Ok(None);
        };

        let user = users::Entity::find_by_id(other.user_id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        let Some(user) = user else {
            return Ok(None);
        };

        let counterpart = match UserRole::from_str(&user.role) {
            Some(UserRole::Player) => {
                let profile = player_profiles::Entity::find()
                    .filter(player_profiles::Column::UserId.eq(user.id))
                    .one(&*self.db)
                    .await
                    .map_err(map_db_err)?;
                Counterpart {
                    user_id: user.id,
                    role: UserRole::Player.as_str().to_string(),
                    first_name: profile.as_ref().and_then(|p| p.first_name.clone()),
                    last_name: profile.as_ref().and_then(|p| p.last_name.clone()),
                    photo_url: profile.and_then(|p| p.photo_url),
                }
            }
            Some(UserRole::Coach) => {
                let profile = coach_profiles::Entity::find()
                    .filter(coach_profiles::Column::UserId.eq(user.id))
                    .one(&*self.db)
                    .await
                    .map_err(map_db_err)?;
                Counterpart {
                    user_id: user.id,
                    role: UserRole::Coach.as_str().to_string(),
                    first_name: profile.as_ref().and_then(|p| p.first_name.clone()),
                    last_name: profile.as_ref().and_then(|p| p.last_name.clone()),
                    photo_url: profile.and_then(|p| p.photo_url),
                }
            }
            None => {
                return Err(ConversationStoreError::DatabaseError(format!(
                    "unknown role in users row: {}",
                    user.role
                )))
            }
        };

        Ok(Some(counterpart))
    }

    async fn last_message_of(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Message>, ConversationStoreError> {
        Ok(messages::Entity::find()
            .filter(messages::Column::ConversationId.eq(conversation_id))
            .order_by_desc(messages::Column::CreatedAt)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(map_to_message))
    }
}

fn map_db_err(e: sea_orm::DbErr) -> ConversationStoreError {
    ConversationStoreError::DatabaseError(e.to_string())
}

fn map_to_conversation(model: conversations::Model) -> Conversation {
    Conversation {
        id: model.id,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

pub(crate) fn map_to_message(model: messages::Model) -> Message {
    Message {
        id: model.id,
        conversation_id: model.conversation_id,
        sender_user_id: model.sender_user_id,
        body: model.body,
        media_url: model.media_url,
        created_at: model.created_at.into(),
    }
}

#[async_trait]
impl ConversationStore for ConversationStorePostgres {
    async fn get_or_create(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Conversation, ConversationStoreError> {
        let key = pair_key(user_a, user_b);

        if let Some(existing) = self.find_by_pair_key(&key).await? {
            return Ok(map_to_conversation(existing));
        }

        match self.insert_pair(&key, user_a, user_b).await {
            Ok(created) => Ok(map_to_conversation(created)),
            // Lost the race on pair_key: the winner's row is the answer.
            Err(e) if Self::is_unique_violation(&e) => self
                .find_by_pair_key(&key)
                .await?
                .map(map_to_conversation)
                .ok_or_else(|| ConversationStoreError::DatabaseError(e.to_string())),
            Err(e) if Self::is_fk_violation(&e) => Err(ConversationStoreError::UserNotFound),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, ConversationStoreError> {
        let participations = conversation_participants::Entity::find()
            .filter(conversation_participants::Column::UserId.eq(user_id))
            .filter(conversation_participants::Column::IsBlocked.eq(false))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let conversation_ids: Vec<Uuid> =
            participations.iter().map(|p| p.conversation_id).collect();
        if conversation_ids.is_empty() {
            return Ok(vec![]);
        }

        let conversation_models = conversations::Entity::find()
            .filter(conversations::Column::Id.is_in(conversation_ids))
            .order_by_desc(conversations::Column::UpdatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        let mut summaries = Vec::with_capacity(conversation_models.len());
        for model in conversation_models {
            // Orphaned rows (counterpart mid-deletion) are skipped rather
            // than failing the whole inbox.
            let Some(counterpart) = self.counterpart_for(model.id, user_id).await? else {
                continue;
            };
            let last_message = self.last_message_of(model.id).await?;
            summaries.push(ConversationSummary {
                id: model.id,
                counterpart,
                last_message,
                updated_at: model.updated_at.into(),
            });
        }

        Ok(summaries)
    }

    async fn find_participation(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Participation>, ConversationStoreError> {
        Ok(conversation_participants::Entity::find()
            .filter(conversation_participants::Column::ConversationId.eq(conversation_id))
            .filter(conversation_participants::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(|model| Participation {
                conversation_id: model.conversation_id,
                user_id: model.user_id,
                is_blocked: model.is_blocked,
                last_read_at: model.last_read_at.map(Into::into),
            }))
    }

    async fn mark_read(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), ConversationStoreError> {
        let model = conversation_participants::Entity::find()
            .filter(conversation_participants::Column::ConversationId.eq(conversation_id))
            .filter(conversation_participants::Column::UserId.eq(user_id))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        let Some(model) = model else {
            return Ok(());
        };

        // Monotonic: never move the marker backwards.
        if let Some(current) = model.last_read_at {
            if current.with_timezone(&Utc) >= at {
                return Ok(());
            }
        }

        let mut active: conversation_participants::ActiveModel = model.into();
        active.last_read_at = Set(Some(at.into()));
        active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(())
    }
}
