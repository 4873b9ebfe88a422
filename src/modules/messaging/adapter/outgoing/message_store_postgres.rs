use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::messaging::application::domain::conversation::Message;
use crate::modules::messaging::application::ports::outgoing::{
    MessageStore, MessageStoreError, NewMessage,
};

use super::conversation_store_postgres::map_to_message;
use super::sea_orm_entity::{conversations, messages};

/// A conversation is unread when its latest message exists, was sent by
/// someone else, and postdates the caller's read marker.
const UNREAD_COUNT_SQL: &str = r#"
SELECT COUNT(*) AS unread
FROM conversation_participants cp
JOIN LATERAL (
    SELECT m.sender_user_id, m.created_at
    FROM messages m
    WHERE m.conversation_id = cp.conversation_id
    ORDER BY m.created_at DESC
    LIMIT 1
) last_message ON TRUE
WHERE cp.user_id = $1
  AND cp.is_blocked = FALSE
  AND last_message.sender_user_id <> $1
  AND (cp.last_read_at IS NULL OR last_message.created_at > cp.last_read_at)
"#;

#[derive(Clone)]
pub struct MessageStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl MessageStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: sea_orm::DbErr) -> MessageStoreError {
    MessageStoreError::DatabaseError(e.to_string())
}

#[async_trait]
impl MessageStore for MessageStorePostgres {
    async fn list(&self, conversation_id: Uuid) -> Result<Vec<Message>, MessageStoreError> {
        let models = messages::Entity::find()
            .filter(messages::Column::ConversationId.eq(conversation_id))
            .order_by_asc(messages::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(map_to_message).collect())
    }

    async fn append(&self, message: NewMessage) -> Result<Message, MessageStoreError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let inserted = messages::ActiveModel {
            id: Set(Uuid::new_v4()),
            conversation_id: Set(message.conversation_id),
            sender_user_id: Set(message.sender_user_id),
            body: Set(message.body),
            media_url: Set(message.media_url),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        // New activity bubbles the conversation to the top of the inbox.
        if let Some(conversation) = conversations::Entity::find_by_id(message.conversation_id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
        {
            let mut active: conversations::ActiveModel = conversation.into();
            active.updated_at = Set(Utc::now().into());
            active.update(&txn).await.map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(map_to_message(inserted))
    }

    async fn unread_conversation_count(&self, user_id: Uuid) -> Result<u64, MessageStoreError> {
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                DbBackend::Postgres,
                UNREAD_COUNT_SQL,
                [user_id.into()],
            ))
            .await
            .map_err(map_db_err)?;

        match row {
            Some(row) => {
                let count: i64 = row.try_get("", "unread").map_err(map_db_err)?;
                Ok(count.max(0) as u64)
            }
            None => Ok(0),
        }
    }
}
