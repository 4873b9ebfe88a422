use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::modules::messaging::application::domain::conversation::{
    Conversation, ConversationSummary, Participation,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversationStoreError {
    /// The other user id does not exist (FK violation on insert).
    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Find or create the conversation for this pair. Creation inserts the
    /// conversation and both participant rows in one transaction; a
    /// `pair_key` unique violation means another request won the race, and
    /// the existing row is returned instead.
    async fn get_or_create(
        &self,
        user_a: Uuid,
        user_b: Uuid,
    ) -> Result<Conversation, ConversationStoreError>;

    /// Inbox rows for a non-blocked participant, most recently active
    /// first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, ConversationStoreError>;

    async fn find_participation(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Participation>, ConversationStoreError>;

    /// Advance the caller's read marker. Never moves it backwards.
    async fn mark_read(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), ConversationStoreError>;
}
