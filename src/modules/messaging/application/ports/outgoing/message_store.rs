use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::messaging::application::domain::conversation::Message;

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub conversation_id: Uuid,
    pub sender_user_id: Uuid,
    pub body: String,
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum MessageStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Messages of one conversation, oldest first.
    async fn list(&self, conversation_id: Uuid) -> Result<Vec<Message>, MessageStoreError>;

    /// Appends the message and touches the conversation's `updated_at`, in
    /// one transaction.
    async fn append(&self, message: NewMessage) -> Result<Message, MessageStoreError>;

    /// Number of conversations whose latest message exists, was sent by
    /// someone else, and postdates the caller's read marker.
    async fn unread_conversation_count(&self, user_id: Uuid) -> Result<u64, MessageStoreError>;
}
