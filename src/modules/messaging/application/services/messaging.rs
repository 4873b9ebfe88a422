use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::modules::messaging::application::domain::conversation::{
    Conversation, ConversationSummary, Message,
};
use crate::modules::messaging::application::ports::outgoing::{
    ConversationStore, ConversationStoreError, MessageStore, NewMessage,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum MessagingError {
    #[error("Cannot open a conversation with yourself")]
    SelfConversation,

    #[error("User not found")]
    UserNotFound,

    /// Caller is not a participant, or their participation is blocked. The
    /// two are indistinguishable on purpose.
    #[error("Access denied")]
    AccessDenied,

    #[error("Message body must not be empty")]
    EmptyBody,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait MessagingUseCase: Send + Sync {
    async fn open_conversation(
        &self,
        caller: Uuid,
        other: Uuid,
    ) -> Result<Conversation, MessagingError>;

    async fn list_conversations(
        &self,
        caller: Uuid,
    ) -> Result<Vec<ConversationSummary>, MessagingError>;

    /// Reading a conversation also advances the caller's read marker.
    async fn list_messages(
        &self,
        caller: Uuid,
        conversation_id: Uuid,
    ) -> Result<Vec<Message>, MessagingError>;

    async fn send_message(
        &self,
        caller: Uuid,
        conversation_id: Uuid,
        body: String,
        media_url: Option<String>,
    ) -> Result<Message, MessagingError>;

    async fn unread_count(&self, caller: Uuid) -> Result<u64, MessagingError>;
}

pub struct MessagingService<C, M>
where
    C: ConversationStore,
    M: MessageStore,
{
    conversations: C,
    messages: M,
}

impl<C, M> MessagingService<C, M>
where
    C: ConversationStore,
    M: MessageStore,
{
    pub fn new(conversations: C, messages: M) -> Self {
        Self {
            conversations,
            messages,
        }
    }

    async fn require_active_participation(
        &self,
        caller: Uuid,
        conversation_id: Uuid,
    ) -> Result<(), MessagingError> {
        let participation = self
            .conversations
            .find_participation(conversation_id, caller)
            .await
            .map_err(map_store_error)?;

        match participation {
            Some(p) if !p.is_blocked => Ok(()),
            _ => Err(MessagingError::AccessDenied),
        }
    }
}

fn map_store_error(e: ConversationStoreError) -> MessagingError {
    match e {
        ConversationStoreError::UserNotFound => MessagingError::UserNotFound,
        ConversationStoreError::DatabaseError(msg) => MessagingError::DatabaseError(msg),
    }
}

#[async_trait]
impl<C, M> MessagingUseCase for MessagingService<C, M>
where
    C: ConversationStore,
    M: MessageStore,
{
    async fn open_conversation(
        &self,
        caller: Uuid,
        other: Uuid,
    ) -> Result<Conversation, MessagingError> {
        if caller == other {
            return Err(MessagingError::SelfConversation);
        }

        self.conversations
            .get_or_create(caller, other)
            .await
            .map_err(map_store_error)
    }

    async fn list_conversations(
        &self,
        caller: Uuid,
    ) -> Result<Vec<ConversationSummary>, MessagingError> {
        self.conversations
            .list_for_user(caller)
            .await
            .map_err(map_store_error)
    }

    async fn list_messages(
        &self,
        caller: Uuid,
        conversation_id: Uuid,
    ) -> Result<Vec<Message>, MessagingError> {
        self.require_active_participation(caller, conversation_id)
            .await?;

        let messages = self
            .messages
            .list(conversation_id)
            .await
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))?;

        // Reading marks the conversation read; a failure here must not cost
        // the caller the messages they just fetched.
        if let Err(e) = self
            .conversations
            .mark_read(conversation_id, caller, Utc::now())
            .await
        {
            warn!(conversation_id = %conversation_id, error = %e, "Failed to advance read marker");
        }

        Ok(messages)
    }

    async fn send_message(
        &self,
        caller: Uuid,
        conversation_id: Uuid,
        body: String,
        media_url: Option<String>,
    ) -> Result<Message, MessagingError> {
        if body.trim().is_empty() {
            return Err(MessagingError::EmptyBody);
        }

        self.require_active_participation(caller, conversation_id)
            .await?;

        self.messages
            .append(NewMessage {
                conversation_id,
                sender_user_id: caller,
                body,
                media_url,
            })
            .await
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))
    }

    async fn unread_count(&self, caller: Uuid) -> Result<u64, MessagingError> {
        self.messages
            .unread_conversation_count(caller)
            .await
            .map_err(|e| MessagingError::DatabaseError(e.to_string()))
    }
}
