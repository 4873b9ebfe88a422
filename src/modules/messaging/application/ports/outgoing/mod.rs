pub mod conversation_store;
pub mod message_store;

pub use conversation_store::{ConversationStore, ConversationStoreError};
pub use message_store::{MessageStore, MessageStoreError, NewMessage};
