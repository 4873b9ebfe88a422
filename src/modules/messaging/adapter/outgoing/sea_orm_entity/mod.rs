pub mod conversation_participants;
pub mod conversations;
pub mod messages;
