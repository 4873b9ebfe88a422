pub mod conversation_store_postgres;
pub mod message_store_postgres;
pub mod sea_orm_entity;

pub use conversation_store_postgres::ConversationStorePostgres;
pub use message_store_postgres::MessageStorePostgres;
