pub mod gcs_media_storage;
pub mod media_repository_postgres;
pub mod sea_orm_entity;

pub use gcs_media_storage::GcsMediaStorage;
pub use media_repository_postgres::MediaRepositoryPostgres;
