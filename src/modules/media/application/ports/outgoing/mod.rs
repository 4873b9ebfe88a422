pub mod media_repository;
pub mod media_storage;

pub use media_repository::{MediaRepository, MediaRepositoryError};
pub use media_storage::{MediaStorage, MediaStorageError};
