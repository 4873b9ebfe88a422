use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error)]
pub enum MediaStorageError {
    #[error("Access to the storage bucket was denied")]
    AccessDenied,

    #[error("Storage bucket not found")]
    BucketNotFound,

    #[error("Storage client misconfigured")]
    Configuration,

    #[error("Storage infrastructure error")]
    Infrastructure,
}

#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Writes the object and returns its public URL.
    async fn upload(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MediaStorageError>;
}
