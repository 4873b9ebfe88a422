use async_trait::async_trait;

/// Salted password hashing. Implementations must never log or echo the
/// plaintext.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, PasswordHashError>;

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PasswordHashError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PasswordHashError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Verification failed: {0}")]
    VerificationFailed(String),
}
