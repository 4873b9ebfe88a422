use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Opaque one-shot capabilities. Tokens are stored as SHA-256 digests; the
/// plaintext leaves the process only inside the email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    VerifyEmail,
    PasswordReset,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::VerifyEmail => "verify_email",
            TokenPurpose::PasswordReset => "password_reset",
        }
    }
}

#[async_trait]
pub trait AuthTokenRepository: Send + Sync {
    /// Store a new token for (user, purpose), replacing any previous one:
    /// a single active token per purpose per user.
    async fn replace(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
        token_digest: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AuthTokenError>;

    /// Single-use redemption: the matching row is deleted whether it was
    /// still valid (returns the user id) or already expired (returns
    /// `Expired` after the defensive delete).
    async fn consume(
        &self,
        token_digest: &str,
        purpose: TokenPurpose,
    ) -> Result<Uuid, AuthTokenError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthTokenError {
    #[error("Token not found")]
    NotFound,

    #[error("Token expired")]
    Expired,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
