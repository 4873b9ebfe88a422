use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserRole;

/// Claims carried by the signed session token. The token is the entire
/// session: there is no server-side session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub role: UserRole,
    pub is_verified: bool,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub token_type: String,
}

pub trait SessionTokenProvider: Send + Sync {
    fn issue_session_token(
        &self,
        user_id: Uuid,
        role: UserRole,
        is_verified: bool,
    ) -> Result<String, TokenError>;

    fn verify_session_token(&self, token: &str) -> Result<SessionClaims, TokenError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token type, expected '{0}'")]
    InvalidTokenType(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
