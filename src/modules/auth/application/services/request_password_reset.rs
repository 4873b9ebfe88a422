use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, warn};

use crate::modules::auth::application::ports::outgoing::{
    AuthTokenRepository, TokenPurpose, UserQuery,
};
use crate::modules::auth::application::services::opaque_token::OpaqueToken;
use crate::modules::email::application::ports::outgoing::user_email_notifier::UserEmailNotifier;

/// Reset tokens live for one hour.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

#[derive(Debug, Clone, thiserror::Error)]
pub enum RequestPasswordResetError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Anti-enumeration: the outcome is identical whether or not the email maps
/// to an account. Only infrastructure failures surface (as a 500), never
/// "no such user".
#[async_trait]
pub trait RequestPasswordResetUseCase: Send + Sync {
    async fn execute(&self, email: &str) -> Result<(), RequestPasswordResetError>;
}

pub struct RequestPasswordResetService<Q, T>
where
    Q: UserQuery,
    T: AuthTokenRepository,
{
    user_query: Q,
    token_repository: T,
    email_notifier: Arc<dyn UserEmailNotifier>,
}

impl<Q, T> RequestPasswordResetService<Q, T>
where
    Q: UserQuery,
    T: AuthTokenRepository,
{
    pub fn new(user_query: Q, token_repository: T, email_notifier: Arc<dyn UserEmailNotifier>) -> Self {
        Self {
            user_query,
            token_repository,
            email_notifier,
        }
    }
}

#[async_trait]
impl<Q, T> RequestPasswordResetUseCase for RequestPasswordResetService<Q, T>
where
    Q: UserQuery,
    T: AuthTokenRepository,
{
    async fn execute(&self, email: &str) -> Result<(), RequestPasswordResetError> {
        let email = email.trim().to_lowercase();

        let user = match self
            .user_query
            .find_by_email(&email)
            .await
            .map_err(|e| RequestPasswordResetError::DatabaseError(e.to_string()))?
        {
            Some(user) => user,
            // Same success path as the happy case.
            None => return Ok(()),
        };

        let token = OpaqueToken::generate();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

        self.token_repository
            .replace(user.id, TokenPurpose::PasswordReset, token.digest, expires_at)
            .await
            .map_err(|e| RequestPasswordResetError::DatabaseError(e.to_string()))?;

        // Delivery failure must not change the response; it is logged for
        // operators and the generic message goes back either way.
        if let Err(e) = self
            .email_notifier
            .send_password_reset_email(&user.email, &token.plaintext)
            .await
        {
            error!(user_id = %user.id, error = %e, "Failed to send password reset email");
        } else {
            warn!(user_id = %user.id, "Password reset email dispatched");
        }

        Ok(())
    }
}
