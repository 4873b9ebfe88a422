use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::{AuthTokenRepository, TokenPurpose};
use crate::modules::auth::application::services::opaque_token::OpaqueToken;
use crate::modules::auth::application::services::signup::{
    SignupError, SignupInput, SignupOutput, SignupUseCase,
};
use crate::modules::email::application::ports::outgoing::user_email_notifier::UserEmailNotifier;

/// Verification links stay valid for a day.
const VERIFY_TOKEN_TTL_HOURS: i64 = 24;

const EMAIL_SEND_ATTEMPTS: u32 = 3;
const EMAIL_RETRY_BASE_MS: u64 = 500;

#[async_trait]
pub trait SignupFlowUseCase: Send + Sync {
    async fn execute(&self, input: SignupInput) -> Result<SignupOutput, SignupError>;
}

/// Wraps account creation with verification-email dispatch. The account
/// insert is the only step that can fail the request; token issuance and
/// delivery run after commit and only ever log.
pub struct SignupOrchestrator {
    signup: Arc<dyn SignupUseCase>,
    token_repository: Arc<dyn AuthTokenRepository>,
    email_notifier: Arc<dyn UserEmailNotifier>,
}

impl SignupOrchestrator {
    pub fn new(
        signup: Arc<dyn SignupUseCase>,
        token_repository: Arc<dyn AuthTokenRepository>,
        email_notifier: Arc<dyn UserEmailNotifier>,
    ) -> Self {
        Self {
            signup,
            token_repository,
            email_notifier,
        }
    }

    async fn issue_verification_token(&self, user_id: Uuid) -> Option<String> {
        let token = OpaqueToken::generate();
        let expires_at = Utc::now() + Duration::hours(VERIFY_TOKEN_TTL_HOURS);

        match self
            .token_repository
            .replace(user_id, TokenPurpose::VerifyEmail, token.digest, expires_at)
            .await
        {
            Ok(()) => Some(token.plaintext),
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Failed to store verification token");
                None
            }
        }
    }

    fn dispatch_verification_email(&self, user_id: Uuid, email: String, token: String) {
        let notifier = self.email_notifier.clone();

        tokio::spawn(async move {
            for attempt in 1..=EMAIL_SEND_ATTEMPTS {
                match notifier.send_verification_email(&email, &token).await {
                    Ok(()) => {
                        info!(user_id = %user_id, attempt, "Verification email sent");
                        return;
                    }
                    Err(e) if attempt < EMAIL_SEND_ATTEMPTS => {
                        let backoff = EMAIL_RETRY_BASE_MS * 2u64.pow(attempt - 1);
                        warn!(
                            user_id = %user_id,
                            attempt,
                            error = %e,
                            "Verification email failed, retrying in {backoff}ms"
                        );
                        tokio::time::sleep(StdDuration::from_millis(backoff)).await;
                    }
                    Err(e) => {
                        error!(
                            user_id = %user_id,
                            error = %e,
                            "Giving up on verification email after {EMAIL_SEND_ATTEMPTS} attempts"
                        );
                    }
                }
            }
        });
    }
}

#[async_trait]
impl SignupFlowUseCase for SignupOrchestrator {
    async fn execute(&self, input: SignupInput) -> Result<SignupOutput, SignupError> {
        let created = self.signup.execute(input).await?;

        if let Some(token) = self.issue_verification_token(created.user_id).await {
            self.dispatch_verification_email(created.user_id, created.email.clone(), token);
        }

        Ok(created)
    }
}
