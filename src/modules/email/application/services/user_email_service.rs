use std::fmt;
use std::sync::Arc;

use crate::modules::email::application::ports::outgoing::{
    EmailSender, UserEmailNotificationError, UserEmailNotifier,
};

/// Builds and sends account-lifecycle mail. `base_url` points at the
/// frontend, which forwards the token to the API.
#[derive(Clone)]
pub struct UserEmailService {
    sender: Arc<dyn EmailSender>,
    base_url: String,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl UserEmailService {
    pub fn new(sender: Arc<dyn EmailSender>, base_url: String) -> Self {
        Self {
            sender,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl UserEmailNotifier for UserEmailService {
    async fn send_verification_email(
        &self,
        to: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let link = format!("{}/verify-email?token={token}", self.base_url);
        let body = format!(
            "<h2>Welcome!</h2>\
             <p>Thanks for signing up. Click the link below to verify your email address:</p>\
             <p><a href=\"{link}\">Verify my email</a></p>\
             <p>The link is valid for 24 hours. If you did not create an account, you can ignore this email.</p>"
        );

        self.sender
            .send_email(to, "Verify your email address", &body)
            .await
            .map_err(UserEmailNotificationError::SendFailed)
    }

    async fn send_password_reset_email(
        &self,
        to: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let link = format!("{}/reset-password?token={token}", self.base_url);
        let body = format!(
            "<h2>Password reset</h2>\
             <p>We received a request to reset the password for your account. Click the link below to choose a new one:</p>\
             <p><a href=\"{link}\">Reset my password</a></p>\
             <p>The link is valid for 1 hour. If you did not request a reset, you can ignore this email.</p>"
        );

        self.sender
            .send_email(to, "Reset your password", &body)
            .await
            .map_err(UserEmailNotificationError::SendFailed)
    }
}
