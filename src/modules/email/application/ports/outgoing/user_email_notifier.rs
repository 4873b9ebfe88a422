#[derive(Debug, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Email sending failed: {0}")]
    SendFailed(String),
}

/// Account-lifecycle mail. Implementations build the links; callers only
/// hand over the recipient and the opaque token.
#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    async fn send_verification_email(
        &self,
        to: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError>;

    async fn send_password_reset_email(
        &self,
        to: &str,
        token: &str,
    ) -> Result<(), UserEmailNotificationError>;
}
