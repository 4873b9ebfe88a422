use async_trait::async_trait;

/// Outbound mail transport. Carries verification, password-reset and
/// contact-form messages; bodies are HTML.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String>;
}
