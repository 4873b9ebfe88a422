use async_trait::async_trait;
use email_address::EmailAddress;
use std::sync::Arc;

use crate::modules::email::application::ports::outgoing::EmailSender;

#[derive(Debug, Clone)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    InvalidInput(String),

    /// No support inbox configured; distinguishable from delivery failure.
    #[error("Contact email is not configured")]
    NotConfigured,

    #[error("Email sending failed: {0}")]
    SendFailed(String),
}

#[async_trait]
pub trait ContactUseCase: Send + Sync {
    async fn execute(&self, input: ContactInput) -> Result<(), ContactError>;
}

/// Relays contact-form submissions to the support inbox. The visitor's
/// address goes into the body, not the envelope.
pub struct ContactService {
    sender: Arc<dyn EmailSender>,
    inbox: Option<String>,
}

impl ContactService {
    pub fn new(sender: Arc<dyn EmailSender>, inbox: Option<String>) -> Self {
        Self { sender, inbox }
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[async_trait]
impl ContactUseCase for ContactService {
    async fn execute(&self, input: ContactInput) -> Result<(), ContactError> {
        let name = input.name.trim();
        let email = input.email.trim();
        let subject = input.subject.trim();
        let message = input.message.trim();

        if name.is_empty() || subject.is_empty() || message.is_empty() {
            return Err(ContactError::InvalidInput(
                "Name, subject and message are required".to_string(),
            ));
        }
        if !EmailAddress::is_valid(email) {
            return Err(ContactError::InvalidInput(
                "Invalid email format".to_string(),
            ));
        }

        let inbox = self.inbox.as_deref().ok_or(ContactError::NotConfigured)?;

        let body = format!(
            "<h2>Contact form submission</h2>\
             <p><strong>From:</strong> {} &lt;{}&gt;</p>\
             <p><strong>Subject:</strong> {}</p>\
             <p>{}</p>",
            escape_html(name),
            escape_html(email),
            escape_html(subject),
            escape_html(message).replace('\n', "<br>")
        );

        self.sender
            .send_email(inbox, &format!("Contact form: {subject}"), &body)
            .await
            .map_err(ContactError::SendFailed)
    }
}
