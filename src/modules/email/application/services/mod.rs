pub mod contact;
pub mod user_email_service;

pub use contact::{ContactError, ContactInput, ContactService, ContactUseCase};
pub use user_email_service::UserEmailService;
