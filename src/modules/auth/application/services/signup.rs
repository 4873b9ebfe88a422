use async_trait::async_trait;
use email_address::EmailAddress;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::auth::application::ports::outgoing::{
    NewUser, PasswordHasher, UserRepository, UserRepositoryError,
};

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Clone)]
pub struct SignupOutput {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SignupError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    #[error("User already exists")]
    EmailTaken,

    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait SignupUseCase: Send + Sync {
    async fn execute(&self, input: SignupInput) -> Result<SignupOutput, SignupError>;
}

/// Creates the account: validates input, hashes the password, and inserts the
/// user together with its role profile in one transaction.
pub struct SignupService<R>
where
    R: UserRepository,
{
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<R> SignupService<R>
where
    R: UserRepository,
{
    pub fn new(repository: R, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<R> SignupUseCase for SignupService<R>
where
    R: UserRepository,
{
    async fn execute(&self, input: SignupInput) -> Result<SignupOutput, SignupError> {
        let email = input.email.trim().to_lowercase();
        if !EmailAddress::is_valid(&email) {
            return Err(SignupError::InvalidEmail);
        }

        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(SignupError::PasswordTooShort);
        }

        let password_hash = self
            .password_hasher
            .hash_password(&input.password)
            .await
            .map_err(|e| SignupError::HashingFailed(e.to_string()))?;

        let created = self
            .repository
            .create_user_with_profile(NewUser {
                email,
                password_hash,
                role: input.role,
            })
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => SignupError::EmailTaken,
                other => SignupError::RepositoryError(other.to_string()),
            })?;

        Ok(SignupOutput {
            user_id: created.id,
            email: created.email,
            role: created.role,
        })
    }
}
