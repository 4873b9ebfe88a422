use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::auth::application::ports::outgoing::{
    PasswordHasher, SessionTokenProvider, UserQuery,
};

#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginUserInfo {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub is_verified: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginOutput {
    pub session_token: String,
    pub user: LoginUserInfo,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    /// Deliberately covers both unknown email and wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait LoginUseCase: Send + Sync {
    async fn execute(&self, input: LoginInput) -> Result<LoginOutput, LoginError>;
}

pub struct LoginService<Q>
where
    Q: UserQuery,
{
    user_query: Q,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn SessionTokenProvider>,
}

impl<Q> LoginService<Q>
where
    Q: UserQuery,
{
    pub fn new(
        user_query: Q,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn SessionTokenProvider>,
    ) -> Self {
        Self {
            user_query,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q> LoginUseCase for LoginService<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, input: LoginInput) -> Result<LoginOutput, LoginError> {
        let email = input.email.trim().to_lowercase();

        let user = self
            .user_query
            .find_by_email(&email)
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?
            .ok_or(LoginError::InvalidCredentials)?;

        let password_ok = self
            .password_hasher
            .verify_password(&input.password, &user.password_hash)
            .await
            .map_err(|e| LoginError::VerificationFailed(e.to_string()))?;

        if !password_ok {
            return Err(LoginError::InvalidCredentials);
        }

        let is_verified = user.is_verified();
        let session_token = self
            .token_provider
            .issue_session_token(user.id, user.role, is_verified)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        Ok(LoginOutput {
            session_token,
            user: LoginUserInfo {
                id: user.id,
                email: user.email,
                role: user.role,
                is_verified,
            },
        })
    }
}
