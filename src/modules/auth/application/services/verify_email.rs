use async_trait::async_trait;

use crate::modules::auth::application::ports::outgoing::{
    AuthTokenError, AuthTokenRepository, TokenPurpose, UserRepository, UserRepositoryError,
};
use crate::modules::auth::application::services::opaque_token::OpaqueToken;

#[derive(Debug, Clone, thiserror::Error)]
pub enum VerifyEmailError {
    /// Absent and expired tokens are indistinguishable to the caller.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait VerifyEmailUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<(), VerifyEmailError>;
}

pub struct VerifyEmailService<R, T>
where
    R: UserRepository,
    T: AuthTokenRepository,
{
    user_repository: R,
    token_repository: T,
}

impl<R, T> VerifyEmailService<R, T>
where
    R: UserRepository,
    T: AuthTokenRepository,
{
    pub fn new(user_repository: R, token_repository: T) -> Self {
        Self {
            user_repository,
            token_repository,
        }
    }
}

#[async_trait]
impl<R, T> VerifyEmailUseCase for VerifyEmailService<R, T>
where
    R: UserRepository,
    T: AuthTokenRepository,
{
    async fn execute(&self, token: &str) -> Result<(), VerifyEmailError> {
        let digest = OpaqueToken::digest_of(token.trim());

        let user_id = self
            .token_repository
            .consume(&digest, TokenPurpose::VerifyEmail)
            .await
            .map_err(|e| match e {
                AuthTokenError::NotFound | AuthTokenError::Expired => VerifyEmailError::InvalidToken,
                AuthTokenError::DatabaseError(msg) => VerifyEmailError::DatabaseError(msg),
            })?;

        self.user_repository
            .mark_email_verified(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => VerifyEmailError::UserNotFound,
                other => VerifyEmailError::DatabaseError(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use mockall::{mock, predicate::*};
    use uuid::Uuid;

    use crate::modules::auth::application::domain::entities::UserRecord;
    use crate::modules::auth::application::ports::outgoing::NewUser;

    mock! {
        pub UserRepo {}
        #[async_trait]
        impl UserRepository for UserRepo {
            async fn create_user_with_profile(
                &self,
                user: NewUser,
            ) -> Result<UserRecord, UserRepositoryError>;
            async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), UserRepositoryError>;
            async fn update_password(
                &self,
                user_id: Uuid,
                new_password_hash: String,
            ) -> Result<(), UserRepositoryError>;
            async fn delete_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError>;
        }
    }

    mock! {
        pub TokenRepo {}
        #[async_trait]
        impl AuthTokenRepository for TokenRepo {
            async fn replace(
                &self,
                user_id: Uuid,
                purpose: TokenPurpose,
                token_digest: String,
                expires_at: DateTime<Utc>,
            ) -> Result<(), AuthTokenError>;
            async fn consume(
                &self,
                token_digest: &str,
                purpose: TokenPurpose,
            ) -> Result<Uuid, AuthTokenError>;
        }
    }

    #[tokio::test]
    async fn marks_user_verified_on_valid_token() {
        let user_id = Uuid::new_v4();

        let mut tokens = MockTokenRepo::new();
        tokens
            .expect_consume()
            .withf(|_, purpose| *purpose == TokenPurpose::VerifyEmail)
            .times(1)
            .returning(move |_, _| Ok(user_id));

        let mut users = MockUserRepo::new();
        users
            .expect_mark_email_verified()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(()));

        let service = VerifyEmailService::new(users, tokens);
        assert!(service.execute("some-token").await.is_ok());
    }

    #[tokio::test]
    async fn absent_and_expired_tokens_are_indistinguishable() {
        for err in [AuthTokenError::NotFound, AuthTokenError::Expired] {
            let mut tokens = MockTokenRepo::new();
            let err_clone = err.clone();
            tokens
                .expect_consume()
                .returning(move |_, _| Err(err_clone.clone()));

            let service = VerifyEmailService::new(MockUserRepo::new(), tokens);
            let result = service.execute("whatever").await;

            assert!(
                matches!(result, Err(VerifyEmailError::InvalidToken)),
                "expected InvalidToken for {err:?}, got {result:?}"
            );
        }
    }
}
