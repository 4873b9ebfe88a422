use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::auth::application::ports::outgoing::{
    AuthTokenError, AuthTokenRepository, PasswordHasher, TokenPurpose, UserRepository,
    UserRepositoryError,
};
use crate::modules::auth::application::services::opaque_token::OpaqueToken;
use crate::modules::auth::application::services::signup::MIN_PASSWORD_LEN;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,

    #[error("Hashing failed: {0}")]
    HashingFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait ResetPasswordUseCase: Send + Sync {
    async fn execute(&self, token: &str, new_password: &str) -> Result<(), ResetPasswordError>;
}

pub struct ResetPasswordService<R, T>
where
    R: UserRepository,
    T: AuthTokenRepository,
{
    user_repository: R,
    token_repository: T,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<R, T> ResetPasswordService<R, T>
where
    R: UserRepository,
    T: AuthTokenRepository,
{
    pub fn new(user_repository: R, token_repository: T, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            user_repository,
            token_repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<R, T> ResetPasswordUseCase for ResetPasswordService<R, T>
where
    R: UserRepository,
    T: AuthTokenRepository,
{
    async fn execute(&self, token: &str, new_password: &str) -> Result<(), ResetPasswordError> {
        // Validate the password before consuming the single-use token, so a
        // typo does not burn the reset link.
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(ResetPasswordError::PasswordTooShort);
        }

        let digest = OpaqueToken::digest_of(token.trim());
        let user_id = self
            .token_repository
            .consume(&digest, TokenPurpose::PasswordReset)
            .await
            .map_err(|e| match e {
                AuthTokenError::NotFound | AuthTokenError::Expired => {
                    ResetPasswordError::InvalidToken
                }
                AuthTokenError::DatabaseError(msg) => ResetPasswordError::DatabaseError(msg),
            })?;

        let password_hash = self
            .password_hasher
            .hash_password(new_password)
            .await
            .map_err(|e| ResetPasswordError::HashingFailed(e.to_string()))?;

        self.user_repository
            .update_password(user_id, password_hash)
            .await
            .map_err(|e| match e {
                // The account disappearing between consume and update reads
                // the same as a stale token from the outside.
                UserRepositoryError::UserNotFound => ResetPasswordError::InvalidToken,
                other => ResetPasswordError::DatabaseError(other.to_string()),
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
    use crate::modules::auth::application::ports::outgoing::{NewUser, PasswordHashError};

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

    struct FakeHasher;

    #[async_trait]
    impl PasswordHasher for FakeHasher {
        async fn hash_password(&self, password: &str) -> Result<String, PasswordHashError> {
            Ok(format!("hashed:{password}"))
        }

        async fn verify_password(
            &self,
            password: &str,
            password_hash: &str,
        ) -> Result<bool, PasswordHashError> {
            Ok(password_hash == format!("hashed:{password}"))
        }
    }

    #[tokio::test]
    async fn updates_password_for_valid_token() {
        let user_id = Uuid::new_v4();

        let mut tokens = MockTokenRepo::new();
        tokens
            .expect_consume()
            .withf(|_, purpose| *purpose == TokenPurpose::PasswordReset)
            .times(1)
            .returning(move |_, _| Ok(user_id));

        let mut users = MockUserRepo::new();
        users
            .expect_update_password()
            .with(eq(user_id), eq("hashed:brand-new-pass".to_string()))
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ResetPasswordService::new(users, tokens, Arc::new(FakeHasher));
        assert!(service.execute("the-token", "brand-new-pass").await.is_ok());
    }

    #[tokio::test]
    async fn short_password_does_not_consume_the_token() {
        let tokens = MockTokenRepo::new(); // consume must not be called
        let service = ResetPasswordService::new(MockUserRepo::new(), tokens, Arc::new(FakeHasher));

        let result = service.execute("the-token", "short").await;
        assert!(matches!(result, Err(ResetPasswordError::PasswordTooShort)));
    }

    #[tokio::test]
    async fn stale_token_maps_to_invalid_token() {
        let mut tokens = MockTokenRepo::new();
        tokens
            .expect_consume()
            .returning(|_, _| Err(AuthTokenError::Expired));

        let service =
            ResetPasswordService::new(MockUserRepo::new(), tokens, Arc::new(FakeHasher));
        let result = service.execute("stale", "brand-new-pass").await;

        assert!(matches!(result, Err(ResetPasswordError::InvalidToken)));
    }
}
