use async_trait::async_trait;
use bcrypt::{hash, verify};

use crate::modules::auth::application::ports::outgoing::{PasswordHashError, PasswordHasher};

const DEFAULT_COST: u32 = 10;
// bcrypt's MIN_COST is private; same value as bcrypt::MIN_COST.
const MIN_COST: u32 = 4;

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Minimum cost, for tests that hash many passwords.
    pub fn fast() -> Self {
        Self {
            cost: MIN_COST,
        }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash_password(&self, password: &str) -> Result<String, PasswordHashError> {
        let password = password.to_string();
        let cost = self.cost;

        // bcrypt at cost 10 takes ~50ms; keep it off the async workers.
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PasswordHashError> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| PasswordHashError::VerificationFailed(e.to_string()))?
            .map_err(|e| PasswordHashError::VerificationFailed(e.to_string()))
    }
}
