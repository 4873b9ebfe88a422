use std::sync::Arc;

use uuid::Uuid;

use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::auth::application::ports::outgoing::SessionTokenProvider;

// HS256 needs at least 32 bytes of key material.
const TEST_SECRET: &str = "test-secret-test-secret-test-secret-1234";

/// A real JWT provider over a fixed secret, shared between the app under
/// test and the requests it receives.
pub fn test_token_provider() -> Arc<dyn SessionTokenProvider> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret_key: TEST_SECRET.to_string(),
        session_token_expiry: 3600,
    }))
}

pub fn bearer_for(
    provider: &Arc<dyn SessionTokenProvider>,
    user_id: Uuid,
    role: UserRole,
    is_verified: bool,
) -> String {
    let token = provider
        .issue_session_token(user_id, role, is_verified)
        .expect("failed to issue test token");
    format!("Bearer {token}")
}
