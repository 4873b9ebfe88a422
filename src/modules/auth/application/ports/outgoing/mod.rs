pub mod auth_token_repository;
pub mod password_hasher;
pub mod token_provider;
pub mod user_query;
pub mod user_repository;

pub use auth_token_repository::{AuthTokenError, AuthTokenRepository, TokenPurpose};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use token_provider::{SessionClaims, SessionTokenProvider, TokenError};
pub use user_query::{UserQuery, UserQueryError};
pub use user_repository::{NewUser, UserRepository, UserRepositoryError};
