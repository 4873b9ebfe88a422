use actix_web::{delete, web, Responder};
use tracing::{error, info};

use crate::api::schemas::ErrorResponse;
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::auth::application::services::delete_account::DeleteAccountError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Delete the caller's account
///
/// Removes the account and, through cascades, everything attached to it:
/// profile, tokens, posts, conversations, messages and media records.
/// Does not require a verified email; an unverified signup can remove itself.
#[utoipa::path(
    delete,
    path = "/api/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/auth/me")]
pub async fn delete_account_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.delete_account_use_case.execute(user.user_id).await {
        Ok(()) => {
            info!(user_id = %user.user_id, "Account deleted via API");
            ApiResponse::no_content()
        }
        Err(DeleteAccountError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Account deletion failed");
            ApiResponse::internal_error()
        }
    }
}
