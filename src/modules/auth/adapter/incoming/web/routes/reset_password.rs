use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::services::reset_password::ResetPasswordError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    /// Opaque token from the reset email link
    pub token: String,

    /// New password (minimum 8 characters)
    #[schema(example = "EvenMoreSecure456!")]
    pub new_password: String,
}

fn map_reset_error(err: ResetPasswordError) -> HttpResponse {
    match &err {
        ResetPasswordError::InvalidToken => {
            warn!("Password reset with invalid or expired token");
            ApiResponse::bad_request("VALIDATION_ERROR", "Invalid or expired reset token")
        }
        ResetPasswordError::PasswordTooShort => {
            warn!("Password reset with too-short password");
            ApiResponse::bad_request("VALIDATION_ERROR", &err.to_string())
        }
        other => {
            error!(error = %other, "Password reset failed");
            ApiResponse::internal_error()
        }
    }
}

/// Reset a password
///
/// Consumes the single-use reset token and stores the new password.
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = "auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = inline(SuccessResponse<serde_json::Value>)),
        (status = 400, description = "Invalid token or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/reset-password")]
pub async fn reset_password_handler(
    req: web::Json<ResetPasswordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .reset_password_use_case
        .execute(&req.token, &req.new_password)
        .await
    {
        Ok(()) => {
            info!("Password reset completed");
            ApiResponse::success(serde_json::json!({
                "message": "Password updated successfully. You can now log in."
            }))
        }
        Err(e) => map_reset_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::services::reset_password::ResetPasswordUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct MockResetOk;

    #[async_trait]
    impl ResetPasswordUseCase for MockResetOk {
        async fn execute(&self, _token: &str, _new_password: &str) -> Result<(), ResetPasswordError> {
            Ok(())
        }
    }

    struct MockResetStale;

    #[async_trait]
    impl ResetPasswordUseCase for MockResetStale {
        async fn execute(&self, _token: &str, _new_password: &str) -> Result<(), ResetPasswordError> {
            Err(ResetPasswordError::InvalidToken)
        }
    }

    #[actix_web::test]
    async fn valid_token_resets_the_password() {
        let state = TestAppStateBuilder::new()
            .with_reset_password(Arc::new(MockResetOk))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(reset_password_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/reset-password")
            .set_json(serde_json::json!({
                "token": "abc123",
                "new_password": "EvenMoreSecure456!"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn stale_token_returns_400() {
        let state = TestAppStateBuilder::new()
            .with_reset_password(Arc::new(MockResetStale))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(reset_password_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/reset-password")
            .set_json(serde_json::json!({
                "token": "stale",
                "new_password": "EvenMoreSecure456!"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
