use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::IntoParams;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::services::verify_email::VerifyEmailError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, IntoParams)]
pub struct VerifyEmailQuery {
    /// Opaque token from the verification email link
    pub token: String,
}

/// Verify an email address
///
/// Consumes the single-use token from the verification email. A missing,
/// already used or expired token all produce the same 400.
#[utoipa::path(
    get,
    path = "/api/auth/verify-email",
    tag = "auth",
    params(VerifyEmailQuery),
    responses(
        (status = 200, description = "Email verified", body = inline(SuccessResponse<serde_json::Value>)),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/auth/verify-email")]
pub async fn verify_email_handler(
    query: web::Query<VerifyEmailQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.verify_email_use_case.execute(&query.token).await {
        Ok(()) => {
            info!("Email verified");
            ApiResponse::success(serde_json::json!({
                "message": "Email verified successfully. You can now use your account."
            }))
        }
        Err(VerifyEmailError::InvalidToken) => {
            warn!("Email verification with invalid or expired token");
            ApiResponse::bad_request("VALIDATION_ERROR", "Invalid or expired verification token")
        }
        Err(e) => {
            error!(error = %e, "Email verification failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::services::verify_email::VerifyEmailUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct MockVerifyOk;

    #[async_trait]
    impl VerifyEmailUseCase for MockVerifyOk {
        async fn execute(&self, _token: &str) -> Result<(), VerifyEmailError> {
            Ok(())
        }
    }

    struct MockVerifyInvalid;

    #[async_trait]
    impl VerifyEmailUseCase for MockVerifyInvalid {
        async fn execute(&self, _token: &str) -> Result<(), VerifyEmailError> {
            Err(VerifyEmailError::InvalidToken)
        }
    }

    #[actix_web::test]
    async fn valid_token_verifies_the_account() {
        let state = TestAppStateBuilder::new()
            .with_verify_email(Arc::new(MockVerifyOk))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(verify_email_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/auth/verify-email?token=abc123")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn invalid_token_returns_400() {
        let state = TestAppStateBuilder::new()
            .with_verify_email(Arc::new(MockVerifyInvalid))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(verify_email_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/auth/verify-email?token=stale")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn missing_token_param_returns_400() {
        let state = TestAppStateBuilder::new()
            .with_verify_email(Arc::new(MockVerifyOk))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(verify_email_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/auth/verify-email")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }
}
