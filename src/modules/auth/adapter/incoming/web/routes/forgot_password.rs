use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    #[schema(example = "keeper01@example.com")]
    pub email: String,
}

/// Request a password reset
///
/// Always answers with the same generic message, whether or not the address
/// belongs to an account.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "auth",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Generic acknowledgement", body = inline(SuccessResponse<serde_json::Value>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/forgot-password")]
pub async fn forgot_password_handler(
    req: web::Json<ForgotPasswordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.request_password_reset_use_case.execute(&req.email).await {
        Ok(()) => ApiResponse::success(serde_json::json!({
            "message": "If an account exists for that email, a reset link has been sent."
        })),
        Err(e) => {
            error!(error = %e, "Password reset request failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::services::request_password_reset::{
        RequestPasswordResetError, RequestPasswordResetUseCase,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct MockResetRequestOk;

    #[async_trait]
    impl RequestPasswordResetUseCase for MockResetRequestOk {
        async fn execute(&self, _email: &str) -> Result<(), RequestPasswordResetError> {
            Ok(())
        }
    }

    #[actix_web::test]
    async fn always_returns_the_generic_message() {
        let state = TestAppStateBuilder::new()
            .with_request_password_reset(Arc::new(MockResetRequestOk))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(forgot_password_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/forgot-password")
            .set_json(serde_json::json!({ "email": "anyone@example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .starts_with("If an account exists"));
    }
}
