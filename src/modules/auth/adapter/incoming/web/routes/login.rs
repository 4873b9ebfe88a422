use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::services::login::{LoginError, LoginInput, LoginOutput};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "keeper01@example.com")]
    pub email: String,

    #[schema(example = "SecurePass123!")]
    pub password: String,
}

fn map_login_error(err: LoginError, email: &str) -> HttpResponse {
    match &err {
        LoginError::InvalidCredentials => {
            warn!(email = %email, "Failed login attempt");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }
        other => {
            error!(email = %email, error = %other, "Login failed");
            ApiResponse::internal_error()
        }
    }
}

/// Log in
///
/// Exchanges credentials for a signed session token. Unverified accounts can
/// log in; their token carries `is_verified: false` and write operations
/// stay closed until the email is verified.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = inline(SuccessResponse<LoginOutput>)),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_handler(
    req: web::Json<LoginRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let result = data
        .login_use_case
        .execute(LoginInput {
            email: req.email.clone(),
            password: req.password.clone(),
        })
        .await;

    match result {
        Ok(out) => {
            info!(user_id = %out.user.id, "User logged in");
            ApiResponse::success(out)
        }
        Err(e) => map_login_error(e, &req.email),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::UserRole;
    use crate::modules::auth::application::services::login::{LoginUseCase, LoginUserInfo};
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;
    use uuid::Uuid;

    struct MockLoginSuccess;

    #[async_trait]
    impl LoginUseCase for MockLoginSuccess {
        async fn execute(&self, input: LoginInput) -> Result<LoginOutput, LoginError> {
            Ok(LoginOutput {
                session_token: "signed.jwt.token".to_string(),
                user: LoginUserInfo {
                    id: Uuid::new_v4(),
                    email: input.email,
                    role: UserRole::Player,
                    is_verified: true,
                },
            })
        }
    }

    struct MockLoginRejected;

    #[async_trait]
    impl LoginUseCase for MockLoginRejected {
        async fn execute(&self, _input: LoginInput) -> Result<LoginOutput, LoginError> {
            Err(LoginError::InvalidCredentials)
        }
    }

    #[actix_web::test]
    async fn login_returns_token_and_user() {
        let state = TestAppStateBuilder::new()
            .with_login(Arc::new(MockLoginSuccess))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(login_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "email": "keeper01@example.com",
                "password": "SecurePass123!"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["session_token"], "signed.jwt.token");
        assert_eq!(body["data"]["user"]["is_verified"], true);
    }

    #[actix_web::test]
    async fn bad_credentials_return_401() {
        let state = TestAppStateBuilder::new()
            .with_login(Arc::new(MockLoginRejected))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(login_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "email": "keeper01@example.com",
                "password": "wrong"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
    }
}
