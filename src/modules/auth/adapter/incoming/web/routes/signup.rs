use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::auth::application::services::signup::{SignupError, SignupInput};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Email address, used for login and verification
    #[schema(example = "keeper01@example.com")]
    pub email: String,

    /// Password (minimum 8 characters)
    #[schema(example = "SecurePass123!")]
    pub password: String,

    /// Account role, fixed after signup
    pub role: UserRole,
}

#[derive(Serialize, ToSchema)]
pub struct SignupResponse {
    #[schema(
        example = "Account created successfully. Please check your email to verify your account."
    )]
    message: String,
    user: SignupUser,
}

#[derive(Serialize, ToSchema)]
pub struct SignupUser {
    id: Uuid,
    email: String,
    role: UserRole,
}

fn map_signup_error(err: SignupError, email: &str) -> HttpResponse {
    match &err {
        SignupError::InvalidEmail | SignupError::PasswordTooShort => {
            warn!(email = %email, error = %err, "Invalid signup input");
            ApiResponse::bad_request("VALIDATION_ERROR", &err.to_string())
        }
        SignupError::EmailTaken => {
            warn!(email = %email, "Signup with already registered email");
            ApiResponse::conflict("USER_ALREADY_EXISTS", "User already exists")
        }
        other => {
            error!(email = %email, error = %other, "Signup failed");
            ApiResponse::internal_error()
        }
    }
}

/// Create an account
///
/// Registers a player or coach account together with its empty profile and
/// sends a verification email.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<SignupResponse>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/signup")]
pub async fn signup_handler(
    req: web::Json<SignupRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!(email = %req.email, role = %req.role, "Signup attempt");

    let result = data
        .signup_flow
        .execute(SignupInput {
            email: req.email.clone(),
            password: req.password.clone(),
            role: req.role,
        })
        .await;

    match result {
        Ok(created) => {
            info!(user_id = %created.user_id, role = %created.role, "Account created");

            ApiResponse::created(SignupResponse {
                message:
                    "Account created successfully. Please check your email to verify your account."
                        .to_string(),
                user: SignupUser {
                    id: created.user_id,
                    email: created.email,
                    role: created.role,
                },
            })
        }
        Err(e) => map_signup_error(e, &req.email),
    }
}
