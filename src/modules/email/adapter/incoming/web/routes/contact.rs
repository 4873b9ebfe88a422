use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::email::application::services::{ContactError, ContactInput};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ContactRequest {
    #[schema(example = "Sam Coach")]
    pub name: String,

    #[schema(example = "sam@example.com")]
    pub email: String,

    #[schema(example = "Guest keeper")]
    pub subject: String,

    #[schema(example = "Looking for a guest keeper next weekend.")]
    pub message: String,
}

/// Send a contact-form message
///
/// Public endpoint; relays the message to the site inbox.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message sent", body = inline(SuccessResponse<serde_json::Value>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/contact")]
pub async fn contact_handler(
    req: web::Json<ContactRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let result = data
        .contact_use_case
        .execute(ContactInput {
            name: req.name.clone(),
            email: req.email.clone(),
            subject: req.subject.clone(),
            message: req.message.clone(),
        })
        .await;

    match result {
        Ok(()) => {
            info!("Contact form message relayed");
            ApiResponse::success(serde_json::json!({
                "message": "Message sent. We'll get back to you soon."
            }))
        }
        Err(ContactError::InvalidInput(msg)) => {
            warn!("Invalid contact form submission");
            ApiResponse::bad_request("VALIDATION_ERROR", &msg)
        }
        Err(ContactError::NotConfigured) => {
            error!("Contact form hit but no support inbox is configured");
            ApiResponse::error(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "EMAIL_NOT_CONFIGURED",
                "Contact email is not configured",
            )
        }
        Err(e) => {
            error!(error = %e, "Contact form relay failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::email::application::services::ContactUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct MockContactOk;

    #[async_trait]
    impl ContactUseCase for MockContactOk {
        async fn execute(&self, _input: ContactInput) -> Result<(), ContactError> {
            Ok(())
        }
    }

    struct MockContactInvalid;

    #[async_trait]
    impl ContactUseCase for MockContactInvalid {
        async fn execute(&self, _input: ContactInput) -> Result<(), ContactError> {
            Err(ContactError::InvalidInput(
                "Name and message are required".to_string(),
            ))
        }
    }

    #[actix_web::test]
    async fn valid_submission_returns_200() {
        let state = TestAppStateBuilder::new()
            .with_contact(Arc::new(MockContactOk))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(contact_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(serde_json::json!({
                "name": "Sam Coach",
                "email": "sam@example.com",
                "subject": "Guest keeper",
                "message": "Hello!"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn invalid_submission_returns_400() {
        let state = TestAppStateBuilder::new()
            .with_contact(Arc::new(MockContactInvalid))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(contact_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/contact")
            .set_json(serde_json::json!({
                "name": "",
                "email": "sam@example.com",
                "subject": "",
                "message": ""
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
