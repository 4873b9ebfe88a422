use actix_web::{get, post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::ErrorResponse;
use crate::modules::auth::adapter::incoming::web::extractors::{AuthenticatedUser, VerifiedUser};
use crate::modules::messaging::application::domain::conversation::{
    Conversation, ConversationSummary,
};
use crate::modules::messaging::application::services::messaging::MessagingError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenConversationRequest {
    /// The other participant.
    pub user_id: Uuid,
}

/// Open (or find) the conversation with another user
///
/// Idempotent: repeated calls for the same pair return the same
/// conversation, including under concurrent creation.
#[utoipa::path(
    post,
    path = "/api/conversations",
    tag = "messaging",
    security(("bearer_auth" = [])),
    request_body = OpenConversationRequest,
    responses(
        (status = 200, description = "The pair's conversation", body = Conversation),
        (status = 400, description = "Cannot message yourself", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Email not verified", body = ErrorResponse),
        (status = 404, description = "Other user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/conversations")]
pub async fn open_conversation_handler(
    user: VerifiedUser,
    body: web::Json<OpenConversationRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .messaging
        .open_conversation(user.user_id, body.user_id)
        .await
    {
        Ok(conversation) => ApiResponse::success(conversation),
        Err(MessagingError::SelfConversation) => ApiResponse::bad_request(
            "VALIDATION_ERROR",
            "Cannot open a conversation with yourself",
        ),
        Err(MessagingError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Conversation open failed");
            ApiResponse::internal_error()
        }
    }
}

/// List the caller's conversations
///
/// Most recently active first, with the counterpart's profile identity and
/// the latest message.
#[utoipa::path(
    get,
    path = "/api/conversations",
    tag = "messaging",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's conversations", body = Vec<ConversationSummary>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/conversations")]
pub async fn list_conversations_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.messaging.list_conversations(user.user_id).await {
        Ok(conversations) => ApiResponse::success(conversations),
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Conversation listing failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::domain::entities::UserRole;
    use crate::modules::messaging::application::domain::conversation::Message;
    use crate::modules::messaging::application::services::messaging::MessagingUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::tokens::{bearer_for, test_token_provider};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Arc;

    struct MockMessaging {
        conversation_id: Uuid,
    }

    #[async_trait]
    impl MessagingUseCase for MockMessaging {
        async fn open_conversation(
            &self,
            caller: Uuid,
            other: Uuid,
        ) -> Result<Conversation, MessagingError> {
            if caller == other {
                return Err(MessagingError::SelfConversation);
            }
            Ok(Conversation {
                id: self.conversation_id,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        }

        async fn list_conversations(
            &self,
            _caller: Uuid,
        ) -> Result<Vec<ConversationSummary>, MessagingError> {
            Ok(vec![])
        }

        async fn list_messages(
            &self,
            _caller: Uuid,
            _conversation_id: Uuid,
        ) -> Result<Vec<Message>, MessagingError> {
            unreachable!("not exercised here")
        }

        async fn send_message(
            &self,
            _caller: Uuid,
            _conversation_id: Uuid,
            _body: String,
            _media_url: Option<String>,
        ) -> Result<Message, MessagingError> {
            unreachable!("not exercised here")
        }

        async fn unread_count(&self, _caller: Uuid) -> Result<u64, MessagingError> {
            unreachable!("not exercised here")
        }
    }

    fn state(conversation_id: Uuid) -> AppState {
        TestAppStateBuilder::new()
            .with_messaging(Arc::new(MockMessaging { conversation_id }))
            .build()
    }

    #[actix_web::test]
    async fn repeat_open_returns_the_same_conversation() {
        let conversation_id = Uuid::new_v4();
        let provider = test_token_provider();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(conversation_id)))
                .app_data(web::Data::new(provider.clone()))
                .service(open_conversation_handler),
        )
        .await;

        let caller = Uuid::new_v4();
        let other = Uuid::new_v4();

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/conversations")
                .insert_header((
                    "Authorization",
                    bearer_for(&provider, caller, UserRole::Player, true),
                ))
                .set_json(serde_json::json!({ "userId": other }))
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), 200);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["data"]["id"], conversation_id.to_string());
        }
    }

    #[actix_web::test]
    async fn messaging_yourself_is_a_validation_error() {
        let provider = test_token_provider();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(Uuid::new_v4())))
                .app_data(web::Data::new(provider.clone()))
                .service(open_conversation_handler),
        )
        .await;

        let caller = Uuid::new_v4();
        let req = test::TestRequest::post()
            .uri("/api/conversations")
            .insert_header((
                "Authorization",
                bearer_for(&provider, caller, UserRole::Player, true),
            ))
            .set_json(serde_json::json!({ "userId": caller }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn unverified_caller_cannot_open_a_conversation() {
        let provider = test_token_provider();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(Uuid::new_v4())))
                .app_data(web::Data::new(provider.clone()))
                .service(open_conversation_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/conversations")
            .insert_header((
                "Authorization",
                bearer_for(&provider, Uuid::new_v4(), UserRole::Player, false),
            ))
            .set_json(serde_json::json!({ "userId": Uuid::new_v4() }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 403);
    }
}
