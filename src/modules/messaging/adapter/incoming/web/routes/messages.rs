use actix_web::{get, post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::schemas::ErrorResponse;
use crate::modules::auth::adapter::incoming::web::extractors::{AuthenticatedUser, VerifiedUser};
use crate::modules::messaging::application::domain::conversation::Message;
use crate::modules::messaging::application::services::messaging::MessagingError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesQuery {
    pub conversation_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub conversation_id: Uuid,
    pub body: String,
    pub media_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnreadMessagesResponse {
    pub unread_conversations: u64,
}

fn map_messaging_error(user_id: Uuid, e: MessagingError) -> actix_web::HttpResponse {
    match e {
        MessagingError::AccessDenied => {
            ApiResponse::forbidden("ACCESS_DENIED", "Not a participant of this conversation")
        }
        MessagingError::EmptyBody => {
            ApiResponse::bad_request("VALIDATION_ERROR", "Message body must not be empty")
        }
        MessagingError::SelfConversation => ApiResponse::bad_request(
            "VALIDATION_ERROR",
            "Cannot open a conversation with yourself",
        ),
        MessagingError::UserNotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        MessagingError::DatabaseError(msg) => {
            error!(user_id = %user_id, error = %msg, "Messaging operation failed");
            ApiResponse::internal_error()
        }
    }
}

/// Read a conversation
///
/// Oldest first. Reading advances the caller's read marker.
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "messaging",
    security(("bearer_auth" = [])),
    params(ListMessagesQuery),
    responses(
        (status = 200, description = "Conversation messages, oldest first", body = Vec<Message>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not a participant, or blocked", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/messages")]
pub async fn list_messages_handler(
    user: AuthenticatedUser,
    query: web::Query<ListMessagesQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .messaging
        .list_messages(user.user_id, query.conversation_id)
        .await
    {
        Ok(messages) => ApiResponse::success(messages),
        Err(e) => map_messaging_error(user.user_id, e),
    }
}

/// Send a message
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "messaging",
    security(("bearer_auth" = [])),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "The stored message", body = Message),
        (status = 400, description = "Empty body", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Unverified, not a participant, or blocked", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/messages")]
pub async fn send_message_handler(
    user: VerifiedUser,
    body: web::Json<SendMessageRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let body = body.into_inner();

    match data
        .messaging
        .send_message(user.user_id, body.conversation_id, body.body, body.media_url)
        .await
    {
        Ok(message) => ApiResponse::created(message),
        Err(e) => map_messaging_error(user.user_id, e),
    }
}

/// Count unread conversations
#[utoipa::path(
    get,
    path = "/api/unread-messages",
    tag = "messaging",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread conversation count", body = UnreadMessagesResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/unread-messages")]
pub async fn unread_messages_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.messaging.unread_count(user.user_id).await {
        Ok(unread_conversations) => ApiResponse::success(UnreadMessagesResponse {
            unread_conversations,
        }),
        Err(e) => map_messaging_error(user.user_id, e),
    }
}
