use actix_web::{get, post, web, HttpRequest, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::schemas::ErrorResponse;
use crate::modules::auth::adapter::incoming::web::extractors::{AuthenticatedUser, VerifiedUser};
use crate::modules::directory::application::domain::profiles::MediaItem;
use crate::modules::media::application::services::media_upload::{
    MediaUploadError, VideoUploadConfig,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct VideoUploadQuery {
    pub caption: Option<String>,
}

fn content_type_of(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
}

fn map_upload_error(user_id: Uuid, e: MediaUploadError) -> actix_web::HttpResponse {
    match e {
        MediaUploadError::InvalidMedia(msg) => ApiResponse::bad_request("VALIDATION_ERROR", &msg),
        MediaUploadError::WrongRole => {
            ApiResponse::forbidden("WRONG_ROLE", "Not available for this role")
        }
        MediaUploadError::ProfileNotFound => {
            ApiResponse::not_found("PROFILE_NOT_FOUND", "Profile not found")
        }
        MediaUploadError::StorageError(msg) | MediaUploadError::DatabaseError(msg) => {
            error!(user_id = %user_id, error = %msg, "Media upload failed");
            ApiResponse::internal_error()
        }
    }
}

/// Replace the profile photo
///
/// Raw image body; the previous photo is overwritten.
#[utoipa::path(
    post,
    path = "/api/upload/profile-photo",
    tag = "media",
    security(("bearer_auth" = [])),
    request_body(content = Vec<u8>, content_type = "image/jpeg"),
    responses(
        (status = 200, description = "Stored IMAGE asset", body = MediaItem),
        (status = 400, description = "Unsupported type or size", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Email not verified", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/upload/profile-photo")]
pub async fn upload_profile_photo_handler(
    user: VerifiedUser,
    req: HttpRequest,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let Some(content_type) = content_type_of(&req) else {
        return ApiResponse::bad_request("VALIDATION_ERROR", "Content-Type header is required");
    };

    match data
        .media_upload
        .upload_profile_photo(user.user_id, &content_type, body.to_vec())
        .await
    {
        Ok(item) => ApiResponse::success(item),
        Err(e) => map_upload_error(user.user_id, e),
    }
}

/// Add a profile video
///
/// Raw video body; videos accumulate. Caption via the `caption` query
/// parameter.
#[utoipa::path(
    post,
    path = "/api/upload/profile-video",
    tag = "media",
    security(("bearer_auth" = [])),
    params(VideoUploadQuery),
    request_body(content = Vec<u8>, content_type = "video/mp4"),
    responses(
        (status = 201, description = "Stored VIDEO asset", body = MediaItem),
        (status = 400, description = "Unsupported type or size", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Email not verified", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/upload/profile-video")]
pub async fn upload_profile_video_handler(
    user: VerifiedUser,
    req: HttpRequest,
    query: web::Query<VideoUploadQuery>,
    body: web::Bytes,
    data: web::Data<AppState>,
) -> impl Responder {
    let Some(content_type) = content_type_of(&req) else {
        return ApiResponse::bad_request("VALIDATION_ERROR", "Content-Type header is required");
    };

    match data
        .media_upload
        .upload_profile_video(
            user.user_id,
            &content_type,
            body.to_vec(),
            query.into_inner().caption,
        )
        .await
    {
        Ok(item) => ApiResponse::created(item),
        Err(e) => map_upload_error(user.user_id, e),
    }
}

/// Direct-upload configuration for player videos
#[utoipa::path(
    get,
    path = "/api/upload/profile-video/config",
    tag = "media",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bucket and prefix for client-side uploads", body = VideoUploadConfig),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a player", body = ErrorResponse),
    )
)]
#[get("/api/upload/profile-video/config")]
pub async fn video_upload_config_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.media_upload.video_upload_config(user.role) {
        Ok(config) => ApiResponse::success(config),
        Err(e) => map_upload_error(user.user_id, e),
    }
}
