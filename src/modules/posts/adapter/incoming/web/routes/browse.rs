use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::schemas::ErrorResponse;
use crate::modules::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::posts::application::domain::post::{Post, PostType};
use crate::modules::posts::application::ports::outgoing::PostFilter;
use crate::modules::posts::application::services::browse_posts::PostBrowseError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    /// `TRYOUT` or `GUEST_PLAYER`; anything else is ignored.
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub level: Option<String>,
    pub region: Option<String>,
    pub search: Option<String>,
}

/// Browse the public post board
///
/// Active posts of public, verified coaches, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Active posts", body = Vec<Post>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/posts")]
pub async fn list_posts_handler(
    query: web::Query<ListPostsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let filter = PostFilter {
        post_type: query.post_type.as_deref().and_then(PostType::from_str),
        level: query.level,
        region: query.region,
        search: query.search,
    };

    match data.post_browse.list(filter).await {
        Ok(posts) => ApiResponse::success(posts),
        Err(e) => {
            error!(error = %e, "Post board listing failed");
            ApiResponse::internal_error()
        }
    }
}

/// List the caller's own posts
///
/// All statuses, newest first. Registered before `/api/posts/{post_id}` so
/// `mine` is not read as a post id.
#[utoipa::path(
    get,
    path = "/api/posts/mine",
    tag = "posts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's posts, any status", body = Vec<Post>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a coach", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/posts/mine")]
pub async fn list_my_posts_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    if user.role != UserRole::Coach {
        return ApiResponse::forbidden("WRONG_ROLE", "Only coaches have posts");
    }

    match data.post_browse.mine(user.user_id).await {
        Ok(posts) => ApiResponse::success(posts),
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Own post listing failed");
            ApiResponse::internal_error()
        }
    }
}

/// Fetch one post
///
/// Inactive posts answer 404 to everyone but their author.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    tag = "posts",
    params(("post_id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = Post),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/posts/{post_id}")]
pub async fn get_post_handler(
    path: web::Path<Uuid>,
    viewer: Option<AuthenticatedUser>,
    data: web::Data<AppState>,
) -> impl Responder {
    let post_id = path.into_inner();
    let viewer_id = viewer.map(|u| u.user_id);

    match data.post_browse.get(post_id, viewer_id).await {
        Ok(post) => ApiResponse::success(post),
        Err(PostBrowseError::PostNotFound) => {
            ApiResponse::not_found("POST_NOT_FOUND", "Post not found")
        }
        Err(e) => {
            error!(post_id = %post_id, error = %e, "Post lookup failed");
            ApiResponse::internal_error()
        }
    }
}
