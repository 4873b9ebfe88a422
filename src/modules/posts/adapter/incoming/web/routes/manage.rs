use actix_web::{delete, post, put, web, Responder};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::ErrorResponse;
use crate::modules::auth::adapter::incoming::web::extractors::VerifiedUser;
use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::posts::application::domain::post::{Post, PostStatus, PostType};
use crate::modules::posts::application::ports::outgoing::{NewPost, PostUpdate};
use crate::modules::posts::application::services::author_posts::PostAuthorError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub title: String,
    pub description: String,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub region: String,
    pub needs: Option<String>,
}

/// Full replacement, including status; this is also how a post is
/// deactivated.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub title: String,
    pub description: String,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub region: String,
    pub needs: Option<String>,
    pub status: PostStatus,
}

fn map_author_error(user_id: Uuid, e: PostAuthorError) -> actix_web::HttpResponse {
    match e {
        PostAuthorError::MissingField(field) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &format!("{field} is required"))
        }
        PostAuthorError::PostNotFound => ApiResponse::not_found("POST_NOT_FOUND", "Post not found"),
        PostAuthorError::DatabaseError(msg) => {
            error!(user_id = %user_id, error = %msg, "Post write failed");
            ApiResponse::internal_error()
        }
    }
}

/// Publish a post
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(("bearer_auth" = [])),
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created, active", body = Post),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a verified coach", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/posts")]
pub async fn create_post_handler(
    user: VerifiedUser,
    body: web::Json<CreatePostRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if user.role != UserRole::Coach {
        return ApiResponse::forbidden("WRONG_ROLE", "Only coaches can publish posts");
    }

    let body = body.into_inner();
    let post = NewPost {
        coach_user_id: user.user_id,
        post_type: body.post_type,
        title: body.title,
        description: body.description,
        date: body.date,
        location: body.location,
        region: body.region,
        needs: body.needs,
    };

    match data.post_author.create(post).await {
        Ok(created) => ApiResponse::created(created),
        Err(e) => map_author_error(user.user_id, e),
    }
}

/// Replace a post
///
/// Only the author can update; anyone else gets the same 404 an absent
/// post would give.
#[utoipa::path(
    put,
    path = "/api/posts/{post_id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("post_id" = Uuid, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated post", body = Post),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a verified coach", body = ErrorResponse),
        (status = 404, description = "Post not found or not owned", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/api/posts/{post_id}")]
pub async fn update_post_handler(
    user: VerifiedUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if user.role != UserRole::Coach {
        return ApiResponse::forbidden("WRONG_ROLE", "Only coaches can edit posts");
    }

    let post_id = path.into_inner();
    let body = body.into_inner();
    let update = PostUpdate {
        post_type: body.post_type,
        title: body.title,
        description: body.description,
        date: body.date,
        location: body.location,
        region: body.region,
        needs: body.needs,
        status: body.status,
    };

    match data.post_author.update(post_id, user.user_id, update).await {
        Ok(updated) => ApiResponse::success(updated),
        Err(e) => map_author_error(user.user_id, e),
    }
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("post_id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a verified coach", body = ErrorResponse),
        (status = 404, description = "Post not found or not owned", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/posts/{post_id}")]
pub async fn delete_post_handler(
    user: VerifiedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    if user.role != UserRole::Coach {
        return ApiResponse::forbidden("WRONG_ROLE", "Only coaches can delete posts");
    }

    let post_id = path.into_inner();
    match data.post_author.delete(post_id, user.user_id).await {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => map_author_error(user.user_id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::posts::application::services::author_posts::PostAuthorUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::tokens::{bearer_for, test_token_provider};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct MockAuthor;

    #[async_trait]
    impl PostAuthorUseCase for MockAuthor {
        async fn create(&self, post: NewPost) -> Result<Post, PostAuthorError> {
            if post.title.trim().is_empty() {
                return Err(PostAuthorError::MissingField("title"));
            }
            Ok(Post {
                id: Uuid::new_v4(),
                coach_user_id: post.coach_user_id,
                post_type: post.post_type,
                title: post.title,
                description: post.description,
                date: post.date,
                location: post.location,
                region: post.region,
                needs: post.needs,
                status: PostStatus::Active,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        }

        async fn update(
            &self,
            _post_id: Uuid,
            _coach_user_id: Uuid,
            _update: PostUpdate,
        ) -> Result<Post, PostAuthorError> {
            Err(PostAuthorError::PostNotFound)
        }

        async fn delete(
            &self,
            _post_id: Uuid,
            _coach_user_id: Uuid,
        ) -> Result<(), PostAuthorError> {
            Ok(())
        }
    }

    fn state() -> AppState {
        TestAppStateBuilder::new()
            .with_post_author(Arc::new(MockAuthor))
            .build()
    }

    #[actix_web::test]
    async fn verified_coach_creates_a_post() {
        let provider = test_token_provider();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .app_data(web::Data::new(provider.clone()))
                .service(create_post_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((
                "Authorization",
                bearer_for(&provider, Uuid::new_v4(), UserRole::Coach, true),
            ))
            .set_json(serde_json::json!({
                "type": "TRYOUT",
                "title": "U15 tryout",
                "description": "Open tryout",
                "region": "North"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 201);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["postType"], "TRYOUT");
        assert_eq!(body["data"]["status"], "active");
    }

    #[actix_web::test]
    async fn players_cannot_publish() {
        let provider = test_token_provider();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .app_data(web::Data::new(provider.clone()))
                .service(create_post_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((
                "Authorization",
                bearer_for(&provider, Uuid::new_v4(), UserRole::Player, true),
            ))
            .set_json(serde_json::json!({
                "type": "TRYOUT",
                "title": "U15 tryout",
                "description": "Open tryout",
                "region": "North"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 403);
    }

    #[actix_web::test]
    async fn blank_title_is_a_validation_error() {
        let provider = test_token_provider();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .app_data(web::Data::new(provider.clone()))
                .service(create_post_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header((
                "Authorization",
                bearer_for(&provider, Uuid::new_v4(), UserRole::Coach, true),
            ))
            .set_json(serde_json::json!({
                "type": "TRYOUT",
                "title": "  ",
                "description": "Open tryout",
                "region": "North"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn editing_someone_elses_post_reads_as_404() {
        let provider = test_token_provider();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .app_data(web::Data::new(provider.clone()))
                .service(update_post_handler),
        )
        .await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", Uuid::new_v4()))
            .insert_header((
                "Authorization",
                bearer_for(&provider, Uuid::new_v4(), UserRole::Coach, true),
            ))
            .set_json(serde_json::json!({
                "type": "TRYOUT",
                "title": "U15 tryout",
                "description": "Open tryout",
                "region": "North",
                "status": "inactive"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 404);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "POST_NOT_FOUND");
    }
}
