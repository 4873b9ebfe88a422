use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::schemas::ErrorResponse;
use crate::modules::directory::application::domain::profiles::CoachListItem;
use crate::modules::directory::application::ports::outgoing::CoachFilter;
use crate::modules::directory::application::services::coach_directory::{
    CoachDirectoryError, CoachProfileWithPosts,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

use super::players::parse_sort;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListCoachesQuery {
    pub level: Option<String>,
    pub region: Option<String>,
    pub search: Option<String>,
    /// `newest` (default) or `updated`.
    pub sort: Option<String>,
}

/// Browse the public coach directory
#[utoipa::path(
    get,
    path = "/api/coaches",
    tag = "directory",
    params(ListCoachesQuery),
    responses(
        (status = 200, description = "Public coach profiles", body = Vec<CoachListItem>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/coaches")]
pub async fn list_coaches_handler(
    query: web::Query<ListCoachesQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let filter = CoachFilter {
        level: query.level,
        region: query.region,
        search: query.search,
        sort: parse_sort(query.sort.as_deref()),
    };

    match data.coach_directory.list(filter).await {
        Ok(coaches) => ApiResponse::success(coaches),
        Err(e) => {
            error!(error = %e, "Coach directory listing failed");
            ApiResponse::internal_error()
        }
    }
}

/// Fetch one public coach profile with their active posts
#[utoipa::path(
    get,
    path = "/api/coaches/{user_id}",
    tag = "directory",
    params(("user_id" = Uuid, Path, description = "Coach's user id")),
    responses(
        (status = 200, description = "Coach profile with media and active posts", body = CoachProfileWithPosts),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/coaches/{user_id}")]
pub async fn get_coach_handler(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();

    match data.coach_directory.get(user_id).await {
        Ok(page) => ApiResponse::success(page),
        Err(CoachDirectoryError::ProfileNotFound) => {
            ApiResponse::not_found("PROFILE_NOT_FOUND", "Profile not found")
        }
        Err(e) => {
            error!(error = %e, "Coach profile lookup failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::directory::application::domain::profiles::{CoachDetail, CoachProfile};
    use crate::modules::directory::application::services::coach_directory::CoachDirectoryUseCase;
    use crate::modules::posts::application::domain::post::{Post, PostStatus, PostType};
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Arc;

    fn sample_profile(user_id: Uuid) -> CoachProfile {
        CoachProfile {
            user_id,
            first_name: Some("Sam".to_string()),
            last_name: Some("Coach".to_string()),
            club: Some("FC North".to_string()),
            team_name: Some("FC North U15".to_string()),
            level: Some("Division 1".to_string()),
            region: Some("North".to_string()),
            record: None,
            bio: None,
            contact_email: None,
            contact_phone: None,
            photo_url: None,
            is_public: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct MockDirectory;

    #[async_trait]
    impl CoachDirectoryUseCase for MockDirectory {
        async fn list(
            &self,
            filter: CoachFilter,
        ) -> Result<Vec<CoachListItem>, CoachDirectoryError> {
            assert_eq!(filter.region.as_deref(), Some("North"));
            Ok(vec![])
        }

        async fn get(&self, user_id: Uuid) -> Result<CoachProfileWithPosts, CoachDirectoryError> {
            Ok(CoachProfileWithPosts {
                detail: CoachDetail {
                    profile: sample_profile(user_id),
                    media: vec![],
                },
                posts: vec![Post {
                    id: Uuid::new_v4(),
                    coach_user_id: user_id,
                    post_type: PostType::Tryout,
                    title: "U15 tryout".to_string(),
                    description: "Open tryout".to_string(),
                    date: None,
                    location: None,
                    region: "North".to_string(),
                    needs: None,
                    status: PostStatus::Active,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                }],
            })
        }
    }

    #[actix_web::test]
    async fn coach_detail_carries_posts_alongside_the_profile() {
        let state = TestAppStateBuilder::new()
            .with_coach_directory(Arc::new(MockDirectory))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(get_coach_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/coaches/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["posts"][0]["postType"], "TRYOUT");
        assert_eq!(body["data"]["club"], "FC North");
    }

    #[actix_web::test]
    async fn list_maps_query_params_onto_the_filter() {
        let state = TestAppStateBuilder::new()
            .with_coach_directory(Arc::new(MockDirectory))
            .build();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_coaches_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/coaches?region=North")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
    }
}
