use actix_web::{get, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::schemas::ErrorResponse;
use crate::modules::directory::application::domain::profiles::{PlayerDetail, PlayerListItem};
use crate::modules::directory::application::ports::outgoing::{PlayerFilter, ProfileSort};
use crate::modules::directory::application::services::player_directory::PlayerDirectoryError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListPlayersQuery {
    pub age_group: Option<String>,
    pub level: Option<String>,
    pub position: Option<String>,
    pub search: Option<String>,
    /// `newest` (default) or `updated`.
    pub sort: Option<String>,
}

pub(crate) fn parse_sort(raw: Option<&str>) -> ProfileSort {
    match raw {
        Some("updated") => ProfileSort::Updated,
        _ => ProfileSort::Newest,
    }
}

/// Browse the public player directory
#[utoipa::path(
    get,
    path = "/api/players",
    tag = "directory",
    params(ListPlayersQuery),
    responses(
        (status = 200, description = "Public player profiles", body = Vec<PlayerListItem>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/players")]
pub async fn list_players_handler(
    query: web::Query<ListPlayersQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();
    let filter = PlayerFilter {
        age_group: query.age_group,
        level: query.level,
        position: query.position,
        search: query.search,
        sort: parse_sort(query.sort.as_deref()),
    };

    match data.player_directory.list(filter).await {
        Ok(players) => ApiResponse::success(players),
        Err(e) => {
            error!(error = %e, "Player directory listing failed");
            ApiResponse::internal_error()
        }
    }
}

/// Fetch one public player profile
///
/// Private, unverified and absent profiles all answer 404.
#[utoipa::path(
    get,
    path = "/api/players/{user_id}",
    tag = "directory",
    params(("user_id" = Uuid, Path, description = "Player's user id")),
    responses(
        (status = 200, description = "Player profile with media", body = PlayerDetail),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/players/{user_id}")]
pub async fn get_player_handler(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();

    match data.player_directory.get(user_id).await {
        Ok(detail) => ApiResponse::success(detail),
        Err(PlayerDirectoryError::ProfileNotFound) => {
            ApiResponse::not_found("PROFILE_NOT_FOUND", "Profile not found")
        }
        Err(e) => {
            error!(error = %e, "Player profile lookup failed");
            ApiResponse::internal_error()
        }
    }
}
