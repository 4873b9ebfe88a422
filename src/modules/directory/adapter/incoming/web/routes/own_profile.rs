use actix_web::{get, put, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::modules::auth::adapter::incoming::web::extractors::{AuthenticatedUser, VerifiedUser};
use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::directory::application::domain::profiles::{
    CoachProfile, OwnProfile, PlayerProfile,
};
use crate::modules::directory::application::ports::outgoing::{
    CoachProfileUpdate, PlayerProfileUpdate,
};
use crate::modules::directory::application::services::own_profile::OwnProfileError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// PUT payloads replace the whole profile: an omitted field clears its
/// column. `isPublic` is the exception, omitting it keeps the current
/// visibility. Unknown fields are rejected so a typo cannot silently
/// wipe a column.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePlayerProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub team: Option<String>,
    pub position: Option<String>,
    pub level: Option<String>,
    pub age_group: Option<String>,
    pub region: Option<String>,
    pub bio: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCoachProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub club: Option<String>,
    pub team_name: Option<String>,
    pub level: Option<String>,
    pub region: Option<String>,
    pub record: Option<String>,
    pub bio: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_public: Option<bool>,
}

/// Fetch the caller's own profile
///
/// Works for private and unverified accounts; the owner always sees
/// their own data.
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own profile, tagged by role", body = OwnProfile),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/profile")]
pub async fn get_own_profile_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.own_profile.fetch(user.user_id).await {
        Ok(profile) => ApiResponse::success(profile),
        Err(OwnProfileError::ProfileNotFound) => {
            ApiResponse::not_found("PROFILE_NOT_FOUND", "Profile not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Own profile fetch failed");
            ApiResponse::internal_error()
        }
    }
}

/// Replace the caller's player profile
#[utoipa::path(
    put,
    path = "/api/profile/player",
    tag = "profile",
    security(("bearer_auth" = [])),
    request_body = UpdatePlayerProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = PlayerProfile),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a player or not verified", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/api/profile/player")]
pub async fn update_player_profile_handler(
    user: VerifiedUser,
    body: web::Json<UpdatePlayerProfileRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if user.role != UserRole::Player {
        return ApiResponse::forbidden("WRONG_ROLE", "Only players can edit a player profile");
    }

    let body = body.into_inner();
    let update = PlayerProfileUpdate {
        first_name: body.first_name,
        last_name: body.last_name,
        team: body.team,
        position: body.position,
        level: body.level,
        age_group: body.age_group,
        region: body.region,
        bio: body.bio,
        contact_email: body.contact_email,
        contact_phone: body.contact_phone,
        is_public: body.is_public,
    };

    match data.own_profile.update_player(user.user_id, update).await {
        Ok(profile) => ApiResponse::success(profile),
        Err(OwnProfileError::ProfileNotFound) => {
            ApiResponse::not_found("PROFILE_NOT_FOUND", "Profile not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Player profile update failed");
            ApiResponse::internal_error()
        }
    }
}

/// Replace the caller's coach profile
#[utoipa::path(
    put,
    path = "/api/profile/coach",
    tag = "profile",
    security(("bearer_auth" = [])),
    request_body = UpdateCoachProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = CoachProfile),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not a coach or not verified", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/api/profile/coach")]
pub async fn update_coach_profile_handler(
    user: VerifiedUser,
    body: web::Json<UpdateCoachProfileRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    if user.role != UserRole::Coach {
        return ApiResponse::forbidden("WRONG_ROLE", "Only coaches can edit a coach profile");
    }

    let body = body.into_inner();
    let update = CoachProfileUpdate {
        first_name: body.first_name,
        last_name: body.last_name,
        club: body.club,
        team_name: body.team_name,
        level: body.level,
        region: body.region,
        record: body.record,
        bio: body.bio,
        contact_email: body.contact_email,
        contact_phone: body.contact_phone,
        is_public: body.is_public,
    };

    match data.own_profile.update_coach(user.user_id, update).await {
        Ok(profile) => ApiResponse::success(profile),
        Err(OwnProfileError::ProfileNotFound) => {
            ApiResponse::not_found("PROFILE_NOT_FOUND", "Profile not found")
        }
        Err(e) => {
            error!(user_id = %user.user_id, error = %e, "Coach profile update failed");
            ApiResponse::internal_error()
        }
    }
}
