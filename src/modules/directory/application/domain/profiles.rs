use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A media item attached to a profile, as exposed through the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: Uuid,
    pub kind: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Full player profile row. Served to the owner and, for public profiles of
/// verified users, to everyone.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub user_id: Uuid,
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
    pub photo_url: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachProfile {
    pub user_id: Uuid,
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
    pub photo_url: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Directory list row: the profile plus its first-uploaded media item.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListItem {
    #[serde(flatten)]
    pub profile: PlayerProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_media: Option<MediaItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachListItem {
    #[serde(flatten)]
    pub profile: CoachProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_media: Option<MediaItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetail {
    #[serde(flatten)]
    pub profile: PlayerProfile,
    pub media: Vec<MediaItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoachDetail {
    #[serde(flatten)]
    pub profile: CoachProfile,
    pub media: Vec<MediaItem>,
}

/// The caller's own profile, whichever role they hold.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "role")]
pub enum OwnProfile {
    #[serde(rename = "PLAYER")]
    Player(PlayerProfile),
    #[serde(rename = "COACH")]
    Coach(CoachProfile),
}
