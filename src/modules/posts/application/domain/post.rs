use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// What a coach is recruiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PostType {
    #[serde(rename = "TRYOUT")]
    Tryout,
    #[serde(rename = "GUEST_PLAYER")]
    GuestPlayer,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Tryout => "TRYOUT",
            PostType::GuestPlayer => "GUEST_PLAYER",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "TRYOUT" => Some(PostType::Tryout),
            "GUEST_PLAYER" => Some(PostType::GuestPlayer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PostStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "inactive")]
    Inactive,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Active => "active",
            PostStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "active" => Some(PostStatus::Active),
            "inactive" => Some(PostStatus::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub coach_user_id: Uuid,
    pub post_type: PostType,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs: Option<String>,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_active(&self) -> bool {
        self.status == PostStatus::Active
    }
}
