use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Canonical key for the unordered participant pair: the two user ids,
/// lexicographically sorted, joined with `:`. The unique index on it is
/// what makes concurrent conversation creation converge on one row.
pub fn pair_key(a: Uuid, b: Uuid) -> String {
    let (lo, hi) = if a.to_string() <= b.to_string() {
        (a, b)
    } else {
        (b, a)
    };
    format!("{lo}:{hi}")
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The other person in a conversation, as shown in the inbox: identity
/// pulled from their role profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Counterpart {
    pub user_id: Uuid,
    pub role: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_user_id: Uuid,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One inbox row: who, what was said last, and when.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: Uuid,
    pub counterpart: Counterpart,
    pub last_message: Option<Message>,
    pub updated_at: DateTime<Utc>,
}

/// Caller's own membership row in a conversation.
#[derive(Debug, Clone)]
pub struct Participation {
    pub conversation_id: Uuid,
    pub user_id: Uuid,
    pub is_blocked: bool,
    pub last_read_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_key_is_order_independent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(pair_key(a, b), pair_key(b, a));
    }

    #[test]
    fn pair_key_sorts_lexicographically() {
        let a: Uuid = "00000000-0000-0000-0000-000000000001".parse().unwrap();
        let b: Uuid = "00000000-0000-0000-0000-000000000002".parse().unwrap();
        assert_eq!(pair_key(b, a), format!("{a}:{b}"));
    }
}
