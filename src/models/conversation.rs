use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConversationRow {
    pub id: Uuid,
    pub venue_id: Option<Uuid>,
    pub participants: i64,
    pub created_at: Option<DateTime<Utc>>,
    /// Rooms with three or more participants are surfaced for review.
    pub disputed: bool,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ConversationStats {
    pub total: i64,
    pub active_rooms: i64,
    pub avg_participants: f64,
    pub disputes: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConversationsPage {
    pub stats: ConversationStats,
    pub conversations: Vec<ConversationRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl ConversationsPage {
    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            stats: ConversationStats::default(),
            conversations: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}
