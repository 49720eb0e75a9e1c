use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActivityRow {
    pub id: Uuid,
    pub segment: String,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SegmentBucket {
    pub segment: String,
    pub count: i64,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ActivityStats {
    pub total: i64,
    pub last_24h: i64,
    pub segments: Vec<SegmentBucket>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationsPage {
    pub stats: ActivityStats,
    pub activities: Vec<ActivityRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl NotificationsPage {
    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            stats: ActivityStats::default(),
            activities: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActivityForm {
    pub title: String,
    pub description: Option<String>,
    pub segment: Option<String>,
}
