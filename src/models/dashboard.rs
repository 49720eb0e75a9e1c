use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct DashboardStats {
    pub live_venues: i64,
    pub active_check_ins: i64,
    pub credits_sold_24h: i64,
    pub new_users_7d: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AlertEntry {
    pub level: String,
    pub message: String,
}

impl AlertEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: "info".to_string(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: "warning".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpcomingVenue {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardPage {
    pub stats: DashboardStats,
    pub alerts: Vec<AlertEntry>,
    pub upcoming: Vec<UpcomingVenue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl DashboardPage {
    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            stats: DashboardStats::default(),
            alerts: vec![AlertEntry::info("All clear")],
            upcoming: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}
