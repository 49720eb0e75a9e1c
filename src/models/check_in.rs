use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::check_in_entity as check_ins;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckInRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub venue_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    pub active: bool,
}

impl CheckInRow {
    pub fn from_model(model: check_ins::Model, now: DateTime<Utc>) -> Self {
        let active = model.expires_at > now;
        Self {
            id: model.id,
            user_id: model.user_id,
            venue_id: model.venue_id,
            expires_at: model.expires_at,
            created_at: model.created_at,
            active,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CheckInStats {
    pub total: i64,
    pub active: i64,
    pub expired: i64,
    pub created_last_24h: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckInsPage {
    pub stats: CheckInStats,
    pub check_ins: Vec<CheckInRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl CheckInsPage {
    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            stats: CheckInStats::default(),
            check_ins: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}
