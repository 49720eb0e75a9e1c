use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::payout_entity as payouts;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Queued,
    Scheduled,
    Paid,
}

impl PayoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Queued => "queued",
            PayoutStatus::Scheduled => "scheduled",
            PayoutStatus::Paid => "paid",
        }
    }

    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "queued" => Ok(PayoutStatus::Queued),
            "scheduled" => Ok(PayoutStatus::Scheduled),
            "paid" => Ok(PayoutStatus::Paid),
            other => Err(AppError::ValidationError(format!(
                "Unknown payout status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PayoutRow {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub amount: f64,
    pub status: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<payouts::Model> for PayoutRow {
    fn from(model: payouts::Model) -> Self {
        Self {
            id: model.id,
            venue_id: model.venue_id,
            amount: model.amount,
            status: model.status,
            scheduled_at: model.scheduled_at,
            paid_at: model.paid_at,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PayoutForm {
    pub venue_id: String,
    pub amount: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PayoutStatusForm {
    pub status: String,
}
