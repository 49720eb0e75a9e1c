use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::credit_transaction_entity as credit_transactions;
use crate::models::payout::PayoutRow;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreditRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub transaction_type: String,
    pub amount: i64,
    pub price: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<credit_transactions::Model> for CreditRow {
    fn from(model: credit_transactions::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            transaction_type: model.transaction_type,
            amount: model.amount,
            price: model.price,
            created_at: model.created_at,
        }
    }
}

/// One credit package bucket: purchases grouped by their price label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PackageBucket {
    pub label: String,
    pub sold: i64,
    pub revenue: f64,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreditStats {
    pub purchased_last_24h: i64,
    pub redeemed_last_24h: i64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreditsPage {
    pub stats: CreditStats,
    pub packages: Vec<PackageBucket>,
    pub transactions: Vec<CreditRow>,
    pub payouts: Vec<PayoutRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl CreditsPage {
    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            stats: CreditStats::default(),
            packages: Vec::new(),
            transactions: Vec::new(),
            payouts: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}

/// Raw form fields for a manual credit adjustment.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreditAdjustmentForm {
    pub user_id: String,
    pub transaction_type: Option<String>,
    pub amount: String,
    pub price: Option<String>,
}
