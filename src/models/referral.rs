use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::referral_entity as referrals;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    Pending,
    Joined,
    Rewarded,
}

impl ReferralStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferralStatus::Pending => "pending",
            ReferralStatus::Joined => "joined",
            ReferralStatus::Rewarded => "rewarded",
        }
    }

    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "pending" => Ok(ReferralStatus::Pending),
            "joined" => Ok(ReferralStatus::Joined),
            "rewarded" => Ok(ReferralStatus::Rewarded),
            other => Err(AppError::ValidationError(format!(
                "Unknown referral status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReferralRow {
    pub id: Uuid,
    pub referrer_id: Uuid,
    pub referred_email: Option<String>,
    pub status: String,
    pub referrer_reward: i64,
    pub referred_reward: i64,
    pub joined_at: Option<DateTime<Utc>>,
    pub rewarded_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<referrals::Model> for ReferralRow {
    fn from(model: referrals::Model) -> Self {
        Self {
            id: model.id,
            referrer_id: model.referrer_id,
            referred_email: model.referred_email,
            status: model.status,
            referrer_reward: model.referrer_reward,
            referred_reward: model.referred_reward,
            joined_at: model.joined_at,
            rewarded_at: model.rewarded_at,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ReferralStats {
    pub pending: i64,
    pub joined: i64,
    pub rewarded: i64,
    pub total_rewards: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReferralsPage {
    pub stats: ReferralStats,
    pub referrals: Vec<ReferralRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl ReferralsPage {
    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            stats: ReferralStats::default(),
            referrals: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReferralStatusForm {
    pub status: String,
}
