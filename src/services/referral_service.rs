use crate::database::Backend;
use crate::entities::referral_entity as referrals;
use crate::error::{AppError, AppResult};
use crate::models::{ReferralRow, ReferralStats, ReferralStatus, ReferralsPage};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

const PAGE_LIMIT: u64 = 30;

fn summarize(models: &[referrals::Model]) -> ReferralStats {
    let mut stats = ReferralStats::default();
    for model in models {
        match model.status.as_str() {
            "pending" => stats.pending += 1,
            "joined" => stats.joined += 1,
            "rewarded" => stats.rewarded += 1,
            _ => {}
        }
        stats.total_rewards += model.referrer_reward + model.referred_reward;
    }
    stats
}

/// Referral status transitions stamp their timestamp; moving back to
/// pending clears both.
fn transition(status: ReferralStatus, now: DateTime<Utc>) -> referrals::ActiveModel {
    let mut model = referrals::ActiveModel {
        status: Set(status.as_str().to_string()),
        ..Default::default()
    };
    match status {
        ReferralStatus::Joined => model.joined_at = Set(Some(now)),
        ReferralStatus::Rewarded => model.rewarded_at = Set(Some(now)),
        ReferralStatus::Pending => {
            model.joined_at = Set(None);
            model.rewarded_at = Set(None);
        }
    }
    model
}

#[derive(Clone)]
pub struct ReferralService {
    backend: Backend,
}

impl ReferralService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn page(&self) -> AppResult<ReferralsPage> {
        let conn = self.backend.conn()?;

        let models = referrals::Entity::find()
            .order_by_desc(referrals::Column::CreatedAt)
            .limit(PAGE_LIMIT)
            .all(conn)
            .await?;

        let stats = summarize(&models);
        Ok(ReferralsPage {
            stats,
            referrals: models.into_iter().map(ReferralRow::from).collect(),
            notice: None,
        })
    }

    pub async fn set_status(&self, id: Uuid, status: &str) -> AppResult<ReferralStatus> {
        let status = ReferralStatus::parse(status.trim())?;

        let conn = self.backend.conn()?;

        let result = referrals::Entity::update_many()
            .set(transition(status, Utc::now()))
            .filter(referrals::Column::Id.eq(id))
            .exec(conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Referral not found".to_string()));
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue::{NotSet, Set};

    fn referral(status: &str, referrer_reward: i64, referred_reward: i64) -> referrals::Model {
        referrals::Model {
            id: Uuid::new_v4(),
            referrer_id: Uuid::new_v4(),
            referred_email: None,
            status: status.to_string(),
            referrer_reward,
            referred_reward,
            joined_at: None,
            rewarded_at: None,
            created_at: None,
        }
    }

    #[test]
    fn test_summarize_counts_by_status() {
        let models = vec![
            referral("pending", 5, 5),
            referral("joined", 5, 5),
            referral("rewarded", 10, 10),
        ];

        let stats = summarize(&models);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.joined, 1);
        assert_eq!(stats.rewarded, 1);
        assert_eq!(stats.total_rewards, 40);
    }

    #[test]
    fn test_joined_transition_stamps_joined_at() {
        let now = Utc::now();
        let model = transition(ReferralStatus::Joined, now);

        assert_eq!(model.joined_at, Set(Some(now)));
        assert_eq!(model.rewarded_at, NotSet);
    }

    #[test]
    fn test_pending_transition_clears_both_stamps() {
        let model = transition(ReferralStatus::Pending, Utc::now());

        assert_eq!(model.joined_at, Set(None));
        assert_eq!(model.rewarded_at, Set(None));
    }
}
