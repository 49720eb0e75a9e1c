use crate::database::Backend;
use crate::entities::payout_entity as payouts;
use crate::error::{AppError, AppResult};
use crate::models::{PayoutForm, PayoutRow, PayoutStatus};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

const PAGE_LIMIT: u64 = 30;

/// Status transitions auto-stamp their timestamp: moving to paid records
/// when, moving back to queued clears it, scheduling stamps the schedule
/// time. Payouts are never physically deleted.
fn transition(status: PayoutStatus, now: DateTime<Utc>) -> payouts::ActiveModel {
    let mut model = payouts::ActiveModel {
        status: Set(status.as_str().to_string()),
        ..Default::default()
    };
    match status {
        PayoutStatus::Paid => model.paid_at = Set(Some(now)),
        PayoutStatus::Queued => model.paid_at = Set(None),
        PayoutStatus::Scheduled => model.scheduled_at = Set(Some(now)),
    }
    model
}

#[derive(Clone)]
pub struct PayoutService {
    backend: Backend,
}

impl PayoutService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn recent(&self) -> AppResult<Vec<PayoutRow>> {
        let conn = self.backend.conn()?;

        let models = payouts::Entity::find()
            .order_by_desc(payouts::Column::CreatedAt)
            .limit(PAGE_LIMIT)
            .all(conn)
            .await?;

        Ok(models.into_iter().map(PayoutRow::from).collect())
    }

    pub async fn create(&self, form: PayoutForm) -> AppResult<Uuid> {
        let venue_id = Uuid::parse_str(form.venue_id.trim())
            .map_err(|_| AppError::ValidationError("Invalid venue id".to_string()))?;

        let amount: f64 = form
            .amount
            .trim()
            .parse()
            .map_err(|_| AppError::ValidationError("Amount must be a number".to_string()))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::ValidationError(
                "Amount must be a positive number".to_string(),
            ));
        }

        let conn = self.backend.conn()?;
        let id = Uuid::new_v4();

        let model = payouts::ActiveModel {
            id: Set(id),
            venue_id: Set(venue_id),
            amount: Set(amount),
            status: Set(PayoutStatus::Queued.as_str().to_string()),
            scheduled_at: Set(None),
            paid_at: Set(None),
            notes: Set(form.notes.filter(|n| !n.trim().is_empty())),
            created_at: Set(Some(Utc::now())),
        };
        payouts::Entity::insert(model).exec(conn).await?;

        Ok(id)
    }

    pub async fn set_status(&self, id: Uuid, status: &str) -> AppResult<PayoutStatus> {
        let status = PayoutStatus::parse(status.trim())?;

        let conn = self.backend.conn()?;

        let result = payouts::Entity::update_many()
            .set(transition(status, Utc::now()))
            .filter(payouts::Column::Id.eq(id))
            .exec(conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Payout not found".to_string()));
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue::{NotSet, Set};

    #[test]
    fn test_paid_transition_stamps_paid_at() {
        let now = Utc::now();
        let model = transition(PayoutStatus::Paid, now);

        assert_eq!(model.status, Set("paid".to_string()));
        assert_eq!(model.paid_at, Set(Some(now)));
        assert_eq!(model.scheduled_at, NotSet);
    }

    #[test]
    fn test_queued_transition_clears_paid_at() {
        let now = Utc::now();
        let model = transition(PayoutStatus::Queued, now);

        assert_eq!(model.status, Set("queued".to_string()));
        assert_eq!(model.paid_at, Set(None));
    }

    #[test]
    fn test_scheduled_transition_stamps_scheduled_at() {
        let now = Utc::now();
        let model = transition(PayoutStatus::Scheduled, now);

        assert_eq!(model.scheduled_at, Set(Some(now)));
        assert_eq!(model.paid_at, NotSet);
    }

    #[tokio::test]
    async fn test_unknown_status_is_rejected_before_any_write() {
        let service = PayoutService::new(Backend::unavailable());

        assert!(matches!(
            service.set_status(Uuid::new_v4(), "teleported").await,
            Err(AppError::ValidationError(_))
        ));
    }
}
