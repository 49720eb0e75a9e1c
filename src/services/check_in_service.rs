use crate::database::Backend;
use crate::entities::check_in_entity as check_ins;
use crate::error::{AppError, AppResult};
use crate::models::{CheckInRow, CheckInStats, CheckInsPage};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

const PAGE_LIMIT: u64 = 100;

fn summarize(models: &[check_ins::Model], now: DateTime<Utc>) -> CheckInStats {
    let day_ago = now - Duration::hours(24);

    let total = models.len() as i64;
    let active = models.iter().filter(|c| c.expires_at > now).count() as i64;
    let created_last_24h = models
        .iter()
        .filter(|c| c.created_at.map(|t| t >= day_ago).unwrap_or(false))
        .count() as i64;

    CheckInStats {
        total,
        active,
        expired: total - active,
        created_last_24h,
    }
}

#[derive(Clone)]
pub struct CheckInService {
    backend: Backend,
}

impl CheckInService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn page(&self, now: DateTime<Utc>) -> AppResult<CheckInsPage> {
        let conn = self.backend.conn()?;

        let models = check_ins::Entity::find()
            .order_by_desc(check_ins::Column::CreatedAt)
            .limit(PAGE_LIMIT)
            .all(conn)
            .await?;

        let stats = summarize(&models, now);
        let check_ins = models
            .into_iter()
            .map(|model| CheckInRow::from_model(model, now))
            .collect();

        Ok(CheckInsPage {
            stats,
            check_ins,
            notice: None,
        })
    }

    /// Force-expire a check-in by moving its expiry to now.
    pub async fn expire(&self, id: Uuid) -> AppResult<()> {
        let conn = self.backend.conn()?;

        let result = check_ins::Entity::update_many()
            .set(check_ins::ActiveModel {
                expires_at: Set(Utc::now()),
                ..Default::default()
            })
            .filter(check_ins::Column::Id.eq(id))
            .exec(conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Check-in not found".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.backend.conn()?;

        let result = check_ins::Entity::delete_by_id(id).exec(conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Check-in not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_in(expires_at: DateTime<Utc>, created_at: Option<DateTime<Utc>>) -> check_ins::Model {
        check_ins::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            venue_id: Uuid::new_v4(),
            expires_at,
            created_at,
        }
    }

    #[test]
    fn test_active_means_expiry_in_the_future() {
        let now = Utc::now();
        let models = vec![
            check_in(now + Duration::hours(1), Some(now)),
            check_in(now - Duration::minutes(1), Some(now)),
        ];

        let stats = summarize(&models, now);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.expired, 1);
    }

    #[test]
    fn test_created_window_is_trailing_24h() {
        let now = Utc::now();
        let models = vec![
            check_in(now, Some(now - Duration::hours(2))),
            check_in(now, Some(now - Duration::hours(25))),
            check_in(now, None),
        ];

        let stats = summarize(&models, now);
        assert_eq!(stats.created_last_24h, 1);
    }
}
