use crate::database::Backend;
use crate::entities::{
    check_in_entity as check_ins, connection_request_entity as connection_requests,
    credit_transaction_entity as credit_transactions, profile_entity as profiles,
    venue_entity as venues,
};
use crate::error::AppResult;
use crate::models::{AlertEntry, DashboardPage, DashboardStats, UpcomingVenue};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

/// Recent check-ins sampled for the active/idle split.
const CHECK_IN_SAMPLE: u64 = 100;

fn build_alerts(pending_requests: usize, idle_check_ins: usize) -> Vec<AlertEntry> {
    let mut alerts = Vec::new();
    if pending_requests > 0 {
        alerts.push(AlertEntry::warning(format!(
            "{pending_requests} pending connection requests"
        )));
    }
    if idle_check_ins > 0 {
        alerts.push(AlertEntry::warning(format!(
            "{idle_check_ins} check-ins past expiry"
        )));
    }
    if alerts.is_empty() {
        alerts.push(AlertEntry::info("All clear"));
    }
    alerts
}

fn assemble(
    live_venues: u64,
    new_users_7d: u64,
    recent_check_ins: &[check_ins::Model],
    purchases_24h: &[credit_transactions::Model],
    pending_requests: usize,
    upcoming: Vec<venues::Model>,
    now: DateTime<Utc>,
) -> DashboardPage {
    let active_check_ins = recent_check_ins
        .iter()
        .filter(|c| c.expires_at > now)
        .count();
    let idle_check_ins = recent_check_ins.len() - active_check_ins;

    let credits_sold_24h = purchases_24h.iter().map(|p| p.amount).sum();

    DashboardPage {
        stats: DashboardStats {
            live_venues: live_venues as i64,
            active_check_ins: active_check_ins as i64,
            credits_sold_24h,
            new_users_7d: new_users_7d as i64,
        },
        alerts: build_alerts(pending_requests, idle_check_ins),
        upcoming: upcoming
            .into_iter()
            .map(|v| UpcomingVenue {
                id: v.id,
                name: v.name,
                city: v.city,
                updated_at: v.updated_at,
            })
            .collect(),
        notice: None,
    }
}

#[derive(Clone)]
pub struct DashboardService {
    backend: Backend,
}

impl DashboardService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Home page overview. The six queries are issued concurrently and
    /// awaited together; this is purely for latency, results are only
    /// assembled once all complete.
    pub async fn overview(&self, now: DateTime<Utc>) -> AppResult<DashboardPage> {
        let conn = self.backend.conn()?;
        let day_ago = now - Duration::hours(24);
        let week_ago = now - Duration::days(7);

        let live_venues = venues::Entity::find()
            .filter(venues::Column::IsLive.eq(true))
            .count(conn);
        let new_users = profiles::Entity::find()
            .filter(profiles::Column::CreatedAt.gte(week_ago))
            .count(conn);
        let recent_check_ins = check_ins::Entity::find()
            .order_by_desc(check_ins::Column::CreatedAt)
            .limit(CHECK_IN_SAMPLE)
            .all(conn);
        let purchases = credit_transactions::Entity::find()
            .filter(credit_transactions::Column::TransactionType.eq("purchase"))
            .filter(credit_transactions::Column::CreatedAt.gte(day_ago))
            .all(conn);
        let pending_requests = connection_requests::Entity::find()
            .filter(connection_requests::Column::Status.eq("pending"))
            .all(conn);
        let upcoming = venues::Entity::find()
            .order_by_desc(venues::Column::UpdatedAt)
            .limit(2)
            .all(conn);

        let (live_venues, new_users, recent_check_ins, purchases, pending_requests, upcoming) =
            tokio::try_join!(
                live_venues,
                new_users,
                recent_check_ins,
                purchases,
                pending_requests,
                upcoming
            )?;

        Ok(assemble(
            live_venues,
            new_users,
            &recent_check_ins,
            &purchases,
            pending_requests.len(),
            upcoming,
            now,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use uuid::Uuid;

    fn check_in(expires_at: DateTime<Utc>) -> check_ins::Model {
        check_ins::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            venue_id: Uuid::new_v4(),
            expires_at,
            created_at: None,
        }
    }

    fn purchase(amount: i64) -> credit_transactions::Model {
        credit_transactions::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            transaction_type: "purchase".to_string(),
            amount,
            price: None,
            created_at: None,
        }
    }

    #[test]
    fn test_alerts_default_to_all_clear() {
        let alerts = build_alerts(0, 0);
        assert_eq!(alerts, vec![AlertEntry::info("All clear")]);
    }

    #[test]
    fn test_alerts_flag_pending_requests_and_idle_check_ins() {
        let alerts = build_alerts(3, 1);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].message, "3 pending connection requests");
        assert_eq!(alerts[1].message, "1 check-ins past expiry");
    }

    #[test]
    fn test_assemble_derives_stats_from_fetched_rows() {
        let now = Utc::now();
        let recent = vec![
            check_in(now + Duration::hours(2)),
            check_in(now - Duration::hours(1)),
        ];
        let purchases = vec![purchase(100), purchase(50)];

        let page = assemble(4, 7, &recent, &purchases, 0, Vec::new(), now);

        assert_eq!(page.stats.live_venues, 4);
        assert_eq!(page.stats.new_users_7d, 7);
        assert_eq!(page.stats.active_check_ins, 1);
        assert_eq!(page.stats.credits_sold_24h, 150);
        // One expired check-in in the sample trips the idle alert.
        assert_eq!(page.alerts[0].message, "1 check-ins past expiry");
    }

    #[tokio::test]
    async fn test_unconfigured_backend_attempts_no_query() {
        let service = DashboardService::new(Backend::unavailable());

        assert!(matches!(
            service.overview(Utc::now()).await,
            Err(AppError::BackendUnavailable)
        ));
    }
}
