use crate::database::Backend;
use crate::entities::credit_transaction_entity as credit_transactions;
use crate::error::{AppError, AppResult};
use crate::models::{CreditAdjustmentForm, CreditRow, CreditStats, PackageBucket};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{EntityTrait, QueryOrder, QuerySelect, Set};
use std::cmp::Ordering;
use uuid::Uuid;

const PAGE_LIMIT: u64 = 30;

/// Group purchases into package buckets keyed by their price label:
/// `"$" + price` to two decimals when a price is present, else "Custom".
/// Sold accumulates the credit amount, revenue the price, and buckets come
/// back sorted by revenue descending.
pub fn bucket_packages(rows: &[credit_transactions::Model]) -> Vec<PackageBucket> {
    let mut buckets: Vec<PackageBucket> = Vec::new();

    for row in rows.iter().filter(|r| r.transaction_type == "purchase") {
        let label = match row.price {
            Some(price) => format!("${price:.2}"),
            None => "Custom".to_string(),
        };

        match buckets.iter_mut().find(|b| b.label == label) {
            Some(bucket) => {
                bucket.sold += row.amount;
                bucket.revenue += row.price.unwrap_or(0.0);
            }
            None => buckets.push(PackageBucket {
                label,
                sold: row.amount,
                revenue: row.price.unwrap_or(0.0),
            }),
        }
    }

    buckets.sort_by(|a, b| b.revenue.partial_cmp(&a.revenue).unwrap_or(Ordering::Equal));
    buckets
}

fn summarize(rows: &[credit_transactions::Model], now: DateTime<Utc>) -> CreditStats {
    let day_ago = now - Duration::hours(24);

    let mut stats = CreditStats::default();
    for row in rows {
        let recent = row.created_at.map(|t| t >= day_ago).unwrap_or(false);
        match row.transaction_type.as_str() {
            "purchase" => {
                if recent {
                    stats.purchased_last_24h += row.amount;
                }
                stats.revenue += row.price.unwrap_or(0.0);
            }
            "redeem" => {
                if recent {
                    stats.redeemed_last_24h += row.amount;
                }
            }
            _ => {}
        }
    }
    stats
}

#[derive(Clone)]
pub struct CreditService {
    backend: Backend,
}

impl CreditService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn page(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<(CreditStats, Vec<PackageBucket>, Vec<CreditRow>)> {
        let conn = self.backend.conn()?;

        let models = credit_transactions::Entity::find()
            .order_by_desc(credit_transactions::Column::CreatedAt)
            .limit(PAGE_LIMIT)
            .all(conn)
            .await?;

        let stats = summarize(&models, now);
        let packages = bucket_packages(&models);
        let rows = models.into_iter().map(CreditRow::from).collect();

        Ok((stats, packages, rows))
    }

    /// Manual credit adjustment. The amount must parse to a positive whole
    /// number; anything else, fractions included, is rejected before any
    /// write.
    pub async fn record_adjustment(&self, form: CreditAdjustmentForm) -> AppResult<Uuid> {
        let user_id = Uuid::parse_str(form.user_id.trim())
            .map_err(|_| AppError::ValidationError("Invalid user id".to_string()))?;

        let amount: i64 = form
            .amount
            .trim()
            .parse()
            .map_err(|_| AppError::ValidationError("Amount must be a whole number".to_string()))?;
        if amount <= 0 {
            return Err(AppError::ValidationError(
                "Amount must be a positive number".to_string(),
            ));
        }

        let transaction_type = form
            .transaction_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("adjustment")
            .to_string();

        // Price coerces silently, matching the venue numeric policy.
        let price = form
            .price
            .as_deref()
            .and_then(|p| p.trim().parse::<f64>().ok())
            .filter(|p| p.is_finite());

        let conn = self.backend.conn()?;
        let id = Uuid::new_v4();

        let model = credit_transactions::ActiveModel {
            id: Set(id),
            user_id: Set(user_id),
            transaction_type: Set(transaction_type),
            amount: Set(amount),
            price: Set(price),
            created_at: Set(Some(Utc::now())),
        };
        credit_transactions::Entity::insert(model).exec(conn).await?;

        Ok(id)
    }

    pub async fn delete_transaction(&self, id: Uuid) -> AppResult<()> {
        let conn = self.backend.conn()?;

        let result = credit_transactions::Entity::delete_by_id(id)
            .exec(conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Transaction not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(
        transaction_type: &str,
        amount: i64,
        price: Option<f64>,
        created_at: Option<DateTime<Utc>>,
    ) -> credit_transactions::Model {
        credit_transactions::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            transaction_type: transaction_type.to_string(),
            amount,
            price,
            created_at,
        }
    }

    #[test]
    fn test_same_price_purchases_share_a_bucket() {
        let rows = vec![
            tx("purchase", 10, Some(5.0), None),
            tx("purchase", 5, Some(5.0), None),
        ];

        let buckets = bucket_packages(&rows);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "$5.00");
        assert_eq!(buckets[0].sold, 15);
        assert!((buckets[0].revenue - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_priceless_purchase_buckets_under_custom() {
        let rows = vec![tx("purchase", 20, None, None)];

        let buckets = bucket_packages(&rows);
        assert_eq!(buckets[0].label, "Custom");
        assert_eq!(buckets[0].sold, 20);
        assert_eq!(buckets[0].revenue, 0.0);
    }

    #[test]
    fn test_buckets_sort_by_revenue_descending() {
        let rows = vec![
            tx("purchase", 1, Some(2.0), None),
            tx("purchase", 1, Some(9.0), None),
            tx("redeem", 50, None, None),
        ];

        let buckets = bucket_packages(&rows);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "$9.00");
        assert_eq!(buckets[1].label, "$2.00");
    }

    #[test]
    fn test_summarize_uses_trailing_24h_window() {
        let now = Utc::now();
        let rows = vec![
            tx("purchase", 10, Some(5.0), Some(now - Duration::hours(1))),
            tx("purchase", 10, Some(5.0), Some(now - Duration::hours(30))),
            tx("redeem", 4, None, Some(now - Duration::hours(2))),
        ];

        let stats = summarize(&rows, now);
        assert_eq!(stats.purchased_last_24h, 10);
        assert_eq!(stats.redeemed_last_24h, 4);
        // Revenue counts every fetched purchase regardless of window.
        assert!((stats.revenue - 10.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_non_numeric_amount_is_rejected_before_any_write() {
        let service = CreditService::new(Backend::unavailable());
        let form = CreditAdjustmentForm {
            user_id: Uuid::new_v4().to_string(),
            transaction_type: None,
            amount: "abc".to_string(),
            price: None,
        };

        match service.record_adjustment(form).await {
            Err(AppError::ValidationError(msg)) => {
                assert_eq!(msg, "Amount must be a whole number");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fractional_amount_is_rejected_before_any_write() {
        let service = CreditService::new(Backend::unavailable());
        let form = CreditAdjustmentForm {
            user_id: Uuid::new_v4().to_string(),
            transaction_type: None,
            amount: "10.5".to_string(),
            price: None,
        };

        match service.record_adjustment(form).await {
            Err(AppError::ValidationError(msg)) => {
                assert_eq!(msg, "Amount must be a whole number");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_positive_amount_is_rejected() {
        let service = CreditService::new(Backend::unavailable());
        let form = CreditAdjustmentForm {
            user_id: Uuid::new_v4().to_string(),
            transaction_type: None,
            amount: "-3".to_string(),
            price: None,
        };

        assert!(matches!(
            service.record_adjustment(form).await,
            Err(AppError::ValidationError(_))
        ));
    }
}
