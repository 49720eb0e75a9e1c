use crate::database::Backend;
use crate::entities::venue_entity as venues;
use crate::error::{AppError, AppResult};
use crate::models::{VenueForm, VenueRow, VenueStats, VenuesPage};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set, Unchanged};
use uuid::Uuid;

const PAGE_LIMIT: u64 = 100;

/// Numeric venue fields coerce silently: anything that does not parse
/// becomes null rather than a form error.
fn coerce_capacity(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|s| s.trim().parse::<i32>().ok())
        .filter(|c| *c > 0)
}

fn coerce_rating(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite())
}

fn coerce_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(str::trim),
        Some("true") | Some("on") | Some("1")
    )
}

fn summarize(models: &[venues::Model]) -> VenueStats {
    let total = models.len() as i64;
    let live = models.iter().filter(|v| v.is_live).count() as i64;

    let ratings: Vec<f64> = models.iter().filter_map(|v| v.rating).collect();
    let avg_rating = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    };

    let total_capacity = models.iter().filter_map(|v| v.capacity).map(i64::from).sum();

    VenueStats {
        total,
        live,
        avg_rating,
        total_capacity,
    }
}

#[derive(Clone)]
pub struct VenueService {
    backend: Backend,
}

impl VenueService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn page(&self) -> AppResult<VenuesPage> {
        let conn = self.backend.conn()?;

        let models = venues::Entity::find()
            .order_by_desc(venues::Column::CreatedAt)
            .limit(PAGE_LIMIT)
            .all(conn)
            .await?;

        let stats = summarize(&models);
        Ok(VenuesPage {
            stats,
            venues: models.into_iter().map(VenueRow::from).collect(),
            notice: None,
        })
    }

    pub async fn create(&self, form: VenueForm) -> AppResult<Uuid> {
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }

        let conn = self.backend.conn()?;
        let id = Uuid::new_v4();
        let now = Utc::now();

        let model = venues::ActiveModel {
            id: Set(id),
            name: Set(name),
            city: Set(form.city.filter(|c| !c.trim().is_empty())),
            venue_type: Set(form.venue_type.filter(|t| !t.trim().is_empty())),
            capacity: Set(coerce_capacity(form.capacity.as_deref())),
            rating: Set(coerce_rating(form.rating.as_deref())),
            open_hours: Set(form.open_hours.filter(|h| !h.trim().is_empty())),
            is_live: Set(coerce_flag(form.is_live.as_deref())),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };
        venues::Entity::insert(model).exec(conn).await?;

        Ok(id)
    }

    pub async fn update(&self, id: Uuid, form: VenueForm) -> AppResult<()> {
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError("Name is required".to_string()));
        }

        let conn = self.backend.conn()?;

        let model = venues::ActiveModel {
            id: Unchanged(id),
            name: Set(name),
            city: Set(form.city.filter(|c| !c.trim().is_empty())),
            venue_type: Set(form.venue_type.filter(|t| !t.trim().is_empty())),
            capacity: Set(coerce_capacity(form.capacity.as_deref())),
            rating: Set(coerce_rating(form.rating.as_deref())),
            open_hours: Set(form.open_hours.filter(|h| !h.trim().is_empty())),
            is_live: Set(coerce_flag(form.is_live.as_deref())),
            updated_at: Set(Some(Utc::now())),
            ..Default::default()
        };
        model.update(conn).await?;

        Ok(())
    }

    /// Permanent delete of exactly one row by id.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.backend.conn()?;

        let result = venues::Entity::delete_by_id(id).exec(conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Venue not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn venue(is_live: bool, capacity: Option<i32>, rating: Option<f64>) -> venues::Model {
        venues::Model {
            id: Uuid::new_v4(),
            name: "The Vault".to_string(),
            city: None,
            venue_type: None,
            capacity,
            rating,
            open_hours: None,
            is_live,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_capacity_and_rating_coerce_silently_to_none() {
        assert_eq!(coerce_capacity(Some("250")), Some(250));
        assert_eq!(coerce_capacity(Some("abc")), None);
        assert_eq!(coerce_capacity(Some("-5")), None);
        assert_eq!(coerce_capacity(None), None);

        assert_eq!(coerce_rating(Some("4.5")), Some(4.5));
        assert_eq!(coerce_rating(Some("four")), None);
        assert_eq!(coerce_rating(Some("NaN")), None);
    }

    #[test]
    fn test_summarize_over_fetched_rows() {
        let models = vec![
            venue(true, Some(100), Some(4.0)),
            venue(false, Some(50), Some(3.0)),
            venue(true, None, None),
        ];

        let stats = summarize(&models);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.live, 2);
        assert_eq!(stats.total_capacity, 150);
        assert!((stats.avg_rating - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_empty_page_has_zero_stats() {
        let stats = summarize(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_rating, 0.0);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row_by_id() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let service = VenueService::new(Backend::from_connection(conn));

        assert!(service.delete(Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_of_unknown_id_is_not_found() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = VenueService::new(Backend::from_connection(conn));

        assert!(matches!(
            service.delete(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_requires_a_name_before_any_write() {
        let service = VenueService::new(Backend::unavailable());
        let form = VenueForm {
            name: "  ".to_string(),
            city: None,
            venue_type: None,
            capacity: None,
            rating: None,
            open_hours: None,
            is_live: None,
        };

        match service.create(form).await {
            Err(AppError::ValidationError(_)) => {}
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
