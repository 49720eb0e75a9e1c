use crate::database::Backend;
use crate::entities::app_guide_entity as app_guides;
use crate::error::{AppError, AppResult};
use crate::models::{GuideForm, GuideRow, GuideStats, GuidesPage, parse_steps, serialize_steps};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set, Unchanged};
use uuid::Uuid;

const PAGE_LIMIT: u64 = 100;

fn summarize(rows: &[GuideRow], now: DateTime<Utc>) -> GuideStats {
    let week_ago = now - Duration::days(7);

    GuideStats {
        total: rows.len() as i64,
        updated_last_7d: rows
            .iter()
            .filter(|g| g.updated_at.map(|t| t >= week_ago).unwrap_or(false))
            .count() as i64,
        total_steps: rows.iter().map(|g| g.steps.len() as i64).sum(),
    }
}

/// Normalize the textarea contents through a parse/serialize round trip so
/// stored steps are always one trimmed line each.
fn normalize_steps(raw: Option<&str>) -> String {
    serialize_steps(&parse_steps(raw.unwrap_or("")))
}

#[derive(Clone)]
pub struct GuideService {
    backend: Backend,
}

impl GuideService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn page(&self, now: DateTime<Utc>) -> AppResult<GuidesPage> {
        let conn = self.backend.conn()?;

        let models = app_guides::Entity::find()
            .order_by_desc(app_guides::Column::CreatedAt)
            .limit(PAGE_LIMIT)
            .all(conn)
            .await?;

        let guides: Vec<GuideRow> = models.into_iter().map(GuideRow::from).collect();
        let stats = summarize(&guides, now);

        Ok(GuidesPage {
            stats,
            guides,
            notice: None,
        })
    }

    pub async fn create(&self, form: GuideForm) -> AppResult<Uuid> {
        let slug = form.slug.trim().to_string();
        let title = form.title.trim().to_string();
        if slug.is_empty() || title.is_empty() {
            return Err(AppError::ValidationError(
                "Slug and title are required".to_string(),
            ));
        }

        let conn = self.backend.conn()?;
        let id = Uuid::new_v4();
        let now = Utc::now();

        let model = app_guides::ActiveModel {
            id: Set(id),
            slug: Set(slug),
            title: Set(title),
            subtitle: Set(form.subtitle.filter(|s| !s.trim().is_empty())),
            steps: Set(normalize_steps(form.steps.as_deref())),
            media_url: Set(form.media_url.filter(|m| !m.trim().is_empty())),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
        };
        app_guides::Entity::insert(model).exec(conn).await?;

        Ok(id)
    }

    pub async fn update(&self, id: Uuid, form: GuideForm) -> AppResult<()> {
        let slug = form.slug.trim().to_string();
        let title = form.title.trim().to_string();
        if slug.is_empty() || title.is_empty() {
            return Err(AppError::ValidationError(
                "Slug and title are required".to_string(),
            ));
        }

        let conn = self.backend.conn()?;

        let model = app_guides::ActiveModel {
            id: Unchanged(id),
            slug: Set(slug),
            title: Set(title),
            subtitle: Set(form.subtitle.filter(|s| !s.trim().is_empty())),
            steps: Set(normalize_steps(form.steps.as_deref())),
            media_url: Set(form.media_url.filter(|m| !m.trim().is_empty())),
            updated_at: Set(Some(Utc::now())),
            ..Default::default()
        };
        model.update(conn).await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.backend.conn()?;

        let result = app_guides::Entity::delete_by_id(id).exec(conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Guide not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_steps_drops_blank_lines_and_trims() {
        assert_eq!(
            normalize_steps(Some("Open the app\n\n  Tap a venue  \n")),
            "Open the app\nTap a venue"
        );
        assert_eq!(normalize_steps(None), "");
    }

    #[test]
    fn test_summarize_counts_steps_across_guides() {
        let now = Utc::now();
        let guide = |steps: Vec<&str>, updated: Option<DateTime<Utc>>| GuideRow {
            id: Uuid::new_v4(),
            slug: "s".to_string(),
            title: "t".to_string(),
            subtitle: None,
            steps: steps.into_iter().map(str::to_string).collect(),
            media_url: None,
            updated_at: updated,
        };

        let rows = vec![
            guide(vec!["a", "b"], Some(now - Duration::days(1))),
            guide(vec!["c"], Some(now - Duration::days(10))),
        ];

        let stats = summarize(&rows, now);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.updated_last_7d, 1);
        assert_eq!(stats.total_steps, 3);
    }
}
