use crate::database::Backend;
use crate::entities::user_activity_entity as user_activities;
use crate::error::{AppError, AppResult};
use crate::models::{ActivityForm, ActivityRow, ActivityStats, NotificationsPage, SegmentBucket};
use crate::utils::{SEGMENT_FALLBACK, parse_segment_title};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{EntityTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

const PAGE_LIMIT: u64 = 30;

/// Segment resolution: the structured column wins; legacy rows without one
/// fall back to the "[segment:name]" title-prefix convention.
fn segment_and_title(model: &user_activities::Model) -> (String, String) {
    if let Some(segment) = model
        .segment
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return (segment.to_string(), model.title.clone());
    }
    parse_segment_title(&model.title)
}

fn summarize(rows: &[ActivityRow], now: DateTime<Utc>) -> ActivityStats {
    let day_ago = now - Duration::hours(24);

    let total = rows.len() as i64;
    let last_24h = rows
        .iter()
        .filter(|r| r.created_at.map(|t| t >= day_ago).unwrap_or(false))
        .count() as i64;

    let mut segments: Vec<SegmentBucket> = Vec::new();
    for row in rows {
        match segments.iter_mut().find(|b| b.segment == row.segment) {
            Some(bucket) => bucket.count += 1,
            None => segments.push(SegmentBucket {
                segment: row.segment.clone(),
                count: 1,
            }),
        }
    }
    segments.sort_by(|a, b| b.count.cmp(&a.count));

    ActivityStats {
        total,
        last_24h,
        segments,
    }
}

#[derive(Clone)]
pub struct ActivityService {
    backend: Backend,
}

impl ActivityService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn page(&self, now: DateTime<Utc>) -> AppResult<NotificationsPage> {
        let conn = self.backend.conn()?;

        let models = user_activities::Entity::find()
            .order_by_desc(user_activities::Column::CreatedAt)
            .limit(PAGE_LIMIT)
            .all(conn)
            .await?;

        let activities: Vec<ActivityRow> = models
            .into_iter()
            .map(|model| {
                let (segment, title) = segment_and_title(&model);
                ActivityRow {
                    id: model.id,
                    segment,
                    title,
                    description: model.description,
                    created_at: model.created_at,
                }
            })
            .collect();

        let stats = summarize(&activities, now);
        Ok(NotificationsPage {
            stats,
            activities,
            notice: None,
        })
    }

    /// New rows always get a structured segment; titles are stored verbatim
    /// with no prefix encoding.
    pub async fn create(&self, form: ActivityForm) -> AppResult<Uuid> {
        let title = form.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::ValidationError("Title is required".to_string()));
        }

        let segment = form
            .segment
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(SEGMENT_FALLBACK)
            .to_string();

        let conn = self.backend.conn()?;
        let id = Uuid::new_v4();

        let model = user_activities::ActiveModel {
            id: Set(id),
            title: Set(title),
            description: Set(form.description.filter(|d| !d.trim().is_empty())),
            segment: Set(Some(segment)),
            created_at: Set(Some(Utc::now())),
        };
        user_activities::Entity::insert(model).exec(conn).await?;

        Ok(id)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.backend.conn()?;

        let result = user_activities::Entity::delete_by_id(id).exec(conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(title: &str, segment: Option<&str>) -> user_activities::Model {
        user_activities::Model {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            segment: segment.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn test_structured_segment_wins_over_legacy_title_prefix() {
        let model = activity("[segment:vip] Welcome", Some("launch"));

        let (segment, title) = segment_and_title(&model);
        assert_eq!(segment, "launch");
        assert_eq!(title, "[segment:vip] Welcome");
    }

    #[test]
    fn test_legacy_row_falls_back_to_title_prefix() {
        let model = activity("[segment:vip] Welcome", None);

        let (segment, title) = segment_and_title(&model);
        assert_eq!(segment, "vip");
        assert_eq!(title, "Welcome");
    }

    #[test]
    fn test_plain_title_buckets_to_general() {
        let model = activity("Plain", None);

        let (segment, title) = segment_and_title(&model);
        assert_eq!(segment, "general");
        assert_eq!(title, "Plain");
    }

    #[test]
    fn test_segment_buckets_sort_by_count() {
        let rows = vec![
            ActivityRow {
                id: Uuid::new_v4(),
                segment: "vip".to_string(),
                title: "a".to_string(),
                description: None,
                created_at: None,
            },
            ActivityRow {
                id: Uuid::new_v4(),
                segment: "general".to_string(),
                title: "b".to_string(),
                description: None,
                created_at: None,
            },
            ActivityRow {
                id: Uuid::new_v4(),
                segment: "general".to_string(),
                title: "c".to_string(),
                description: None,
                created_at: None,
            },
        ];

        let stats = summarize(&rows, Utc::now());
        assert_eq!(stats.segments[0].segment, "general");
        assert_eq!(stats.segments[0].count, 2);
        assert_eq!(stats.segments[1].segment, "vip");
    }
}
