use crate::database::Backend;
use crate::entities::{
    conversation_entity as conversations,
    conversation_participant_entity as participants,
};
use crate::error::{AppError, AppResult};
use crate::models::{ConversationRow, ConversationStats, ConversationsPage};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::collections::HashMap;
use uuid::Uuid;

const PAGE_LIMIT: u64 = 20;

/// Rooms with this many participants are flagged for review.
const DISPUTE_THRESHOLD: i64 = 3;

/// Stats over the fetched page only (most-recent 20 conversations), not
/// the whole table. The average participant figure is therefore a sample
/// over that page; the test below pins this on purpose.
fn summarize(rows: &[(conversations::Model, i64)], now: DateTime<Utc>) -> ConversationStats {
    let hour_ago = now - Duration::minutes(60);

    let total = rows.len() as i64;
    let active_rooms = rows
        .iter()
        .filter(|(c, _)| c.created_at.map(|t| t >= hour_ago).unwrap_or(false))
        .count() as i64;
    let disputes = rows
        .iter()
        .filter(|(_, count)| *count >= DISPUTE_THRESHOLD)
        .count() as i64;

    let participant_total: i64 = rows.iter().map(|(_, count)| count).sum();
    let avg_participants = if total == 0 {
        0.0
    } else {
        participant_total as f64 / total as f64
    };

    ConversationStats {
        total,
        active_rooms,
        avg_participants,
        disputes,
    }
}

#[derive(Clone)]
pub struct ConversationService {
    backend: Backend,
}

impl ConversationService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn page(&self, now: DateTime<Utc>) -> AppResult<ConversationsPage> {
        let conn = self.backend.conn()?;

        let models = conversations::Entity::find()
            .order_by_desc(conversations::Column::CreatedAt)
            .limit(PAGE_LIMIT)
            .all(conn)
            .await?;

        let ids: Vec<Uuid> = models.iter().map(|c| c.id).collect();
        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        if !ids.is_empty() {
            let members = participants::Entity::find()
                .filter(participants::Column::ConversationId.is_in(ids))
                .all(conn)
                .await?;
            for member in members {
                *counts.entry(member.conversation_id).or_insert(0) += 1;
            }
        }

        let rows: Vec<(conversations::Model, i64)> = models
            .into_iter()
            .map(|c| {
                let count = counts.get(&c.id).copied().unwrap_or(0);
                (c, count)
            })
            .collect();

        let stats = summarize(&rows, now);
        let conversations = rows
            .into_iter()
            .map(|(c, participants)| ConversationRow {
                id: c.id,
                venue_id: c.venue_id,
                participants,
                created_at: c.created_at,
                disputed: participants >= DISPUTE_THRESHOLD,
            })
            .collect();

        Ok(ConversationsPage {
            stats,
            conversations,
            notice: None,
        })
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.backend.conn()?;

        let result = conversations::Entity::delete_by_id(id).exec(conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Conversation not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(created_at: Option<DateTime<Utc>>, participants: i64) -> (conversations::Model, i64) {
        (
            conversations::Model {
                id: Uuid::new_v4(),
                venue_id: None,
                created_at,
            },
            participants,
        )
    }

    #[test]
    fn test_three_participants_count_as_a_dispute_two_do_not() {
        let now = Utc::now();
        let rows = vec![room(Some(now), 3), room(Some(now), 2)];

        let stats = summarize(&rows, now);
        assert_eq!(stats.disputes, 1);
    }

    #[test]
    fn test_active_rooms_use_a_sixty_minute_window() {
        let now = Utc::now();
        let rows = vec![
            room(Some(now - Duration::minutes(10)), 2),
            room(Some(now - Duration::minutes(59)), 2),
            room(Some(now - Duration::minutes(61)), 2),
            room(None, 2),
        ];

        let stats = summarize(&rows, now);
        assert_eq!(stats.active_rooms, 2);
    }

    #[test]
    fn test_avg_participants_is_a_sample_over_the_fetched_page() {
        // Deliberate behavior: the divisor is the fetched row count, not
        // the table size, so the figure shifts with page contents.
        let now = Utc::now();
        let rows = vec![room(Some(now), 4), room(Some(now), 2)];

        let stats = summarize(&rows, now);
        assert!((stats.avg_participants - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_page_yields_zero_average() {
        let stats = summarize(&[], Utc::now());
        assert_eq!(stats.avg_participants, 0.0);
        assert_eq!(stats.total, 0);
    }
}
