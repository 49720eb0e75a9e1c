use crate::database::Backend;
use crate::entities::profile_entity as profiles;
use crate::error::{AppError, AppResult};
use crate::models::{PrivacyForm, UserRow, UserStats, UsersPage};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

const PAGE_LIMIT: u64 = 100;

fn summarize(models: &[profiles::Model], now: DateTime<Utc>) -> UserStats {
    let week_ago = now - Duration::days(7);

    UserStats {
        total: models.len() as i64,
        new_last_7d: models
            .iter()
            .filter(|p| p.created_at.map(|t| t >= week_ago).unwrap_or(false))
            .count() as i64,
        private_count: models.iter().filter(|p| p.is_private).count() as i64,
    }
}

#[derive(Clone)]
pub struct ProfileService {
    backend: Backend,
}

impl ProfileService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn page(&self, now: DateTime<Utc>) -> AppResult<UsersPage> {
        let conn = self.backend.conn()?;

        let models = profiles::Entity::find()
            .order_by_desc(profiles::Column::CreatedAt)
            .limit(PAGE_LIMIT)
            .all(conn)
            .await?;

        let stats = summarize(&models, now);
        Ok(UsersPage {
            stats,
            users: models.into_iter().map(UserRow::from).collect(),
            notice: None,
        })
    }

    pub async fn set_privacy(&self, id: Uuid, form: PrivacyForm) -> AppResult<()> {
        let is_private = matches!(form.is_private.trim(), "true" | "on" | "1");

        let conn = self.backend.conn()?;

        let result = profiles::Entity::update_many()
            .set(profiles::ActiveModel {
                is_private: Set(is_private),
                ..Default::default()
            })
            .filter(profiles::Column::Id.eq(id))
            .exec(conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Profile not found".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.backend.conn()?;

        let result = profiles::Entity::delete_by_id(id).exec(conn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Profile not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(created_at: Option<DateTime<Utc>>, is_private: bool) -> profiles::Model {
        profiles::Model {
            id: Uuid::new_v4(),
            first_name: None,
            last_name: None,
            city: None,
            country: None,
            is_private,
            created_at,
        }
    }

    #[test]
    fn test_new_user_window_is_trailing_7d() {
        let now = Utc::now();
        let models = vec![
            profile(Some(now - Duration::days(2)), false),
            profile(Some(now - Duration::days(8)), true),
            profile(None, true),
        ];

        let stats = summarize(&models, now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.new_last_7d, 1);
        assert_eq!(stats.private_count, 2);
    }
}
