use crate::database::Backend;
use crate::entities::admin_entity as admins;
use crate::error::{AppError, AppResult};
use crate::models::{AdminCreateForm, AdminRow};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

const PAGE_LIMIT: u64 = 100;

#[derive(Clone)]
pub struct AdminService {
    backend: Backend,
}

impl AdminService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub async fn list(&self) -> AppResult<Vec<AdminRow>> {
        let conn = self.backend.conn()?;

        let models = admins::Entity::find()
            .order_by_desc(admins::Column::CreatedAt)
            .limit(PAGE_LIMIT)
            .all(conn)
            .await?;

        Ok(models.into_iter().map(AdminRow::from).collect())
    }

    /// Add an allow-list entry. Emails are lower-cased at write time since
    /// they are the lookup key.
    pub async fn create(&self, form: AdminCreateForm) -> AppResult<Uuid> {
        let email = form.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::ValidationError(
                "A valid email is required".to_string(),
            ));
        }

        let role = form
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or("operator")
            .to_string();

        let conn = self.backend.conn()?;
        let id = Uuid::new_v4();

        let model = admins::ActiveModel {
            id: Set(id),
            email: Set(email),
            role: Set(role),
            is_active: Set(true),
            profile_id: Set(None),
            created_at: Set(Some(Utc::now())),
        };
        admins::Entity::insert(model).exec(conn).await?;

        Ok(id)
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> AppResult<()> {
        let conn = self.backend.conn()?;

        let result = admins::Entity::update_many()
            .set(admins::ActiveModel {
                is_active: Set(is_active),
                ..Default::default()
            })
            .filter(admins::Column::Id.eq(id))
            .exec(conn)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Admin not found".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_rejects_missing_email_before_any_write() {
        let service = AdminService::new(Backend::unavailable());
        let form = AdminCreateForm {
            email: "not-an-email".to_string(),
            role: None,
        };

        assert!(matches!(
            service.create(form).await,
            Err(AppError::ValidationError(_))
        ));
    }
}
