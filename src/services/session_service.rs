use crate::database::Backend;
use crate::entities::{admin_entity as admins, auth_user_entity as auth_users,
    profile_entity as profiles};
use crate::error::{AppError, AppResult};
use crate::models::{AdminContext, SessionIdentity};
use crate::utils::verify_password;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

/// Display name for the dashboard header: profile name, else the local
/// part of the email, else the literal "Admin".
pub fn display_name(first: Option<&str>, last: Option<&str>, email: &str) -> String {
    let full = format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
        .trim()
        .to_string();
    if !full.is_empty() {
        return full;
    }

    let local = email.split('@').next().unwrap_or("").trim();
    if !local.is_empty() {
        return local.to_string();
    }

    "Admin".to_string()
}

/// Resolves a session identity to a dashboard admin via the allow-list
/// table, and authenticates login attempts.
#[derive(Clone)]
pub struct SessionService {
    backend: Backend,
}

impl SessionService {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    /// Resolve the session identity to an admin context. Fails closed:
    /// missing backend, missing allow-list row, inactive flag, or any
    /// query failure all yield `None`, which callers turn into a login
    /// redirect.
    pub async fn resolve(&self, identity: &SessionIdentity) -> Option<AdminContext> {
        match self.try_resolve(identity).await {
            Ok(admin) => admin,
            Err(e) => {
                log::warn!("session resolution failed: {e}");
                None
            }
        }
    }

    async fn try_resolve(&self, identity: &SessionIdentity) -> AppResult<Option<AdminContext>> {
        let Ok(conn) = self.backend.conn() else {
            return Ok(None);
        };
        if identity.email.is_empty() {
            return Ok(None);
        }

        let admin = admins::Entity::find()
            .filter(admins::Column::Email.eq(identity.email.to_lowercase()))
            .one(conn)
            .await?;
        let Some(admin) = admin else {
            return Ok(None);
        };
        if !admin.is_active {
            return Ok(None);
        }

        let mut first = None;
        let mut last = None;
        if let Some(profile_id) = admin.profile_id
            && let Some(profile) = profiles::Entity::find_by_id(profile_id).one(conn).await?
        {
            first = profile.first_name;
            last = profile.last_name;
        }

        let display_name = display_name(first.as_deref(), last.as_deref(), &admin.email);
        Ok(Some(AdminContext {
            id: admin.id,
            email: admin.email,
            role: admin.role,
            display_name,
        }))
    }

    /// Verify login credentials against the auth-users table and require
    /// an active allow-list entry. Returns the auth user id together with
    /// the resolved admin.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> AppResult<(Uuid, AdminContext)> {
        let conn = self.backend.conn()?;

        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "Email and password are required".to_string(),
            ));
        }

        let user = auth_users::Entity::find()
            .filter(auth_users::Column::Email.eq(email.clone()))
            .one(conn)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::AuthError("Invalid email or password".to_string()));
        }

        let identity = SessionIdentity {
            user_id: user.id,
            email: user.email.clone(),
        };
        let admin = self
            .resolve(&identity)
            .await
            .ok_or_else(|| AppError::AuthError("Not an active admin".to_string()))?;

        Ok((user.id, admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn admin_row(is_active: bool, profile_id: Option<Uuid>) -> admins::Model {
        admins::Model {
            id: Uuid::new_v4(),
            email: "ada@x.com".to_string(),
            role: "operator".to_string(),
            is_active,
            profile_id,
            created_at: None,
        }
    }

    fn identity() -> SessionIdentity {
        SessionIdentity {
            user_id: Uuid::new_v4(),
            email: "Ada@X.com".to_string(),
        }
    }

    #[test]
    fn test_display_name_derivation() {
        assert_eq!(
            display_name(Some("Ada"), Some("Lovelace"), "ada@x.com"),
            "Ada Lovelace"
        );
        assert_eq!(display_name(Some("Ada"), None, "ada@x.com"), "Ada");
        assert_eq!(display_name(None, None, "ada@x.com"), "ada");
        assert_eq!(display_name(None, None, ""), "Admin");
    }

    #[tokio::test]
    async fn test_inactive_admin_resolves_to_none() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![admin_row(false, None)]])
            .into_connection();
        let service = SessionService::new(Backend::from_connection(conn));

        assert!(service.resolve(&identity()).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_allow_list_row_resolves_to_none() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<admins::Model>::new()])
            .into_connection();
        let service = SessionService::new(Backend::from_connection(conn));

        assert!(service.resolve(&identity()).await.is_none());
    }

    #[tokio::test]
    async fn test_query_failure_resolves_to_none() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let service = SessionService::new(Backend::from_connection(conn));

        assert!(service.resolve(&identity()).await.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_backend_resolves_to_none() {
        let service = SessionService::new(Backend::unavailable());

        assert!(service.resolve(&identity()).await.is_none());
    }

    #[tokio::test]
    async fn test_active_admin_with_profile_gets_full_display_name() {
        let profile_id = Uuid::new_v4();
        let profile = profiles::Model {
            id: profile_id,
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            city: None,
            country: None,
            is_private: false,
            created_at: None,
        };
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![admin_row(true, Some(profile_id))]])
            .append_query_results([vec![profile]])
            .into_connection();
        let service = SessionService::new(Backend::from_connection(conn));

        let admin = service.resolve(&identity()).await.expect("admin");
        assert_eq!(admin.display_name, "Ada Lovelace");
        assert_eq!(admin.role, "operator");
    }

    #[tokio::test]
    async fn test_active_admin_without_profile_falls_back_to_email_local_part() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![admin_row(true, None)]])
            .into_connection();
        let service = SessionService::new(Backend::from_connection(conn));

        let admin = service.resolve(&identity()).await.expect("admin");
        assert_eq!(admin.display_name, "ada");
    }
}
