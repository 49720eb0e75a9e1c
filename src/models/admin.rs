use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::admin_entity as admins;

/// Identity carried by a verified session cookie, before the allow-list
/// lookup has happened.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub email: String,
}

/// A signed-in dashboard admin, after allow-list resolution.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminContext {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    #[schema(example = "ada@x.com")]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub admin: AdminContext,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminRow {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<admins::Model> for AdminRow {
    fn from(model: admins::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            role: model.role,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsPage {
    pub admin: AdminContext,
    pub admins: Vec<AdminRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl SettingsPage {
    pub fn unavailable(admin: AdminContext, notice: impl Into<String>) -> Self {
        Self {
            admin,
            admins: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}

/// Raw form fields for adding an allow-list entry.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminCreateForm {
    pub email: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminActiveForm {
    pub is_active: String,
}
