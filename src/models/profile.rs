use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::profile_entity as profiles;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub is_private: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<profiles::Model> for UserRow {
    fn from(model: profiles::Model) -> Self {
        let name = format!(
            "{} {}",
            model.first_name.as_deref().unwrap_or(""),
            model.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string();

        Self {
            id: model.id,
            name,
            city: model.city,
            country: model.country,
            is_private: model.is_private,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UserStats {
    pub total: i64,
    pub new_last_7d: i64,
    pub private_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UsersPage {
    pub stats: UserStats,
    pub users: Vec<UserRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl UsersPage {
    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            stats: UserStats::default(),
            users: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PrivacyForm {
    pub is_private: String,
}
