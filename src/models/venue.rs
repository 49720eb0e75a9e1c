use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::venue_entity as venues;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VenueRow {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
    pub venue_type: Option<String>,
    pub capacity: Option<i32>,
    pub rating: Option<f64>,
    pub open_hours: Option<String>,
    pub is_live: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<venues::Model> for VenueRow {
    fn from(model: venues::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            city: model.city,
            venue_type: model.venue_type,
            capacity: model.capacity,
            rating: model.rating,
            open_hours: model.open_hours,
            is_live: model.is_live,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct VenueStats {
    pub total: i64,
    pub live: i64,
    pub avg_rating: f64,
    pub total_capacity: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VenuesPage {
    pub stats: VenueStats,
    pub venues: Vec<VenueRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl VenuesPage {
    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            stats: VenueStats::default(),
            venues: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}

/// Raw form fields as posted by the venue form. Numeric fields arrive as
/// strings and are coerced by the service.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VenueForm {
    pub name: String,
    pub city: Option<String>,
    pub venue_type: Option<String>,
    pub capacity: Option<String>,
    pub rating: Option<String>,
    pub open_hours: Option<String>,
    pub is_live: Option<String>,
}
