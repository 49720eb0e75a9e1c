use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::app_guide_entity as app_guides;

/// Steps are stored as one opaque text column; each non-empty line is a
/// step. Parsed for display and re-serialized on edit.
pub fn parse_steps(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn serialize_steps(steps: &[String]) -> String {
    steps.join("\n")
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GuideRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub steps: Vec<String>,
    pub media_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<app_guides::Model> for GuideRow {
    fn from(model: app_guides::Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            subtitle: model.subtitle,
            steps: parse_steps(&model.steps),
            media_url: model.media_url,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct GuideStats {
    pub total: i64,
    pub updated_last_7d: i64,
    pub total_steps: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GuidesPage {
    pub stats: GuideStats,
    pub guides: Vec<GuideRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl GuidesPage {
    pub fn unavailable(notice: impl Into<String>) -> Self {
        Self {
            stats: GuideStats::default(),
            guides: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct GuideForm {
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    /// Steps as typed into the textarea, one per line.
    pub steps: Option<String>,
    pub media_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps_skips_blank_lines() {
        let steps = parse_steps("Open the app\n\n  Tap a venue  \nCheck in\n");
        assert_eq!(steps, vec!["Open the app", "Tap a venue", "Check in"]);
    }

    #[test]
    fn test_steps_survive_an_edit_round_trip() {
        let raw = "Open the app\nTap a venue\nCheck in";
        let steps = parse_steps(raw);
        assert_eq!(serialize_steps(&steps), raw);
    }
}
