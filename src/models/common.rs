use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome of a mutation action, rendered inline next to the form that
/// posted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActionResult {
    pub status: ActionStatus,
    pub message: String,
}

impl ActionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Error,
            message: message.into(),
        }
    }
}
