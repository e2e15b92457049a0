use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::Outcome;
use crate::models::DiaryRecord;

/// Pre-populated form values for one date
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiaryFormResponse {
    /// Whether a record is already stored for this date
    pub exists: bool,
    #[serde(flatten)]
    pub record: DiaryRecord,
}

/// Response for diary mutations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiaryMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}

impl From<Outcome> for DiaryMutationResponse {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self {
                success: true,
                message: Some("Saved".to_string()),
            },
            Outcome::Failure(reason) => Self {
                success: false,
                message: Some(reason),
            },
        }
    }
}
