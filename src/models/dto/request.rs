use serde::Deserialize;
use validator::Validate;

use crate::models::domain::AttemptSubmission;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ScoreAttemptRequest {
    #[validate(length(min = 1, message = "material_id is required"))]
    pub material_id: String,

    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,

    /// Question index -> selected option; missing or null means skipped.
    #[serde(default)]
    pub answers: AttemptSubmission,

    /// "normal" (default) or "revision"; anything else scores as normal.
    pub mode: Option<String>,

    /// Required for revision mode. Negative or out-of-range entries are
    /// dropped; if nothing usable remains the attempt falls back to a
    /// normal full-quiz attempt.
    pub question_indices: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RevisionQuery {
    pub limit: Option<usize>,
}
