use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::mastery::{AttemptMode, AttemptRecord};

/// Flat per-attempt row stored in the `quiz_performance` collection. The
/// dashboards are computed purely from these rows; the row itself is never
/// edited after insert.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AttemptRow {
    pub id: String,
    pub material_id: String,
    pub user_id: String,
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
    pub total_questions: u32,
    pub score: f64,
    pub accuracy: f64,
    pub mode: AttemptMode,
    pub attempt_number: u32,
    pub created_at: DateTime<Utc>,
}

impl AttemptRow {
    pub fn from_record(material_id: &str, user_id: &str, record: &AttemptRecord) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            material_id: material_id.to_string(),
            user_id: user_id.to_string(),
            correct: record.correct,
            wrong: record.wrong,
            skipped: record.skipped,
            total_questions: record.total_questions,
            score: record.score,
            accuracy: record.accuracy,
            mode: record.mode,
            attempt_number: record.attempt_number,
            created_at: record.created_at,
        }
    }

    /// Accuracy over the answered questions only, recomputed from the raw
    /// counts; 0 when nothing was answered.
    pub fn answered_accuracy(&self) -> f64 {
        let answered = self.correct + self.wrong;
        if answered == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(answered)
        }
    }
}
