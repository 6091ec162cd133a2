use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{mastery::MasteryState, question::Question};

/// A study material as produced by the external generation pipeline, with
/// the quiz embedded and the mastery snapshot living alongside it. This
/// service never creates materials; it loads them, scores attempts and
/// writes the updated `quiz_stats` back.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct StudyMaterial {
    pub id: String,
    pub user_id: String,
    pub topic: Option<String>,
    pub source_type: Option<String>,
    pub source_name: Option<String>,
    pub quiz: Vec<Question>,
    #[serde(default)]
    pub quiz_stats: MasteryState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_without_stats_deserializes_with_empty_state() {
        let raw = r#"{
            "id": "m-1",
            "user_id": "u-1",
            "topic": "networking",
            "source_type": "pdf",
            "source_name": "osi.pdf",
            "quiz": []
        }"#;

        let material: StudyMaterial = serde_json::from_str(raw).unwrap();
        assert!(material.quiz_stats.per_question.is_empty());
        assert!(material.quiz_stats.history.is_empty());
        assert!(material.quiz_stats.last_unsolved.is_empty());
    }
}
