use std::collections::HashMap;

use serde::Serialize;

use crate::models::domain::{
    AttemptRecord, AttemptRow, MasteryState, Question, QuestionStats, StudyMaterial,
};
use crate::services::analytics::HistoryEntry;
use crate::services::attempt_evaluator::AttemptResult;

#[derive(Debug, Clone, Serialize)]
pub struct ScoreAttemptResponse {
    pub attempt: AttemptRecord,
    pub result: AttemptResult,
    pub quiz_stats: MasteryState,
    pub row: AttemptRow,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevisionSetResponse {
    pub indices: Vec<usize>,
    pub questions: Vec<Question>,
    pub stats: MasteryState,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialInfo {
    pub material_id: String,
    pub topic: Option<String>,
    pub source_name: Option<String>,
}

impl From<&StudyMaterial> for MaterialInfo {
    fn from(material: &StudyMaterial) -> Self {
        MaterialInfo {
            material_id: material.id.clone(),
            topic: material.topic.clone(),
            source_name: material.source_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardMaterialResponse {
    pub material_info: MaterialInfo,
    pub quiz_history: Vec<HistoryEntry>,
    pub per_question: HashMap<String, QuestionStats>,
    pub last_unsolved: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::test_material;

    #[test]
    fn material_info_projects_identity_fields() {
        let material = test_material("m-9", "u-2", 3);
        let info = MaterialInfo::from(&material);

        assert_eq!(info.material_id, "m-9");
        assert_eq!(info.topic.as_deref(), Some("networking"));
        assert_eq!(info.source_name.as_deref(), Some("osi.pdf"));
    }
}
