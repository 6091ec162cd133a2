use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{AttemptMode, AttemptRecord, AttemptRow},
    models::dto::request::ScoreAttemptRequest,
    models::dto::response::{RevisionSetResponse, ScoreAttemptResponse},
    repositories::{AttemptRowRepository, MaterialRepository},
    services::attempt_evaluator::AttemptEvaluator,
    services::mastery_tracker::MasteryTracker,
    services::revision_selector::RevisionSelector,
};

pub struct AttemptService {
    materials: Arc<dyn MaterialRepository>,
    attempt_rows: Arc<dyn AttemptRowRepository>,
}

impl AttemptService {
    pub fn new(
        materials: Arc<dyn MaterialRepository>,
        attempt_rows: Arc<dyn AttemptRowRepository>,
    ) -> Self {
        Self {
            materials,
            attempt_rows,
        }
    }

    /// Score one attempt end to end: load the material, evaluate the
    /// submission, fold the result into the mastery snapshot, append the
    /// history record, persist the snapshot and the durable attempt row.
    ///
    /// The read-modify-write on `quiz_stats` is a single-document update;
    /// concurrent attempts on the same material are not serialized here.
    pub async fn score_attempt(
        &self,
        request: ScoreAttemptRequest,
    ) -> AppResult<ScoreAttemptResponse> {
        request.validate()?;

        let material = self
            .materials
            .find_by_id(&request.material_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("material '{}' not found", request.material_id))
            })?;

        let (mode, allowed) = Self::resolve_attempt(
            material.quiz.len(),
            request.mode.as_deref(),
            request.question_indices.as_deref(),
        );

        let result = AttemptEvaluator::evaluate(&material.quiz, &request.answers, &allowed)?;

        let mut stats = material.quiz_stats.clone();
        MasteryTracker::fold(&mut stats, &result, material.quiz.len());

        let record = AttemptRecord {
            mode,
            score: result.score,
            correct: result.correct,
            wrong: result.wrong,
            skipped: result.skipped,
            attempted: result.correct + result.wrong,
            total_questions: result.total_questions,
            accuracy: result.accuracy,
            attempt_number: stats.next_attempt_number(),
            created_at: Utc::now(),
        };
        stats.append_record(record.clone())?;

        self.materials
            .update_quiz_stats(&material.id, &stats)
            .await?;

        let row = self
            .attempt_rows
            .insert(AttemptRow::from_record(
                &material.id,
                &request.user_id,
                &record,
            ))
            .await?;

        log::debug!(
            "scored attempt {} on material {} ({} correct / {} total)",
            record.attempt_number,
            material.id,
            record.correct,
            record.total_questions
        );

        Ok(ScoreAttemptResponse {
            attempt: record,
            result,
            quiz_stats: stats,
            row,
        })
    }

    /// Build the bounded revision set for a material from its mastery state.
    pub async fn revision_set(
        &self,
        material_id: &str,
        limit: usize,
    ) -> AppResult<RevisionSetResponse> {
        let material = self
            .materials
            .find_by_id(material_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("material '{}' not found", material_id)))?;

        let indices =
            RevisionSelector::select(&material.quiz_stats, material.quiz.len(), limit);
        let questions = indices
            .iter()
            .map(|&idx| material.quiz[idx].clone())
            .collect();

        Ok(RevisionSetResponse {
            indices,
            questions,
            stats: material.quiz_stats,
        })
    }

    /// Decide what is actually being attempted. Revision mode needs a usable
    /// index subset; anything else (including a revision request whose
    /// indices all filter away) scores the whole quiz as a normal attempt.
    fn resolve_attempt(
        quiz_len: usize,
        mode: Option<&str>,
        raw_indices: Option<&[i64]>,
    ) -> (AttemptMode, Vec<usize>) {
        if AttemptMode::parse_or_normal(mode) == AttemptMode::Revision {
            if let Some(raw) = raw_indices {
                let non_negative: Vec<usize> = raw
                    .iter()
                    .filter(|&&v| v >= 0)
                    .map(|&v| v as usize)
                    .collect();
                let sanitized = AttemptEvaluator::sanitize_indices(&non_negative, quiz_len);
                if !sanitized.is_empty() {
                    return (AttemptMode::Revision, sanitized);
                }
            }
        }
        (AttemptMode::Normal, (0..quiz_len).collect())
    }
}
