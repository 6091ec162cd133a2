use serde::Serialize;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{AttemptSubmission, Question};

/// Outcome of scoring one attempt. Pure data; persistence happens later.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttemptResult {
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
    pub total_questions: u32,
    pub score: f64,
    pub accuracy: f64,
    pub per_question_detail: Vec<QuestionOutcome>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuestionOutcome {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub selected_answer: Option<String>,
    pub is_correct: bool,
}

pub struct AttemptEvaluator;

impl AttemptEvaluator {
    /// Score a submission against the quiz's answer key, restricted to
    /// `allowed_indices` (the full quiz for a normal attempt, a subset for a
    /// revision attempt). Out-of-range indices are dropped and duplicates
    /// collapse to their first occurrence; an empty set after filtering is
    /// an `InvalidAttempt`.
    pub fn evaluate(
        quiz: &[Question],
        submission: &AttemptSubmission,
        allowed_indices: &[usize],
    ) -> AppResult<AttemptResult> {
        let indices = Self::sanitize_indices(allowed_indices, quiz.len());
        if indices.is_empty() {
            return Err(AppError::InvalidAttempt(
                "no valid question indices to score".to_string(),
            ));
        }

        let mut correct: u32 = 0;
        let mut wrong: u32 = 0;
        let mut skipped: u32 = 0;
        let mut per_question_detail = Vec::with_capacity(indices.len());

        for &idx in &indices {
            let question = &quiz[idx];
            let selected = submission.get(&idx.to_string()).and_then(|v| v.as_deref());

            let is_correct = match selected {
                None => {
                    skipped += 1;
                    false
                }
                Some(answer) if answer == question.answer => {
                    correct += 1;
                    true
                }
                Some(_) => {
                    wrong += 1;
                    false
                }
            };

            per_question_detail.push(QuestionOutcome {
                index: idx,
                question: question.prompt.clone(),
                options: question.options.clone(),
                correct_answer: question.answer.clone(),
                selected_answer: selected.map(str::to_string),
                is_correct,
            });
        }

        let total_questions = indices.len() as u32;
        let accuracy = if total_questions == 0 {
            0.0
        } else {
            f64::from(correct) / f64::from(total_questions)
        };

        Ok(AttemptResult {
            correct,
            wrong,
            skipped,
            total_questions,
            score: f64::from(correct),
            accuracy,
            per_question_detail,
        })
    }

    /// Drop out-of-range entries and deduplicate preserving first occurrence.
    pub fn sanitize_indices(raw: &[usize], quiz_len: usize) -> Vec<usize> {
        let mut seen = std::collections::HashSet::new();
        raw.iter()
            .copied()
            .filter(|&idx| idx < quiz_len && seen.insert(idx))
            .collect()
    }
}
