use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Submitted answers keyed by decimal question index. A missing key and an
/// explicit `null` both mean the question was skipped.
pub type AttemptSubmission = HashMap<String, Option<String>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptMode {
    Normal,
    Revision,
}

impl AttemptMode {
    /// Lenient parse for the request boundary: anything that is not exactly
    /// "revision" (case-insensitive) scores as a normal attempt.
    pub fn parse_or_normal(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("revision") => AttemptMode::Revision,
            _ => AttemptMode::Normal,
        }
    }
}

/// Cumulative per-question counters. Only ever incremented: a wrong answer
/// bumps `attempts` alone, a skip bumps `attempts` and `skipped`, a correct
/// answer bumps `attempts` and `correct`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionStats {
    pub attempts: u32,
    pub correct: u32,
    pub skipped: u32,
}

impl QuestionStats {
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempts)
        }
    }
}

/// One scored attempt, snapshotted into the material's history. Immutable
/// once appended; `attempt_number` is 1-based and sequential.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AttemptRecord {
    pub mode: AttemptMode,
    pub score: f64,
    pub correct: u32,
    pub wrong: u32,
    pub skipped: u32,
    pub attempted: u32,
    pub total_questions: u32,
    pub accuracy: f64,
    pub attempt_number: u32,
    pub created_at: DateTime<Utc>,
}

/// Per-quiz mastery snapshot, persisted as the material's `quiz_stats`
/// field. Scoped 1:1 to the owning material's quiz.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MasteryState {
    pub per_question: HashMap<String, QuestionStats>,
    pub last_unsolved: Vec<usize>,
    pub history: Vec<AttemptRecord>,
}

impl MasteryState {
    pub fn stats(&self, index: usize) -> QuestionStats {
        self.per_question
            .get(&index.to_string())
            .copied()
            .unwrap_or_default()
    }

    pub fn stats_mut(&mut self, index: usize) -> &mut QuestionStats {
        self.per_question.entry(index.to_string()).or_default()
    }

    /// The attempt number the next appended record must carry.
    pub fn next_attempt_number(&self) -> u32 {
        self.history.len() as u32 + 1
    }

    /// Append-only history discipline: the record's `attempt_number` must be
    /// exactly `history.len() + 1`.
    pub fn append_record(&mut self, record: AttemptRecord) -> AppResult<()> {
        let expected = self.next_attempt_number();
        if record.attempt_number != expected {
            return Err(AppError::InvalidAttempt(format!(
                "attempt_number {} does not continue the history (expected {})",
                record.attempt_number, expected
            )));
        }
        self.history.push(record);
        Ok(())
    }
}
