#[cfg(test)]
pub mod fixtures {
    use chrono::{DateTime, Utc};

    use crate::models::domain::{
        AttemptMode, AttemptRow, AttemptSubmission, Question, StudyMaterial,
    };

    /// A quiz of `len` questions, each with options A-D and correct answer "A".
    pub fn test_quiz(len: usize) -> Vec<Question> {
        (0..len)
            .map(|i| Question {
                prompt: format!("Question {}", i),
                options: vec![
                    "A".to_string(),
                    "B".to_string(),
                    "C".to_string(),
                    "D".to_string(),
                ],
                answer: "A".to_string(),
                explanation: format!("A is correct for question {}", i),
            })
            .collect()
    }

    /// A material with a fresh (empty) mastery state and a quiz of `quiz_len`.
    pub fn test_material(id: &str, user_id: &str, quiz_len: usize) -> StudyMaterial {
        StudyMaterial {
            id: id.to_string(),
            user_id: user_id.to_string(),
            topic: Some("networking".to_string()),
            source_type: Some("pdf".to_string()),
            source_name: Some("osi.pdf".to_string()),
            quiz: test_quiz(quiz_len),
            quiz_stats: Default::default(),
            created_at: Some(Utc::now()),
        }
    }

    /// Builds a submission from `(index, selected)` pairs; `None` is an
    /// explicit skip (JSON null).
    pub fn submission(answers: &[(usize, Option<&str>)]) -> AttemptSubmission {
        answers
            .iter()
            .map(|&(idx, selected)| (idx.to_string(), selected.map(str::to_string)))
            .collect()
    }

    /// A durable attempt row with the accuracy derived from the counts.
    pub fn attempt_row(
        material_id: &str,
        user_id: &str,
        correct: u32,
        wrong: u32,
        skipped: u32,
        attempt_number: u32,
        created_at: &str,
    ) -> AttemptRow {
        let answered = correct + wrong;
        let accuracy = if answered == 0 {
            0.0
        } else {
            f64::from(correct) / f64::from(answered)
        };

        AttemptRow {
            id: format!("row-{}-{}", material_id, attempt_number),
            material_id: material_id.to_string(),
            user_id: user_id.to_string(),
            correct,
            wrong,
            skipped,
            total_questions: correct + wrong + skipped,
            score: f64::from(correct),
            accuracy,
            mode: AttemptMode::Normal,
            attempt_number,
            created_at: created_at
                .parse::<DateTime<Utc>>()
                .expect("fixture timestamp should parse"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_quiz_questions_are_canonical() {
        for question in test_quiz(5) {
            assert!(question.validate().is_ok());
        }
    }

    #[test]
    fn test_attempt_row_derives_accuracy() {
        let row = attempt_row("m-1", "u-1", 3, 1, 2, 1, "2026-03-01T10:00:00Z");
        assert_eq!(row.accuracy, 0.75);
        assert_eq!(row.total_questions, 6);
        assert_eq!(row.score, 3.0);
    }
}
