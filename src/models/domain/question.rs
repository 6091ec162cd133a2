use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// A single multiple-choice question from a generated quiz. Materials are
/// produced by an external generation pipeline; this service only validates
/// that what it loaded is canonical before scoring against it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

impl Question {
    /// Checks the structural invariants: 3-5 unique options and the answer
    /// must be one of them.
    pub fn validate(&self) -> AppResult<()> {
        if self.options.len() < 3 || self.options.len() > 5 {
            return Err(AppError::InvalidAttempt(format!(
                "question has {} options, expected 3-5",
                self.options.len()
            )));
        }

        for (i, option) in self.options.iter().enumerate() {
            if self.options[..i].contains(option) {
                return Err(AppError::InvalidAttempt(format!(
                    "duplicate option '{}'",
                    option
                )));
            }
        }

        if !self.options.contains(&self.answer) {
            return Err(AppError::InvalidAttempt(
                "correct answer is not one of the options".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: &[&str], answer: &str) -> Question {
        Question {
            prompt: "Which layer routes packets?".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer: answer.to_string(),
            explanation: "Routing happens at the network layer.".to_string(),
        }
    }

    #[test]
    fn valid_question_passes() {
        let q = question(&["Physical", "Network", "Session", "Transport"], "Network");
        assert!(q.validate().is_ok());
    }

    #[test]
    fn rejects_answer_outside_options() {
        let q = question(&["Physical", "Network", "Session"], "Application");
        assert!(q.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_options() {
        let q = question(&["Network", "Network", "Session"], "Network");
        assert!(q.validate().is_err());
    }

    #[test]
    fn rejects_too_few_or_too_many_options() {
        let q = question(&["Yes", "No"], "Yes");
        assert!(q.validate().is_err());

        let q = question(&["A", "B", "C", "D", "E", "F"], "A");
        assert!(q.validate().is_err());
    }

    #[test]
    fn rejects_unknown_fields_on_deserialize() {
        let raw = r#"{
            "prompt": "p",
            "options": ["a", "b", "c"],
            "answer": "a",
            "explanation": "e",
            "hint": "not part of the schema"
        }"#;
        assert!(serde_json::from_str::<Question>(raw).is_err());
    }
}
