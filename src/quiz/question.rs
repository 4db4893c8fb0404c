//! Question records
//!
//! Questions are immutable once loaded. Answer comparison ignores case and
//! surrounding whitespace.

use crate::core::error::{BroadsideError, Result};
use crate::core::types::Difficulty;
use serde::{Deserialize, Serialize};

/// A single multiple-choice quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    /// Ordered answer choices shown to the player
    pub choices: Vec<String>,
    /// Correct answer, matched against choices case-insensitively
    #[serde(rename = "answer")]
    pub correct_answer: String,
    pub subject: String,
    pub difficulty: Difficulty,
}

/// Case- and whitespace-insensitive text comparison
///
/// Used for answers and for subject lookup.
pub(crate) fn loosely_equal(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        choices: Vec<String>,
        correct_answer: impl Into<String>,
        subject: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            text: text.into(),
            choices,
            correct_answer: correct_answer.into(),
            subject: subject.into(),
            difficulty,
        }
    }

    /// Does the submitted answer match the correct answer?
    pub fn is_correct(&self, submitted: &str) -> bool {
        loosely_equal(&self.correct_answer, submitted)
    }

    /// Choice text at `index`, if in range
    pub fn choice(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(String::as_str)
    }

    /// Index of the first choice matching the correct answer
    pub fn correct_index(&self) -> Option<usize> {
        self.choices.iter().position(|c| self.is_correct(c))
    }

    /// Check the authoring invariants every catalog entry must hold
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(BroadsideError::MalformedQuestion("empty question text".into()));
        }
        if self.choices.len() < 2 {
            return Err(BroadsideError::MalformedQuestion(format!(
                "'{}' has {} choice(s), needs at least 2",
                self.text,
                self.choices.len()
            )));
        }
        if self.correct_index().is_none() {
            return Err(BroadsideError::MalformedQuestion(format!(
                "'{}': answer '{}' is not among the choices",
                self.text, self.correct_answer
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(
            "What shape is a wheel?",
            vec!["Square".into(), "Circle".into(), "Triangle".into()],
            "Circle",
            "Math",
            Difficulty::Easy,
        )
    }

    #[test]
    fn test_answer_ignores_case_and_whitespace() {
        let q = sample();
        assert!(q.is_correct("circle"));
        assert!(q.is_correct("  CIRCLE \n"));
        assert!(!q.is_correct("Square"));
        assert!(!q.is_correct(""));
    }

    #[test]
    fn test_correct_index() {
        assert_eq!(sample().correct_index(), Some(1));
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_answer() {
        let mut q = sample();
        q.correct_answer = "Hexagon".into();
        assert!(matches!(q.validate(), Err(BroadsideError::MalformedQuestion(_))));
    }

    #[test]
    fn test_validate_rejects_single_choice() {
        let mut q = sample();
        q.choices = vec!["Circle".into()];
        assert!(q.validate().is_err());
    }
}
