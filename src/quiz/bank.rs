//! Question bank: the immutable catalog plus a long-lived random source
//!
//! The generator is seeded once when the bank is built and reused for every
//! selection. Callers that need reproducible battles pass a seed.

use crate::core::types::Difficulty;
use crate::quiz::question::{loosely_equal, Question};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeSet;

/// Queries a combat session needs from its question source
pub trait QuestionProvider {
    /// Distinct subjects present in the catalog
    fn list_subjects(&self) -> BTreeSet<String>;

    /// Shuffled, duplicate-free questions for one battle
    ///
    /// `count` is the number of main questions wanted; one extra question is
    /// drawn for the bonus slot, so up to `count + 1` questions come back.
    /// Returns an empty vector when nothing matches.
    fn select_questions(
        &mut self,
        subject: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> Vec<Question>;

    fn check_answer(&self, question: &Question, answer: &str) -> bool {
        question.is_correct(answer)
    }
}

/// In-memory question catalog
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    rng: ChaCha8Rng,
}

impl QuestionBank {
    /// Build a bank from validated questions and an injected generator
    ///
    /// Malformed records are dropped with a warning.
    pub fn new(questions: Vec<Question>, rng: ChaCha8Rng) -> Self {
        let total = questions.len();
        let questions: Vec<Question> = questions
            .into_iter()
            .filter(|q| match q.validate() {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Skipping question: {}", e);
                    false
                }
            })
            .collect();

        if questions.len() < total {
            tracing::warn!(
                "Question bank dropped {} of {} records",
                total - questions.len(),
                total
            );
        }

        Self { questions, rng }
    }

    /// Build a bank seeded from `seed`, or from OS entropy when `None`
    pub fn with_seed(questions: Vec<Question>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::new(questions, rng)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions matching a subject and difficulty
    pub fn available(&self, subject: &str, difficulty: Difficulty) -> usize {
        Self::matching(&self.questions, subject, difficulty).count()
    }

    /// Takes the catalog rather than `&self` so callers can still borrow the
    /// generator mutably
    fn matching<'a>(
        questions: &'a [Question],
        subject: &'a str,
        difficulty: Difficulty,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        questions
            .iter()
            .filter(move |q| q.difficulty == difficulty && loosely_equal(&q.subject, subject))
    }
}

impl QuestionProvider for QuestionBank {
    fn list_subjects(&self) -> BTreeSet<String> {
        self.questions.iter().map(|q| q.subject.clone()).collect()
    }

    fn select_questions(
        &mut self,
        subject: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> Vec<Question> {
        let mut pool: Vec<&Question> = Self::matching(&self.questions, subject, difficulty).collect();
        if pool.is_empty() {
            return Vec::new();
        }

        let mut main_count = count;
        if pool.len() < main_count.saturating_add(1) {
            main_count = pool.len() - 1;
            tracing::warn!(
                "Only {} {} questions for '{}'; main questions reduced from {} to {}",
                pool.len(),
                difficulty,
                subject,
                count,
                main_count
            );
        }

        pool.shuffle(&mut self.rng);
        pool.into_iter().take(main_count.saturating_add(1)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(subject: &str, difficulty: Difficulty, n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("{} question {}", subject, i),
                    vec![format!("{}", i), "wrong".into()],
                    format!("{}", i),
                    subject,
                    difficulty,
                )
            })
            .collect()
    }

    fn bank(questions: Vec<Question>) -> QuestionBank {
        QuestionBank::new(questions, ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_list_subjects_is_distinct() {
        let mut questions = numbered("Math", Difficulty::Easy, 3);
        questions.extend(numbered("Science", Difficulty::Hard, 2));
        questions.extend(numbered("Math", Difficulty::Hard, 2));
        let subjects = bank(questions).list_subjects();
        assert_eq!(subjects.len(), 2);
        assert!(subjects.contains("Math"));
        assert!(subjects.contains("Science"));
    }

    #[test]
    fn test_select_returns_bonus_plus_main() {
        let mut bank = bank(numbered("Math", Difficulty::Easy, 20));
        let picked = bank.select_questions("Math", Difficulty::Easy, 10);
        assert_eq!(picked.len(), 11);
    }

    #[test]
    fn test_select_clamps_to_available() {
        let mut bank = bank(numbered("Math", Difficulty::Easy, 6));
        let picked = bank.select_questions("Math", Difficulty::Easy, 10);
        assert_eq!(picked.len(), 6);
    }

    #[test]
    fn test_select_huge_count_clamps() {
        let mut bank = bank(numbered("Math", Difficulty::Easy, 5));
        let picked = bank.select_questions("Math", Difficulty::Easy, usize::MAX);
        assert_eq!(picked.len(), 5);
    }

    #[test]
    fn test_select_filters_by_subject_and_difficulty() {
        let mut questions = numbered("Math", Difficulty::Easy, 5);
        questions.extend(numbered("Math", Difficulty::Hard, 5));
        questions.extend(numbered("English", Difficulty::Easy, 5));
        let mut bank = bank(questions);
        let picked = bank.select_questions("math", Difficulty::Easy, 10);
        assert_eq!(picked.len(), 5);
        assert!(picked
            .iter()
            .all(|q| q.subject == "Math" && q.difficulty == Difficulty::Easy));
    }

    #[test]
    fn test_select_unknown_subject_is_empty() {
        let mut bank = bank(numbered("Math", Difficulty::Easy, 5));
        assert!(bank.select_questions("History", Difficulty::Easy, 10).is_empty());
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = bank(numbered("Math", Difficulty::Easy, 15));
        let mut b = bank(numbered("Math", Difficulty::Easy, 15));
        assert_eq!(
            a.select_questions("Math", Difficulty::Easy, 10),
            b.select_questions("Math", Difficulty::Easy, 10)
        );
    }

    #[test]
    fn test_generator_advances_between_calls() {
        let mut bank = bank(numbered("Math", Difficulty::Easy, 15));
        let first = bank.select_questions("Math", Difficulty::Easy, 14);
        let second = bank.select_questions("Math", Difficulty::Easy, 14);
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_records_dropped() {
        let mut questions = numbered("Math", Difficulty::Easy, 3);
        questions.push(Question::new(
            "Broken",
            vec!["a".into(), "b".into()],
            "c",
            "Math",
            Difficulty::Easy,
        ));
        assert_eq!(bank(questions).len(), 3);
    }

    #[test]
    fn test_check_answer_delegates_to_question() {
        let bank = bank(numbered("Math", Difficulty::Easy, 1));
        let q = &bank.questions()[0];
        assert!(bank.check_answer(q, " 0 "));
        assert!(!bank.check_answer(q, "wrong"));
    }
}
