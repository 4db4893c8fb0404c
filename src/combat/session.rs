//! One battle from initialization to its final answer
//!
//! The session owns the selected questions, a cursor into them and the
//! evolving `CombatState`. Each `submit_answer` call is atomic: on error the
//! session is left exactly as it was.

use crate::combat::constants::main_question_count;
use crate::combat::rules::resolve_answer;
use crate::combat::state::{CombatOutcome, CombatPhase, CombatState};
use crate::combat::weapons::Weapon;
use crate::core::config::BattleConfig;
use crate::core::error::{BroadsideError, Result};
use crate::core::types::{Difficulty, PlayerId};
use crate::quiz::{Question, QuestionProvider};
use crate::scoring::{calculate_rank, PlayerProgress, Rank, RankResult, SessionRecord, StarTier};

/// Player input for the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerEvent {
    /// Index into the question's choices
    Choice(usize),
    /// The driver's answer timer ran out
    Timeout,
}

/// How an answer was judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Correct,
    Incorrect,
    TimedOut,
}

impl AnswerKind {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerKind::Correct)
    }
}

/// Everything one answer did, for driver feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub question_index: usize,
    pub kind: AnswerKind,
    pub was_bonus: bool,
    pub damage_dealt: u32,
    pub points_awarded: u32,
    /// Remaining questions cashed in on an early kill with the bonus active
    pub cash_in_points: u32,
    /// Flat award for questions skipped because the battle ended early
    pub skipped_points: u32,
    pub shield_lost: bool,
    pub hp_lost: u32,
    pub weapon_upgrade: Option<Weapon>,
    pub state: CombatState,
}

#[derive(Debug, Clone)]
pub struct CombatSession {
    subject: String,
    config: BattleConfig,
    questions: Vec<Question>,
    current: usize,
    state: CombatState,
    phase: CombatPhase,
    weapon: Weapon,
    progress: PlayerProgress,
}

impl CombatSession {
    /// Start a battle, drawing questions from `provider`
    ///
    /// The first question drawn is the bonus question.
    pub fn initialize<P: QuestionProvider + ?Sized>(
        provider: &mut P,
        subject: &str,
        difficulty: Difficulty,
        config: &BattleConfig,
    ) -> Result<Self> {
        let wanted = main_question_count(difficulty) as usize;
        let questions = provider.select_questions(subject, difficulty, wanted);
        Self::from_questions(questions, subject, difficulty, config)
    }

    /// Start a battle over an already selected question list
    pub fn from_questions(
        questions: Vec<Question>,
        subject: &str,
        difficulty: Difficulty,
        config: &BattleConfig,
    ) -> Result<Self> {
        if questions.is_empty() {
            return Err(BroadsideError::NoQuestionsAvailable {
                subject: subject.to_string(),
                difficulty,
            });
        }

        tracing::info!(
            "Battle start: {} {} vs {} ({} questions)",
            subject,
            difficulty,
            difficulty.ship_class(),
            questions.len()
        );

        Ok(Self {
            subject: subject.to_string(),
            config: config.clone(),
            questions,
            current: 0,
            state: CombatState::new(difficulty, config),
            phase: CombatPhase::NotStarted.start(),
            weapon: Weapon::default(),
            progress: PlayerProgress::new(),
        })
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.level
    }

    pub fn weapon(&self) -> Weapon {
        self.weapon
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn is_over(&self) -> bool {
        self.phase == CombatPhase::Over
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Cursor into the question list
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Question awaiting an answer, `None` once the battle is over
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_over() {
            return None;
        }
        self.questions.get(self.current)
    }

    pub fn is_bonus_question(&self) -> bool {
        self.current == 0 && !self.is_over()
    }

    /// Apply one answer and advance to the next question
    ///
    /// Correctness is judged by `provider`.
    pub fn submit_answer<P: QuestionProvider + ?Sized>(
        &mut self,
        provider: &P,
        event: AnswerEvent,
    ) -> Result<TurnReport> {
        if !self.phase.accepts_answers() {
            return Err(BroadsideError::InvalidTransition(format!(
                "battle is {:?}, no answers accepted",
                self.phase
            )));
        }
        let question = self.questions.get(self.current).ok_or_else(|| {
            BroadsideError::InvalidTransition(format!(
                "no question at index {} of {}",
                self.current,
                self.questions.len()
            ))
        })?;

        let kind = match event {
            AnswerEvent::Choice(index) => {
                let choice = question.choice(index).ok_or(BroadsideError::InvalidAnswerIndex {
                    index,
                    choices: question.choices.len(),
                })?;
                if provider.check_answer(question, choice) {
                    AnswerKind::Correct
                } else {
                    AnswerKind::Incorrect
                }
            }
            AnswerEvent::Timeout => AnswerKind::TimedOut,
        };

        // Nothing below can fail
        let question_index = self.current;
        let was_bonus = question_index == 0;
        let questions_left = (self.questions.len() - question_index - 1) as u32;
        let resolution = resolve_answer(&self.state, was_bonus, kind.is_correct(), questions_left);

        self.state = resolution.state;
        self.current += 1;

        let mut weapon_upgrade = None;
        if was_bonus {
            self.progress.record_bonus(kind.is_correct());
            if resolution.bonus_activated {
                self.weapon = Weapon::bonus_upgrade(self.state.level);
                weapon_upgrade = Some(self.weapon);
            }
        } else {
            self.progress.record_answer(kind.is_correct());
        }

        let exhausted = self.current >= self.questions.len();
        self.phase = self.phase.after_answer(self.state.combat_over, exhausted);

        let skipped_points = if self.is_over() { self.finish() } else { 0 };

        tracing::debug!(
            "Answer {} ({:?}{}): dmg={} pts={} enemy_hp={} hp={} shields={} score={}",
            question_index,
            kind,
            if was_bonus { ", bonus" } else { "" },
            resolution.damage_dealt,
            resolution.points.total(),
            self.state.enemy_hp,
            self.state.player_hp,
            self.state.player_shields,
            self.state.score
        );

        Ok(TurnReport {
            question_index,
            kind,
            was_bonus,
            damage_dealt: resolution.damage_dealt,
            points_awarded: resolution.points.base,
            cash_in_points: resolution.points.cash_in,
            skipped_points,
            shield_lost: resolution.shield_lost,
            hp_lost: resolution.hp_lost,
            weapon_upgrade,
            state: self.state,
        })
    }

    /// Settle skipped questions and close the battle; returns points awarded
    fn finish(&mut self) -> u32 {
        let unanswered = (self.questions.len() - self.current) as u32;
        let mut skipped_points = 0;

        // A sunk player earns nothing for the questions never reached
        if self.state.enemy_defeated() && unanswered > 0 {
            skipped_points = unanswered.saturating_mul(self.config.skipped_question_points);
            self.state.score = self.state.score.saturating_add(skipped_points);
            self.state.main_questions_done += unanswered;
        }
        self.current = self.questions.len();
        self.state.combat_over = true;

        self.progress.score = self.state.score;
        let result = self.rank_result();
        if result.rank != Rank::Defeated {
            self.progress.complete_quest();
        }

        tracing::info!(
            "Battle over: {:?}, score {}, rank {} ({}%)",
            CombatOutcome::from_state(&self.state),
            self.state.score,
            result.rank,
            result.percent
        );
        skipped_points
    }

    fn rank_result(&self) -> RankResult {
        calculate_rank(
            self.state.score,
            self.state.level,
            self.state.enemy_hp,
            self.state.player_hp,
        )
    }

    /// How the battle ended, once it has
    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.is_over().then(|| CombatOutcome::from_state(&self.state))
    }

    /// Final rank, once the battle is over
    pub fn rank(&self) -> Option<RankResult> {
        self.is_over().then(|| self.rank_result())
    }

    pub fn star_tier(&self) -> Option<StarTier> {
        self.rank()
            .map(|r| StarTier::from_percent(r.percent, self.state.player_hp))
    }

    /// Persistence record for a finished battle
    pub fn record(&self, player_id: PlayerId) -> Result<SessionRecord> {
        if !self.is_over() {
            return Err(BroadsideError::InvalidTransition(
                "battle still in progress".into(),
            ));
        }
        Ok(SessionRecord::from_progress(
            player_id,
            &self.subject,
            self.state.level,
            &self.progress,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuestionBank;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("Q{}", i),
                    vec!["right".into(), "wrong".into()],
                    "right",
                    "Math",
                    Difficulty::Easy,
                )
            })
            .collect()
    }

    fn session_with(
        n: usize,
        difficulty: Difficulty,
        config: &BattleConfig,
    ) -> (CombatSession, QuestionBank) {
        let bank = QuestionBank::with_seed(questions(n), Some(0));
        let session = CombatSession::from_questions(questions(n), "Math", difficulty, config).unwrap();
        (session, bank)
    }

    fn session(n: usize, difficulty: Difficulty) -> (CombatSession, QuestionBank) {
        session_with(n, difficulty, &BattleConfig::default())
    }

    #[test]
    fn test_empty_selection_is_error() {
        let err = CombatSession::from_questions(
            Vec::new(),
            "Math",
            Difficulty::Easy,
            &BattleConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BroadsideError::NoQuestionsAvailable { .. }));
    }

    #[test]
    fn test_starts_with_bonus_pending() {
        let (s, _bank) = session(11, Difficulty::Easy);
        assert_eq!(s.phase(), CombatPhase::BonusPending);
        assert!(s.is_bonus_question());
        assert_eq!(s.state().player_hp, 100);
        assert_eq!(s.weapon(), Weapon::Cannon);
    }

    #[test]
    fn test_bonus_answer_moves_to_main() {
        let (mut s, bank) = session(11, Difficulty::Easy);
        let report = s.submit_answer(&bank, AnswerEvent::Choice(0)).unwrap();
        assert!(report.was_bonus);
        assert_eq!(report.kind, AnswerKind::Correct);
        assert_eq!(report.weapon_upgrade, Some(Weapon::Torpedo));
        assert_eq!(report.damage_dealt, 0);
        assert_eq!(s.phase(), CombatPhase::MainInProgress);
        assert!(s.state().bonus_active);
        assert_eq!(s.progress().weapon_boosts, 1);
    }

    #[test]
    fn test_out_of_range_choice_leaves_state() {
        let (mut s, bank) = session(11, Difficulty::Easy);
        let before = *s.state();
        let err = s.submit_answer(&bank, AnswerEvent::Choice(7)).unwrap_err();
        assert!(matches!(
            err,
            BroadsideError::InvalidAnswerIndex { index: 7, choices: 2 }
        ));
        assert_eq!(*s.state(), before);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.phase(), CombatPhase::BonusPending);
    }

    #[test]
    fn test_timeout_is_wrong_answer() {
        let (mut s, bank) = session(11, Difficulty::Easy);
        s.submit_answer(&bank, AnswerEvent::Choice(1)).unwrap();
        let report = s.submit_answer(&bank, AnswerEvent::Timeout).unwrap();
        assert_eq!(report.kind, AnswerKind::TimedOut);
        assert!(report.shield_lost);
        assert_eq!(report.state.player_shields, 2);
        assert_eq!(s.progress().total_answers, 1);
        assert_eq!(s.progress().correct_answers, 0);
    }

    #[test]
    fn test_submit_after_over_is_rejected() {
        let (mut s, bank) = session(1, Difficulty::Easy);
        s.submit_answer(&bank, AnswerEvent::Choice(0)).unwrap();
        assert!(s.is_over());
        assert_eq!(s.outcome(), Some(CombatOutcome::Survived));
        let err = s.submit_answer(&bank, AnswerEvent::Choice(0)).unwrap_err();
        assert!(matches!(err, BroadsideError::InvalidTransition(_)));
        assert!(s.current_question().is_none());
    }

    #[test]
    fn test_early_kill_awards_skipped_questions() {
        // 12 main questions on Easy; the enemy sinks on the 10th
        let (mut s, bank) = session(13, Difficulty::Easy);
        s.submit_answer(&bank, AnswerEvent::Choice(1)).unwrap();
        let mut last = None;
        for _ in 0..10 {
            last = Some(s.submit_answer(&bank, AnswerEvent::Choice(0)).unwrap());
        }
        let last = last.unwrap();
        assert!(s.is_over());
        assert_eq!(s.outcome(), Some(CombatOutcome::Victory));
        // No bonus, so no cash-in; two skipped questions at 10 each
        assert_eq!(last.cash_in_points, 0);
        assert_eq!(last.skipped_points, 20);
        assert_eq!(s.state().score, 120);
        assert_eq!(s.state().main_questions_done, 12);
        assert_eq!(s.progress().quests_completed, 1);
    }

    #[test]
    fn test_defeat_awards_nothing_for_skipped() {
        let (mut s, bank) = session(16, Difficulty::Medium);
        s.submit_answer(&bank, AnswerEvent::Choice(1)).unwrap();
        for _ in 0..8 {
            s.submit_answer(&bank, AnswerEvent::Choice(1)).unwrap();
        }
        assert!(s.is_over());
        assert_eq!(s.outcome(), Some(CombatOutcome::Defeat));
        assert_eq!(s.state().score, 0);
        assert_eq!(s.rank().unwrap().rank, Rank::Defeated);
        assert_eq!(s.star_tier(), Some(StarTier::Zero));
        assert_eq!(s.progress().quests_completed, 0);
    }

    #[test]
    fn test_record_only_when_over() {
        let (mut s, bank) = session(2, Difficulty::Easy);
        assert!(s.record(PlayerId::new()).is_err());
        s.submit_answer(&bank, AnswerEvent::Choice(0)).unwrap();
        s.submit_answer(&bank, AnswerEvent::Choice(0)).unwrap();
        let record = s.record(PlayerId::new()).unwrap();
        assert_eq!(record.subject, "Math");
        assert_eq!(record.score, 10);
        assert_eq!(record.accuracy, 1.0);
        assert_eq!(record.bonus_success_rate, 1.0);
    }

    #[test]
    fn test_huge_skipped_award_saturates() {
        let config = BattleConfig::from_toml_str("skipped_question_points = 4000000000").unwrap();
        let (mut s, bank) = session_with(13, Difficulty::Easy, &config);
        s.submit_answer(&bank, AnswerEvent::Choice(1)).unwrap();
        let mut last = None;
        for _ in 0..10 {
            last = Some(s.submit_answer(&bank, AnswerEvent::Choice(0)).unwrap());
        }
        assert!(s.is_over());
        assert_eq!(last.unwrap().skipped_points, u32::MAX);
        assert_eq!(s.state().score, u32::MAX);
    }

    /// Grades every answer wrong, whatever the question says
    struct StrictGrader;

    impl QuestionProvider for StrictGrader {
        fn list_subjects(&self) -> std::collections::BTreeSet<String> {
            Default::default()
        }

        fn select_questions(&mut self, _: &str, _: Difficulty, _: usize) -> Vec<Question> {
            Vec::new()
        }

        fn check_answer(&self, _: &Question, _: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_provider_judges_answers() {
        let (mut s, _bank) = session(11, Difficulty::Easy);
        let report = s.submit_answer(&StrictGrader, AnswerEvent::Choice(0)).unwrap();
        assert_eq!(report.kind, AnswerKind::Incorrect);
        assert!(!s.state().bonus_active);
    }
}
