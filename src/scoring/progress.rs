//! Player progress and the records exported to persistence

use crate::core::types::{Difficulty, PlayerId};
use serde::{Deserialize, Serialize};

/// Cumulative answer statistics for one battle or a whole career
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub quests_completed: u32,
    pub weapon_boosts: u32,
    pub correct_answers: u32,
    pub total_answers: u32,
    pub bonus_successes: u32,
    pub bonus_attempts: u32,
}

impl PlayerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Record a main-question answer (timeouts count as wrong)
    pub fn record_answer(&mut self, correct: bool) {
        self.total_answers += 1;
        if correct {
            self.correct_answers += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
        }
    }

    /// Record a bonus-question attempt; success also counts a weapon boost
    pub fn record_bonus(&mut self, success: bool) {
        self.bonus_attempts += 1;
        if success {
            self.bonus_successes += 1;
            self.weapon_boosts += 1;
        }
    }

    pub fn complete_quest(&mut self) {
        self.quests_completed += 1;
    }

    /// Fraction of main answers that were correct, 0.0 with no answers
    pub fn accuracy(&self) -> f64 {
        if self.total_answers == 0 {
            return 0.0;
        }
        f64::from(self.correct_answers) / f64::from(self.total_answers)
    }

    /// Fraction of bonus attempts that succeeded, 0.0 with no attempts
    pub fn bonus_success_rate(&self) -> f64 {
        if self.bonus_attempts == 0 {
            return 0.0;
        }
        f64::from(self.bonus_successes) / f64::from(self.bonus_attempts)
    }

    /// Fold another battle's progress into this one
    ///
    /// Streaks do not carry across battles.
    pub fn absorb(&mut self, other: &PlayerProgress) {
        self.score += other.score;
        self.quests_completed += other.quests_completed;
        self.weapon_boosts += other.weapon_boosts;
        self.correct_answers += other.correct_answers;
        self.total_answers += other.total_answers;
        self.bonus_successes += other.bonus_successes;
        self.bonus_attempts += other.bonus_attempts;
        self.best_streak = self.best_streak.max(other.best_streak);
        self.streak = 0;
    }
}

/// What a finished battle hands to the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub player_id: PlayerId,
    pub subject: String,
    pub difficulty: Difficulty,
    pub score: u32,
    pub quests_completed: u32,
    pub weapon_boosts: u32,
    /// 0.0..=1.0
    pub accuracy: f64,
    /// 0.0..=1.0
    pub bonus_success_rate: f64,
}

impl SessionRecord {
    pub fn from_progress(
        player_id: PlayerId,
        subject: impl Into<String>,
        difficulty: Difficulty,
        progress: &PlayerProgress,
    ) -> Self {
        Self {
            player_id,
            subject: subject.into(),
            difficulty,
            score: progress.score,
            quests_completed: progress.quests_completed,
            weapon_boosts: progress.weapon_boosts,
            accuracy: progress.accuracy(),
            bonus_success_rate: progress.bonus_success_rate(),
        }
    }
}

/// Read-only leaderboard row: a session record joined with the player's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u32,
    pub quests_completed: u32,
    pub weapon_boosts: u32,
    pub accuracy: f64,
    pub bonus_success_rate: f64,
}

impl LeaderboardEntry {
    pub fn new(player_name: impl Into<String>, record: &SessionRecord) -> Self {
        Self {
            player_name: player_name.into(),
            score: record.score,
            quests_completed: record.quests_completed,
            weapon_boosts: record.weapon_boosts,
            accuracy: record.accuracy,
            bonus_success_rate: record.bonus_success_rate,
        }
    }
}
