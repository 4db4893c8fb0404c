//! Combat state for one battle
//!
//! `CombatState` is a plain value. The rules engine produces a new one per
//! answer; nothing else mutates it.

use crate::core::config::BattleConfig;
use crate::core::types::Difficulty;
use serde::{Deserialize, Serialize};

/// Combat state snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub level: Difficulty,
    pub player_hp: u32,
    pub player_max_hp: u32,
    pub player_shields: u32,
    pub player_max_shields: u32,
    pub enemy_hp: u32,
    pub enemy_max_hp: u32,
    /// Never decreases within a session
    pub score: u32,
    pub main_questions_done: u32,
    /// One-way latch, set by a correct bonus answer
    pub bonus_active: bool,
    pub bonus_answered: bool,
    pub combat_over: bool,
}

impl Default for CombatState {
    fn default() -> Self {
        Self::new(Difficulty::default(), &BattleConfig::default())
    }
}

impl CombatState {
    /// Fresh state at full hull and shields
    pub fn new(level: Difficulty, config: &BattleConfig) -> Self {
        Self {
            level,
            player_hp: config.player_max_hp,
            player_max_hp: config.player_max_hp,
            player_shields: config.player_max_shields,
            player_max_shields: config.player_max_shields,
            enemy_hp: config.enemy_max_hp,
            enemy_max_hp: config.enemy_max_hp,
            score: 0,
            main_questions_done: 0,
            bonus_active: false,
            bonus_answered: false,
            combat_over: false,
        }
    }

    pub fn enemy_defeated(&self) -> bool {
        self.enemy_hp == 0
    }

    pub fn player_defeated(&self) -> bool {
        self.player_hp == 0
    }

    /// Either ship has sunk
    pub fn someone_sunk(&self) -> bool {
        self.enemy_defeated() || self.player_defeated()
    }
}

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CombatPhase {
    #[default]
    NotStarted,
    /// Waiting for the answer to the opening bonus question
    BonusPending,
    MainInProgress,
    /// Terminal; a new battle needs a new session
    Over,
}

impl CombatPhase {
    /// Phase entered when a session is initialized
    pub fn start(self) -> CombatPhase {
        match self {
            CombatPhase::NotStarted => CombatPhase::BonusPending,
            other => other,
        }
    }

    /// Phase after an answer has been applied
    pub fn after_answer(self, combat_over: bool, questions_exhausted: bool) -> CombatPhase {
        match self {
            CombatPhase::NotStarted | CombatPhase::Over => self,
            _ if combat_over || questions_exhausted => CombatPhase::Over,
            CombatPhase::BonusPending | CombatPhase::MainInProgress => {
                CombatPhase::MainInProgress
            }
        }
    }

    pub fn accepts_answers(self) -> bool {
        matches!(self, CombatPhase::BonusPending | CombatPhase::MainInProgress)
    }
}

/// How a finished battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    /// Enemy ship sunk
    Victory,
    /// Player ship sunk
    Defeat,
    /// Questions ran out with both ships afloat
    Survived,
}

impl CombatOutcome {
    pub fn from_state(state: &CombatState) -> CombatOutcome {
        if state.player_defeated() {
            CombatOutcome::Defeat
        } else if state.enemy_defeated() {
            CombatOutcome::Victory
        } else {
            CombatOutcome::Survived
        }
    }
}
