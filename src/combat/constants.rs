//! Combat system constants - all per-level tables in one place
//!
//! Tables are indexed by [`Difficulty::index`]. These are game rules, not
//! tunables; the adjustable numbers live in `BattleConfig`.

use crate::core::types::Difficulty;

/// Main questions per battle (the bonus question comes on top)
pub const MAIN_QUESTION_COUNT: [u32; 4] = [10, 15, 20, 25];

/// Fraction of incoming damage the enemy ship resists
pub const DAMAGE_REDUCTION: [f64; 4] = [0.0, 0.2, 0.4, 0.6];

/// Points per correct main answer; also hull lost per unshielded wrong answer
pub const BASE_POINTS: [u32; 4] = [10, 20, 30, 40];

/// Enemy hull the damage formula is calibrated against
pub const DAMAGE_CALIBRATION_HP: f64 = 100.0;

/// Damage multiplier once the bonus question was answered correctly
pub const BONUS_DAMAGE_MULTIPLIER: f64 = 1.1;

// Session defaults (overridable through BattleConfig)
pub const PLAYER_MAX_HP: u32 = 100;
pub const PLAYER_MAX_SHIELDS: u32 = 3;
pub const ENEMY_MAX_HP: u32 = 100;
pub const ANSWER_TIMEOUT_SECS: u64 = 10;
pub const SKIPPED_QUESTION_POINTS: u32 = 10;

pub fn main_question_count(level: Difficulty) -> u32 {
    MAIN_QUESTION_COUNT[level.index()]
}

pub fn damage_reduction(level: Difficulty) -> f64 {
    DAMAGE_REDUCTION[level.index()]
}

pub fn base_points(level: Difficulty) -> u32 {
    BASE_POINTS[level.index()]
}

/// Score of a perfect run without any bonus cash-in
pub fn max_possible_score(level: Difficulty) -> u32 {
    main_question_count(level) * base_points(level)
}
