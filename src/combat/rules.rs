//! Combat rules: damage, points and the per-answer state transition
//!
//! Everything here is a pure function of its inputs. Damage is calibrated so
//! that, before damage reduction, `main_question_count` correct answers sink
//! a 100-hull enemy. A correct bonus answer adds 10% on top.
//!
//! Weapon multipliers are deliberately absent from the damage formula; see
//! [`crate::combat::weapons`].

use crate::combat::constants::{
    base_points, damage_reduction, main_question_count, BONUS_DAMAGE_MULTIPLIER,
    DAMAGE_CALIBRATION_HP,
};
use crate::combat::state::CombatState;
use crate::core::types::Difficulty;

/// Damage per correct answer before bonus and reduction
pub fn base_damage(level: Difficulty) -> f64 {
    DAMAGE_CALIBRATION_HP / f64::from(main_question_count(level))
}

/// Hull damage dealt to the enemy by one correct main answer
///
/// Truncates toward zero.
pub fn calculate_damage(level: Difficulty, bonus_active: bool) -> u32 {
    let mut damage = base_damage(level);
    if bonus_active {
        damage *= BONUS_DAMAGE_MULTIPLIER;
    }
    damage *= 1.0 - damage_reduction(level);
    damage as u32
}

/// Points earned by one correct main answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Points {
    pub base: u32,
    /// Remaining questions cashed in after an early kill with the bonus active
    pub cash_in: u32,
}

impl Points {
    pub fn total(&self) -> u32 {
        self.base + self.cash_in
    }
}

pub fn calculate_points(
    level: Difficulty,
    questions_left: u32,
    bonus_active: bool,
    enemy_defeated: bool,
) -> Points {
    let base = base_points(level);
    let cash_in = if enemy_defeated && bonus_active && questions_left > 0 {
        questions_left * base
    } else {
        0
    };
    Points { base, cash_in }
}

/// New state plus a breakdown of what one answer did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerResolution {
    pub state: CombatState,
    pub damage_dealt: u32,
    pub points: Points,
    pub shield_lost: bool,
    pub hp_lost: u32,
    /// This answer switched the bonus latch on
    pub bonus_activated: bool,
}

impl AnswerResolution {
    fn unchanged(state: CombatState) -> Self {
        Self {
            state,
            damage_dealt: 0,
            points: Points::default(),
            shield_lost: false,
            hp_lost: 0,
            bonus_activated: false,
        }
    }
}

/// Resolve one answer against the current state
///
/// `questions_left` counts the questions after this one.
pub fn resolve_answer(
    state: &CombatState,
    is_bonus_question: bool,
    is_correct: bool,
    questions_left: u32,
) -> AnswerResolution {
    let mut next = *state;

    // The bonus question only flips the latch; it never touches hulls or score
    if is_bonus_question && !state.bonus_answered {
        let mut resolution = AnswerResolution::unchanged(next);
        if is_correct {
            resolution.bonus_activated = !state.bonus_active;
            resolution.state.bonus_active = true;
            resolution.state.bonus_answered = true;
        } else {
            resolution.state.bonus_answered = false;
        }
        return resolution;
    }

    let mut resolution = AnswerResolution::unchanged(next);

    if is_correct {
        let damage = calculate_damage(state.level, next.bonus_active);
        let dealt = damage.min(next.enemy_hp);
        next.enemy_hp -= dealt;
        next.main_questions_done += 1;

        let points = calculate_points(
            state.level,
            questions_left,
            next.bonus_active,
            next.enemy_hp == 0,
        );
        next.score += points.total();

        resolution.damage_dealt = dealt;
        resolution.points = points;
    } else if next.player_shields > 0 {
        next.player_shields -= 1;
        resolution.shield_lost = true;
    } else {
        // Enemy return fire hits as hard as a correct answer scores
        let lost = base_points(state.level).min(next.player_hp);
        next.player_hp -= lost;
        resolution.hp_lost = lost;
    }

    next.combat_over = next.someone_sunk();
    resolution.state = next;
    resolution
}

/// The single state-transition entry point
pub fn apply_answer(
    state: &CombatState,
    is_bonus_question: bool,
    is_correct: bool,
    questions_left: u32,
) -> CombatState {
    resolve_answer(state, is_bonus_question, is_correct, questions_left).state
}
