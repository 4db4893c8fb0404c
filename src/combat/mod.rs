//! Combat rules engine and battle sessions

pub mod constants;
pub mod rules;
pub mod session;
pub mod state;
pub mod weapons;

pub use rules::{apply_answer, calculate_damage, calculate_points, resolve_answer, AnswerResolution, Points};
pub use session::{AnswerEvent, AnswerKind, CombatSession, TurnReport};
pub use state::{CombatOutcome, CombatPhase, CombatState};
pub use weapons::Weapon;
