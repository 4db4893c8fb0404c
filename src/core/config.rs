//! Battle configuration with documented defaults
//!
//! The per-level tables (question counts, damage reduction, points) are fixed
//! game rules and live in [`crate::combat::constants`]. Everything here is a
//! tunable that a deployment may override from a TOML file.

use crate::combat::constants::{
    ANSWER_TIMEOUT_SECS, ENEMY_MAX_HP, PLAYER_MAX_HP, PLAYER_MAX_SHIELDS, SKIPPED_QUESTION_POINTS,
};
use crate::core::error::{BroadsideError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a battle and its question bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Player hull points at session start
    pub player_max_hp: u32,

    /// Shield charges at session start
    ///
    /// Each wrong answer drains one charge before hull is touched.
    pub player_max_shields: u32,

    /// Enemy hull points at session start
    ///
    /// The damage formula is calibrated against 100; other values change
    /// how many hits a perfect run needs.
    pub enemy_max_hp: u32,

    /// Seconds the driver allows per question before synthesizing a timeout
    ///
    /// The core never measures time. Drivers read this value.
    pub answer_timeout_secs: u64,

    /// Points per unanswered question when the enemy sinks early
    pub skipped_question_points: u32,

    /// Seed for the question bank's generator
    ///
    /// `None` seeds once from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            player_max_hp: PLAYER_MAX_HP,
            player_max_shields: PLAYER_MAX_SHIELDS,
            enemy_max_hp: ENEMY_MAX_HP,
            answer_timeout_secs: ANSWER_TIMEOUT_SECS,
            skipped_question_points: SKIPPED_QUESTION_POINTS,
            rng_seed: None,
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BattleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded battle config from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.player_max_hp == 0 {
            return Err(BroadsideError::Config("player_max_hp must be positive".into()));
        }
        if self.enemy_max_hp == 0 {
            return Err(BroadsideError::Config("enemy_max_hp must be positive".into()));
        }
        if self.answer_timeout_secs == 0 {
            return Err(BroadsideError::Config(
                "answer_timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}
