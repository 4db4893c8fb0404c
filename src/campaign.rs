//! Difficulty unlock progression
//!
//! Easy is always open. Clearing every subject at a difficulty opens the next
//! one. A subject is cleared with at least one star, so a bare 50% run must
//! be retried.

use crate::core::types::Difficulty;
use crate::scoring::StarTier;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    unlocked: BTreeSet<Difficulty>,
    /// Subjects cleared at each difficulty since it was last reset
    cleared: BTreeMap<Difficulty, BTreeSet<String>>,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            unlocked: BTreeSet::from([Difficulty::Easy]),
            cleared: BTreeMap::new(),
        }
    }
}

impl Campaign {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a battle with this star tier clears its subject
    pub fn clears(stars: StarTier) -> bool {
        stars >= StarTier::One
    }

    pub fn is_unlocked(&self, difficulty: Difficulty) -> bool {
        self.unlocked.contains(&difficulty)
    }

    pub fn unlocked(&self) -> impl Iterator<Item = Difficulty> + '_ {
        self.unlocked.iter().copied()
    }

    /// Subjects cleared at `difficulty` that still count toward its unlock
    pub fn cleared_subjects(&self, difficulty: Difficulty) -> BTreeSet<String> {
        self.cleared.get(&difficulty).cloned().unwrap_or_default()
    }

    /// Record a finished battle; returns a difficulty it unlocked, if any
    ///
    /// `all_subjects` is the catalog's subject list at this difficulty.
    pub fn record_result(
        &mut self,
        subject: &str,
        difficulty: Difficulty,
        stars: StarTier,
        all_subjects: &BTreeSet<String>,
    ) -> Option<Difficulty> {
        if !Self::clears(stars) || !self.is_unlocked(difficulty) {
            return None;
        }

        let cleared = self.cleared.entry(difficulty).or_default();
        cleared.insert(subject.to_string());
        if !all_subjects.iter().all(|s| cleared.contains(s)) {
            return None;
        }

        cleared.clear();
        let next = difficulty.next()?;
        if self.unlocked.insert(next) {
            tracing::info!("{} difficulty unlocked", next);
            Some(next)
        } else {
            None
        }
    }
}
