//! Ship weapons
//!
//! Weapons carry a damage multiplier, but the battle damage formula does not
//! read it. An upgrade is a morale signal shown to the player after a correct
//! bonus answer.

use crate::core::types::Difficulty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weapon tier, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Cannon,
    Torpedo,
    Missile,
    Railgun,
}

impl Weapon {
    pub fn name(&self) -> &'static str {
        match self {
            Weapon::Cannon => "Cannon",
            Weapon::Torpedo => "Torpedo",
            Weapon::Missile => "Missile",
            Weapon::Railgun => "Railgun",
        }
    }

    /// Nominal damage multiplier (1.0 = 100%)
    pub fn damage_multiplier(&self) -> f64 {
        match self {
            Weapon::Cannon => 1.0,
            Weapon::Torpedo => 1.1,
            Weapon::Missile => 1.2,
            Weapon::Railgun => 1.3,
        }
    }

    /// Weapon granted by a correct bonus answer at `level`
    pub fn bonus_upgrade(level: Difficulty) -> Weapon {
        match level {
            Difficulty::Easy => Weapon::Torpedo,
            Difficulty::Medium => Weapon::Missile,
            Difficulty::Hard | Difficulty::Extreme => Weapon::Railgun,
        }
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_ordered_by_multiplier() {
        let tiers = [Weapon::Cannon, Weapon::Torpedo, Weapon::Missile, Weapon::Railgun];
        for pair in tiers.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].damage_multiplier() < pair[1].damage_multiplier());
        }
    }

    #[test]
    fn test_bonus_upgrade_by_level() {
        assert_eq!(Weapon::bonus_upgrade(Difficulty::Easy), Weapon::Torpedo);
        assert_eq!(Weapon::bonus_upgrade(Difficulty::Medium), Weapon::Missile);
        assert_eq!(Weapon::bonus_upgrade(Difficulty::Hard), Weapon::Railgun);
        assert_eq!(Weapon::bonus_upgrade(Difficulty::Extreme), Weapon::Railgun);
    }

    #[test]
    fn test_default_is_cannon() {
        assert_eq!(Weapon::default(), Weapon::Cannon);
    }
}
