//! Post-battle rank and star tier
//!
//! Both are pure functions of the final combat numbers. An enemy sunk at any
//! point counts as full completion.

use crate::combat::constants::max_possible_score;
use crate::core::types::Difficulty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter rank shown after a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Defeated,
    Bronze,
    Silver,
    Gold,
    #[serde(rename = "S+")]
    SPlus,
}

impl Rank {
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Defeated => "Defeated",
            Rank::Bronze => "Bronze",
            Rank::Silver => "Silver",
            Rank::Gold => "Gold",
            Rank::SPlus => "S+",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankResult {
    pub rank: Rank,
    /// 0..=100
    pub percent: u32,
}

/// Score as a percentage of a perfect run, forced to 100 when the enemy sank
pub fn score_percent(score: u32, level: Difficulty, enemy_hp: u32) -> u32 {
    if enemy_hp == 0 {
        return 100;
    }
    let max = u64::from(max_possible_score(level));
    if max == 0 {
        return 0;
    }
    let percent = u64::from(score) * 100 / max;
    percent.min(100) as u32
}

pub fn calculate_rank(score: u32, level: Difficulty, enemy_hp: u32, player_hp: u32) -> RankResult {
    let percent = score_percent(score, level, enemy_hp);
    let rank = if player_hp == 0 || percent < 50 {
        Rank::Defeated
    } else if percent == 100 {
        Rank::SPlus
    } else if percent >= 90 {
        Rank::Gold
    } else if percent >= 70 {
        Rank::Silver
    } else {
        Rank::Bronze
    };
    RankResult { rank, percent }
}

/// Star rating for the post-battle summary, in half-star steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StarTier {
    Zero,
    One,
    OneAndHalf,
    Two,
    TwoAndHalf,
    Three,
}

impl StarTier {
    pub fn from_percent(percent: u32, player_hp: u32) -> StarTier {
        match percent {
            _ if player_hp == 0 => StarTier::Zero,
            100.. => StarTier::Three,
            90..=99 => StarTier::TwoAndHalf,
            80..=89 => StarTier::Two,
            70..=79 => StarTier::OneAndHalf,
            51..=69 => StarTier::One,
            _ => StarTier::Zero,
        }
    }

    pub fn stars(&self) -> f32 {
        match self {
            StarTier::Zero => 0.0,
            StarTier::One => 1.0,
            StarTier::OneAndHalf => 1.5,
            StarTier::Two => 2.0,
            StarTier::TwoAndHalf => 2.5,
            StarTier::Three => 3.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StarTier::Three => "S+ (Perfect)",
            StarTier::TwoAndHalf => "Gold (Excellent)",
            StarTier::Two => "Silver (Good)",
            StarTier::OneAndHalf => "Bronze (Fair)",
            StarTier::One => "Pass (Needs Work)",
            StarTier::Zero => "Fail (Try Again)",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StarTier::Three => "Outstanding performance! You've mastered this subject!",
            StarTier::TwoAndHalf => "Excellent work! You're very close to perfection!",
            StarTier::Two => "Good job! You have a solid understanding.",
            StarTier::OneAndHalf => "Not bad! A bit more practice will help.",
            StarTier::One => "You passed, but there's room for improvement.",
            StarTier::Zero => "Don't give up! Review the material and try again.",
        }
    }
}

pub fn calculate_star_tier(
    score: u32,
    level: Difficulty,
    enemy_hp: u32,
    player_hp: u32,
) -> StarTier {
    StarTier::from_percent(score_percent(score, level, enemy_hp), player_hp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_thresholds() {
        // Easy: perfect run = 100 points
        let cases = [
            (100, Rank::SPlus),
            (95, Rank::Gold),
            (90, Rank::Gold),
            (89, Rank::Silver),
            (70, Rank::Silver),
            (69, Rank::Bronze),
            (50, Rank::Bronze),
            (49, Rank::Defeated),
            (0, Rank::Defeated),
        ];
        for (score, expected) in cases {
            let result = calculate_rank(score, Difficulty::Easy, 10, 100);
            assert_eq!(result.rank, expected, "score {}", score);
            assert_eq!(result.percent, score);
        }
    }

    #[test]
    fn test_sunk_enemy_forces_full_percent() {
        let result = calculate_rank(0, Difficulty::Extreme, 0, 40);
        assert_eq!(result.percent, 100);
        assert_eq!(result.rank, Rank::SPlus);
    }

    #[test]
    fn test_sunk_player_always_defeated() {
        let result = calculate_rank(300, Difficulty::Medium, 20, 0);
        assert_eq!(result.percent, 100);
        assert_eq!(result.rank, Rank::Defeated);
    }

    #[test]
    fn test_percent_floors_and_caps() {
        // Medium max = 300; 250 * 100 / 300 = 83.3
        assert_eq!(score_percent(250, Difficulty::Medium, 5), 83);
        assert_eq!(score_percent(900, Difficulty::Medium, 5), 100);
    }

    #[test]
    fn test_star_thresholds() {
        assert_eq!(StarTier::from_percent(100, 50), StarTier::Three);
        assert_eq!(StarTier::from_percent(92, 50), StarTier::TwoAndHalf);
        assert_eq!(StarTier::from_percent(80, 50), StarTier::Two);
        assert_eq!(StarTier::from_percent(75, 50), StarTier::OneAndHalf);
        assert_eq!(StarTier::from_percent(51, 50), StarTier::One);
        assert_eq!(StarTier::from_percent(50, 50), StarTier::Zero);
        assert_eq!(StarTier::from_percent(100, 0), StarTier::Zero);
    }

    #[test]
    fn test_star_values_and_labels() {
        assert_eq!(StarTier::TwoAndHalf.stars(), 2.5);
        assert_eq!(StarTier::Three.label(), "S+ (Perfect)");
        assert_eq!(StarTier::Zero.label(), "Fail (Try Again)");
    }

    #[test]
    fn test_rank_display() {
        assert_eq!(Rank::SPlus.to_string(), "S+");
        assert_eq!(Rank::Defeated.to_string(), "Defeated");
    }
}
