//! Battle ranking and player statistics

pub mod progress;
pub mod rank;

pub use progress::{LeaderboardEntry, PlayerProgress, SessionRecord};
pub use rank::{calculate_rank, calculate_star_tier, score_percent, Rank, RankResult, StarTier};
