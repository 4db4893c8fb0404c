//! Score storage collaborator
//!
//! The combat core never touches storage. Drivers hand finished
//! `SessionRecord`s to a `ScoreStore` and read leaderboards back from it.

use crate::core::error::{BroadsideError, Result};
use crate::core::types::{Difficulty, PlayerId};
use crate::scoring::{LeaderboardEntry, SessionRecord};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Storage operations the game needs from a backend
pub trait ScoreStore {
    /// Look up a player by name, creating one if needed
    fn register_player(&mut self, name: &str) -> Result<PlayerId>;

    fn player_name(&self, player: PlayerId) -> Option<String>;

    fn record_session(&mut self, record: SessionRecord) -> Result<()>;

    /// Sum of every recorded session score for a player
    fn total_score(&self, player: PlayerId) -> Result<u32>;

    /// Best sessions first
    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>>;

    fn mark_completed(&mut self, player: PlayerId, subject: &str, difficulty: Difficulty)
        -> Result<()>;

    fn has_completed(&self, player: PlayerId, subject: &str, difficulty: Difficulty)
        -> Result<bool>;
}

/// In-process store, serializable to JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryScoreStore {
    players: AHashMap<PlayerId, String>,
    sessions: Vec<SessionRecord>,
    completions: AHashSet<(PlayerId, String, Difficulty)>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn sessions(&self) -> &[SessionRecord] {
        &self.sessions
    }

    fn require_player(&self, player: PlayerId) -> Result<()> {
        if self.players.contains_key(&player) {
            Ok(())
        } else {
            Err(BroadsideError::Storage(format!("unknown player {}", player)))
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn register_player(&mut self, name: &str) -> Result<PlayerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BroadsideError::Storage("player name is empty".into()));
        }
        if let Some((id, _)) = self.players.iter().find(|(_, n)| n.as_str() == name) {
            return Ok(*id);
        }
        let id = PlayerId::new();
        self.players.insert(id, name.to_string());
        tracing::debug!("Registered player {} as {}", name, id);
        Ok(id)
    }

    fn player_name(&self, player: PlayerId) -> Option<String> {
        self.players.get(&player).cloned()
    }

    fn record_session(&mut self, record: SessionRecord) -> Result<()> {
        self.require_player(record.player_id)?;
        self.sessions.push(record);
        Ok(())
    }

    fn total_score(&self, player: PlayerId) -> Result<u32> {
        self.require_player(player)?;
        Ok(self
            .sessions
            .iter()
            .filter(|s| s.player_id == player)
            .map(|s| s.score)
            .sum())
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let mut ranked: Vec<&SessionRecord> = self.sessions.iter().collect();
        // Stable sort keeps earlier sessions ahead on ties
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(ranked
            .into_iter()
            .filter_map(|record| {
                self.players
                    .get(&record.player_id)
                    .map(|name| LeaderboardEntry::new(name.as_str(), record))
            })
            .take(limit)
            .collect())
    }

    fn mark_completed(
        &mut self,
        player: PlayerId,
        subject: &str,
        difficulty: Difficulty,
    ) -> Result<()> {
        self.require_player(player)?;
        self.completions
            .insert((player, subject.to_string(), difficulty));
        Ok(())
    }

    fn has_completed(
        &self,
        player: PlayerId,
        subject: &str,
        difficulty: Difficulty,
    ) -> Result<bool> {
        Ok(self
            .completions
            .contains(&(player, subject.to_string(), difficulty)))
    }
}
