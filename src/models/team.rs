//! Team and the (league, season) key a bracket lives under.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

pub type LeagueId = Uuid;

pub type SeasonId = Uuid;

/// Identifies one tournament instance: a league in a given season.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct BracketKey {
    pub league_id: LeagueId,
    pub season_id: SeasonId,
}

impl BracketKey {
    pub fn new(league_id: LeagueId, season_id: SeasonId) -> Self {
        Self {
            league_id,
            season_id,
        }
    }
}

impl std::fmt::Display for BracketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "league {} / season {}", self.league_id, self.season_id)
    }
}

/// A registered team. Owned by the registration side; the engine only reads it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub league_id: LeagueId,
    pub season_id: SeasonId,
}

impl Team {
    /// Create a new team with a fresh id in the given league/season.
    pub fn new(name: impl Into<String>, key: BracketKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            league_id: key.league_id,
            season_id: key.season_id,
        }
    }

    pub fn key(&self) -> BracketKey {
        BracketKey::new(self.league_id, self.season_id)
    }
}
