//! Registered teams per league/season, as supplied by the registration side.

use crate::models::{BracketKey, EngineError, Team, TeamId};
use std::collections::HashMap;
use std::sync::RwLock;

/// Source of the teams registered for a league/season.
pub trait TeamRegistry: Send + Sync {
    /// Team ids in registration order.
    fn list_registered_teams(&self, key: BracketKey) -> Result<Vec<TeamId>, EngineError>;
}

/// Registry kept in memory; used by the web binary and tests.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    teams: RwLock<HashMap<BracketKey, Vec<Team>>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team under its league/season. Re-registering the same id is a no-op.
    pub fn register(&self, team: Team) -> Result<Team, EngineError> {
        let mut teams = self
            .teams
            .write()
            .map_err(|_| EngineError::Storage("registry lock poisoned".to_string()))?;
        let entry = teams.entry(team.key()).or_default();
        if let Some(existing) = entry.iter().find(|t| t.id == team.id) {
            return Ok(existing.clone());
        }
        entry.push(team.clone());
        Ok(team)
    }

    /// Full team records of a league/season in registration order.
    pub fn teams(&self, key: BracketKey) -> Result<Vec<Team>, EngineError> {
        let teams = self
            .teams
            .read()
            .map_err(|_| EngineError::Storage("registry lock poisoned".to_string()))?;
        Ok(teams.get(&key).cloned().unwrap_or_default())
    }
}

impl TeamRegistry for InMemoryRegistry {
    fn list_registered_teams(&self, key: BracketKey) -> Result<Vec<TeamId>, EngineError> {
        Ok(self.teams(key)?.into_iter().map(|t| t.id).collect())
    }
}

/// Fixed list, handy when the caller already holds the roster.
impl TeamRegistry for Vec<TeamId> {
    fn list_registered_teams(&self, _key: BracketKey) -> Result<Vec<TeamId>, EngineError> {
        Ok(self.clone())
    }
}
