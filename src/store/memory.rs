//! In-memory match table.

use crate::models::{BracketKey, BracketMatch, EngineError, MatchId, MatchStatus};
use crate::store::{BracketLock, BracketLocks, MatchStore};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Row position: ordering by this key gives bracket, round, creation order.
type RowKey = (BracketKey, u32, u32);

#[derive(Debug, Default)]
struct Tables {
    rows: BTreeMap<RowKey, BracketMatch>,
    by_id: HashMap<MatchId, RowKey>,
}

impl Tables {
    fn bracket_range(&self, key: BracketKey) -> impl DoubleEndedIterator<Item = &BracketMatch> {
        self.rows
            .range((key, 0, 0)..=(key, u32::MAX, u32::MAX))
            .map(|(_, m)| m)
    }

    fn round_range(&self, key: BracketKey, round: u32) -> impl Iterator<Item = &BracketMatch> {
        self.rows
            .range((key, round, 0)..=(key, round, u32::MAX))
            .map(|(_, m)| m)
    }

    fn highest_round(&self, key: BracketKey) -> Option<u32> {
        self.bracket_range(key).next_back().map(|m| m.round)
    }
}

/// Thread-safe match store backed by an ordered map, so highest-round and
/// per-round lookups are range queries rather than scans.
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    tables: RwLock<Tables>,
    locks: BracketLocks,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored matches across all brackets.
    pub fn len(&self) -> usize {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rows
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, EngineError> {
        self.tables
            .read()
            .map_err(|_| EngineError::Storage("match table lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, EngineError> {
        self.tables
            .write()
            .map_err(|_| EngineError::Storage("match table lock poisoned".to_string()))
    }
}

impl MatchStore for InMemoryMatchStore {
    fn lock_bracket(&self, key: BracketKey) -> Result<BracketLock<'_>, EngineError> {
        self.locks.try_acquire(key)
    }

    fn highest_round(&self, key: BracketKey) -> Result<Option<u32>, EngineError> {
        Ok(self.read()?.highest_round(key))
    }

    fn round_matches(&self, key: BracketKey, round: u32) -> Result<Vec<BracketMatch>, EngineError> {
        Ok(self.read()?.round_range(key, round).cloned().collect())
    }

    fn bracket_matches(&self, key: BracketKey) -> Result<Vec<BracketMatch>, EngineError> {
        Ok(self.read()?.bracket_range(key).cloned().collect())
    }

    fn get_match(&self, id: MatchId) -> Result<BracketMatch, EngineError> {
        let tables = self.read()?;
        tables
            .by_id
            .get(&id)
            .and_then(|row| tables.rows.get(row))
            .cloned()
            .ok_or(EngineError::MatchNotFound(id))
    }

    fn insert_round(
        &self,
        key: BracketKey,
        round: u32,
        matches: Vec<BracketMatch>,
    ) -> Result<Vec<BracketMatch>, EngineError> {
        if round == 0 {
            return Err(EngineError::RoundNotFound(0));
        }
        if matches.is_empty() {
            return Err(EngineError::Storage(
                "refusing to write an empty round".to_string(),
            ));
        }
        if let Some(m) = matches.iter().find(|m| m.key() != key || m.round != round) {
            return Err(EngineError::Storage(format!(
                "match {} does not belong to round {} of {}",
                m.id, round, key
            )));
        }
        let mut positions = HashSet::with_capacity(matches.len());
        if let Some(m) = matches.iter().find(|m| !positions.insert(m.position)) {
            return Err(EngineError::Storage(format!(
                "duplicate position {} in round {} of {}",
                m.position, round, key
            )));
        }

        let mut tables = self.write()?;
        match (round, tables.highest_round(key)) {
            (1, Some(_)) => return Err(EngineError::AlreadyGenerated(key)),
            (1, None) => {}
            (_, None) => return Err(EngineError::NoBracket(key)),
            (_, Some(highest)) if highest >= round => {
                return Err(EngineError::AlreadyAdvanced { round })
            }
            (_, Some(highest)) if highest + 1 != round => {
                return Err(EngineError::RoundNotFound(round - 1))
            }
            _ => {}
        }
        if let Some(m) = matches.iter().find(|m| tables.by_id.contains_key(&m.id)) {
            return Err(EngineError::Storage(format!("duplicate match id {}", m.id)));
        }

        for m in &matches {
            let row = (key, m.round, m.position);
            tables.by_id.insert(m.id, row);
            tables.rows.insert(row, m.clone());
        }
        Ok(matches)
    }

    fn compare_and_swap(
        &self,
        expected: MatchStatus,
        updated: BracketMatch,
    ) -> Result<BracketMatch, EngineError> {
        let mut tables = self.write()?;
        let row = *tables
            .by_id
            .get(&updated.id)
            .ok_or(EngineError::MatchNotFound(updated.id))?;
        let stored = tables
            .rows
            .get_mut(&row)
            .ok_or(EngineError::MatchNotFound(updated.id))?;
        if stored.status != expected {
            return Err(EngineError::ConcurrencyConflict(format!(
                "match {} changed to {} meanwhile",
                stored.id, stored.status
            )));
        }
        stored.status = updated.status;
        stored.result = updated.result;
        stored.winner = updated.winner;
        stored.completed_at = updated.completed_at;
        Ok(stored.clone())
    }
}
