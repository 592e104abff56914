//! Persistence seams: the match table and the registered-team source.

mod memory;
mod registry;

pub use memory::InMemoryMatchStore;
pub use registry::{InMemoryRegistry, TeamRegistry};

use crate::models::{BracketKey, BracketMatch, EngineError, MatchId, MatchStatus};
use std::collections::HashSet;
use std::sync::Mutex;

/// Durable record of matches, keyed by (league, season, round, position).
///
/// Every write is all-or-nothing. Reads may be slightly stale; callers re-check
/// preconditions under [`MatchStore::lock_bracket`] before writing.
pub trait MatchStore: Send + Sync {
    /// Exclusive advisory lock for generate/advance on one bracket.
    /// Fails with `ConcurrencyConflict` instead of waiting.
    fn lock_bracket(&self, key: BracketKey) -> Result<BracketLock<'_>, EngineError>;

    /// Max round with at least one match, `None` for an empty bracket.
    fn highest_round(&self, key: BracketKey) -> Result<Option<u32>, EngineError>;

    /// Matches of one round in creation order.
    fn round_matches(&self, key: BracketKey, round: u32) -> Result<Vec<BracketMatch>, EngineError>;

    /// All matches of a bracket ordered by round then position.
    fn bracket_matches(&self, key: BracketKey) -> Result<Vec<BracketMatch>, EngineError>;

    fn get_match(&self, id: MatchId) -> Result<BracketMatch, EngineError>;

    /// Persist a whole round at once.
    ///
    /// Round 1 requires an empty bracket (`AlreadyGenerated`); round N > 1
    /// requires round N-1 to be the highest round (`AlreadyAdvanced` if N
    /// exists, `RoundNotFound` if N-1 does not).
    fn insert_round(
        &self,
        key: BracketKey,
        round: u32,
        matches: Vec<BracketMatch>,
    ) -> Result<Vec<BracketMatch>, EngineError>;

    /// Write the mutable fields of `updated` (status, result, winner,
    /// completion time) only if the stored status still equals `expected`.
    fn compare_and_swap(
        &self,
        expected: MatchStatus,
        updated: BracketMatch,
    ) -> Result<BracketMatch, EngineError>;
}

/// Set of brackets currently held by a generate/advance call.
#[derive(Debug, Default)]
pub struct BracketLocks {
    held: Mutex<HashSet<BracketKey>>,
}

impl BracketLocks {
    pub fn try_acquire(&self, key: BracketKey) -> Result<BracketLock<'_>, EngineError> {
        let mut held = self
            .held
            .lock()
            .map_err(|_| EngineError::Storage("bracket lock poisoned".to_string()))?;
        if !held.insert(key) {
            log::warn!("Bracket {} is locked by another operation", key);
            return Err(EngineError::ConcurrencyConflict(format!(
                "{} is being modified",
                key
            )));
        }
        Ok(BracketLock { key, locks: self })
    }
}

/// Released on drop.
#[derive(Debug)]
pub struct BracketLock<'a> {
    key: BracketKey,
    locks: &'a BracketLocks,
}

impl BracketLock<'_> {
    pub fn key(&self) -> BracketKey {
        self.key
    }
}

impl Drop for BracketLock<'_> {
    fn drop(&mut self) {
        // Poisoned set: recover the inner value so the key is still released.
        let mut held = match self.locks.held.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        held.remove(&self.key);
    }
}
