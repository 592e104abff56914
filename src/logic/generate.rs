//! Round 1: turn the registered roster into a bracket.

use crate::logic::pairing::{rounds_needed, shuffle_and_pair};
use crate::models::{BracketKey, BracketMatch, EngineError, TeamId};
use crate::store::MatchStore;
use rand::Rng;
use std::collections::HashSet;

/// Generate round 1 for a league/season that has no matches yet.
///
/// Duplicate team ids are dropped (first occurrence kept). Requires at least
/// two distinct teams. All matches are written in a single store call.
pub fn generate_bracket<S, R>(
    store: &S,
    key: BracketKey,
    teams: &[TeamId],
    rng: &mut R,
) -> Result<Vec<BracketMatch>, EngineError>
where
    S: MatchStore + ?Sized,
    R: Rng + ?Sized,
{
    let _lock = store.lock_bracket(key)?;

    if store.highest_round(key)?.is_some() {
        return Err(EngineError::AlreadyGenerated(key));
    }

    let mut seen = HashSet::with_capacity(teams.len());
    let roster: Vec<TeamId> = teams.iter().copied().filter(|id| seen.insert(*id)).collect();
    if roster.len() != teams.len() {
        log::warn!(
            "Dropped {} duplicate registration(s) for {}",
            teams.len() - roster.len(),
            key
        );
    }
    if roster.len() < 2 {
        return Err(EngineError::InsufficientTeams {
            registered: roster.len(),
        });
    }

    let rounds = rounds_needed(roster.len());
    let matches = shuffle_and_pair(key, 1, roster, rng);
    let created = store.insert_round(key, 1, matches)?;
    log::info!(
        "Generated bracket for {}: {} match(es) in round 1, {} round(s) to play",
        key,
        created.len(),
        rounds
    );
    Ok(created)
}
