//! Round N+1 from the winners of a complete round N.

use crate::logic::pairing::shuffle_and_pair;
use crate::models::{BracketKey, BracketMatch, EngineError, RoundView};
use crate::store::MatchStore;
use rand::Rng;

/// Advance from the current highest round.
///
/// Repeating a call that already succeeded reports `RoundIncomplete` for the
/// new round, never `AlreadyAdvanced`. Use [`advance_round_from`] with the
/// round number to get `AlreadyAdvanced` on a repeat.
pub fn advance_round<S, R>(
    store: &S,
    key: BracketKey,
    rng: &mut R,
) -> Result<Vec<BracketMatch>, EngineError>
where
    S: MatchStore + ?Sized,
    R: Rng + ?Sized,
{
    advance_round_from(store, key, None, rng)
}

/// Advance from `from_round`, or from the highest round when `None`.
///
/// Naming the round lets a caller that already advanced get `AlreadyAdvanced`
/// on a repeat instead of `RoundIncomplete` about the round it just created.
pub fn advance_round_from<S, R>(
    store: &S,
    key: BracketKey,
    from_round: Option<u32>,
    rng: &mut R,
) -> Result<Vec<BracketMatch>, EngineError>
where
    S: MatchStore + ?Sized,
    R: Rng + ?Sized,
{
    let _lock = store.lock_bracket(key)?;

    let highest = store.highest_round(key)?.ok_or(EngineError::NoBracket(key))?;
    let round = from_round.unwrap_or(highest);
    if round == 0 || round > highest {
        return Err(EngineError::RoundNotFound(round));
    }
    if round < highest {
        return Err(EngineError::AlreadyAdvanced { round: round + 1 });
    }

    let current = RoundView::new(round, store.round_matches(key, round)?);
    if !current.complete {
        return Err(EngineError::RoundIncomplete {
            round,
            unfinished: current.unfinished(),
        });
    }
    if current.matches.len() == 1 {
        return Err(EngineError::TournamentComplete);
    }

    let next = round + 1;
    let matches = shuffle_and_pair(key, next, current.winners(), rng);
    let created = store.insert_round(key, next, matches)?;
    log::info!(
        "Advanced {} to round {}: {} match(es)",
        key,
        next,
        created.len()
    );
    Ok(created)
}
