//! Read-only bracket queries: champion, bracket view, review queue, standings.

use crate::models::{
    BracketKey, BracketMatch, BracketView, EngineError, MatchStatus, RoundView, Standing, TeamId,
};
use crate::store::MatchStore;
use std::collections::HashMap;

/// Winner of the sole, completed match of the highest round.
pub fn get_champion<S: MatchStore + ?Sized>(
    store: &S,
    key: BracketKey,
) -> Result<TeamId, EngineError> {
    let Some(highest) = store.highest_round(key)? else {
        return Err(EngineError::NoChampionYet);
    };
    RoundView::new(highest, store.round_matches(key, highest)?)
        .champion()
        .ok_or(EngineError::NoChampionYet)
}

/// All rounds of a bracket in order.
pub fn bracket_view<S: MatchStore + ?Sized>(
    store: &S,
    key: BracketKey,
) -> Result<BracketView, EngineError> {
    let mut rounds: Vec<RoundView> = Vec::new();
    let mut current: Vec<BracketMatch> = Vec::new();
    for m in store.bracket_matches(key)? {
        if current.first().is_some_and(|first| first.round != m.round) {
            let round = current[0].round;
            rounds.push(RoundView::new(round, std::mem::take(&mut current)));
        }
        current.push(m);
    }
    if let Some(round) = current.first().map(|m| m.round) {
        rounds.push(RoundView::new(round, current));
    }
    log::debug!("Bracket view for {}: {} round(s)", key, rounds.len());
    Ok(BracketView::from_rounds(key, rounds))
}

/// Submissions awaiting review, oldest first.
pub fn pending_results<S: MatchStore + ?Sized>(
    store: &S,
    key: BracketKey,
) -> Result<Vec<BracketMatch>, EngineError> {
    let mut pending: Vec<BracketMatch> = store
        .bracket_matches(key)?
        .into_iter()
        .filter(|m| m.status == MatchStatus::ResultPending)
        .collect();
    pending.sort_by_key(|m| m.result.as_ref().map(|r| r.submitted_at));
    Ok(pending)
}

/// Win/loss records over completed matches; most wins first, then fewest losses.
pub fn standings<S: MatchStore + ?Sized>(
    store: &S,
    key: BracketKey,
) -> Result<Vec<Standing>, EngineError> {
    let mut table: HashMap<TeamId, Standing> = HashMap::new();
    for m in store.bracket_matches(key)? {
        for team in [Some(m.team_a), m.team_b].into_iter().flatten() {
            let s = table.entry(team).or_insert_with(|| Standing::new(team));
            s.reached_round = s.reached_round.max(m.round);
        }
        if !m.is_completed() {
            continue;
        }
        if m.is_bye() {
            table.entry(m.team_a).or_insert_with(|| Standing::new(m.team_a)).byes += 1;
            continue;
        }
        if let (Some(winner), Some(loser)) = (m.winner, m.loser()) {
            table.entry(winner).or_insert_with(|| Standing::new(winner)).wins += 1;
            let s = table.entry(loser).or_insert_with(|| Standing::new(loser));
            s.losses += 1;
            s.eliminated = true;
        }
    }

    let mut rows: Vec<Standing> = table.into_values().collect();
    rows.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(a.losses.cmp(&b.losses))
            .then(b.reached_round.cmp(&a.reached_round))
            .then(a.team_id.cmp(&b.team_id))
    });
    Ok(rows)
}
