//! Result lifecycle: submit, approve, reject.

use crate::models::{BracketMatch, EngineError, MatchId, MatchResult, MatchStatus, Side, TeamId};
use crate::store::MatchStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Admin adjustments applied at approval time.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ApprovalOverride {
    /// Replacement score line (score_a, score_b).
    #[serde(default)]
    pub scores: Option<(u32, u32)>,
    /// Explicit winner. Takes precedence over the scores; the only way to settle a tie.
    #[serde(default)]
    pub winner: Option<TeamId>,
}

impl ApprovalOverride {
    pub fn winner(team: TeamId) -> Self {
        Self {
            winner: Some(team),
            ..Self::default()
        }
    }

    pub fn scores(score_a: u32, score_b: u32) -> Self {
        Self {
            scores: Some((score_a, score_b)),
            ..Self::default()
        }
    }
}

fn require_status(m: &BracketMatch, expected: MatchStatus) -> Result<(), EngineError> {
    if m.status != expected {
        return Err(EngineError::InvalidMatchState {
            match_id: m.id,
            expected,
            actual: m.status,
        });
    }
    Ok(())
}

/// Record a proposed result for a scheduled match (Scheduled -> ResultPending).
/// No winner is computed here.
pub fn submit_result<S: MatchStore + ?Sized>(
    store: &S,
    match_id: MatchId,
    result: MatchResult,
) -> Result<BracketMatch, EngineError> {
    let current = store.get_match(match_id)?;
    require_status(&current, MatchStatus::Scheduled)?;

    let mut updated = current;
    updated.status = MatchStatus::ResultPending;
    updated.result = Some(result);
    let stored = store.compare_and_swap(MatchStatus::Scheduled, updated)?;
    log::info!("Result submitted for match {} (round {})", stored.id, stored.round);
    Ok(stored)
}

/// Finalise a pending result (ResultPending -> Completed) and set the winner.
///
/// Winner resolution: an override winner if given (must play in the match),
/// otherwise the side with the strictly greater score. A tie without an
/// override fails with `AmbiguousResult` and leaves the match pending.
pub fn approve_result<S: MatchStore + ?Sized>(
    store: &S,
    match_id: MatchId,
    decision: Option<ApprovalOverride>,
) -> Result<BracketMatch, EngineError> {
    let current = store.get_match(match_id)?;
    require_status(&current, MatchStatus::ResultPending)?;
    let decision = decision.unwrap_or_default();

    let mut result = current
        .result
        .clone()
        .ok_or_else(|| EngineError::Storage(format!("pending match {} has no result", match_id)))?;
    if let Some((score_a, score_b)) = decision.scores {
        result.score_a = score_a;
        result.score_b = score_b;
    }

    let by_score = result.leading_side().and_then(|side| current.team_on(side));
    let winner = match decision.winner {
        Some(team) if current.involves(team) => {
            if by_score.is_some_and(|leader| leader != team) {
                log::warn!(
                    "Match {}: admin picked {} against a {}-{} score line",
                    match_id,
                    team,
                    result.score_a,
                    result.score_b
                );
            }
            team
        }
        Some(team) => {
            return Err(EngineError::InvalidOverride {
                match_id,
                team_id: team,
            })
        }
        None => by_score.ok_or(EngineError::AmbiguousResult(match_id))?,
    };

    let mut updated = current;
    updated.result = Some(result);
    updated.winner = Some(winner);
    updated.status = MatchStatus::Completed;
    updated.completed_at = Some(Utc::now());
    let stored = store.compare_and_swap(MatchStatus::ResultPending, updated)?;
    log::info!(
        "Approved match {} (round {}): winner {}",
        stored.id,
        stored.round,
        winner
    );
    Ok(stored)
}

/// Deny a pending submission (ResultPending -> Scheduled) so it can be resubmitted.
pub fn reject_result<S: MatchStore + ?Sized>(
    store: &S,
    match_id: MatchId,
) -> Result<BracketMatch, EngineError> {
    let current = store.get_match(match_id)?;
    require_status(&current, MatchStatus::ResultPending)?;

    let mut updated = current;
    updated.status = MatchStatus::Scheduled;
    updated.result = None;
    let stored = store.compare_and_swap(MatchStatus::ResultPending, updated)?;
    log::info!("Rejected submitted result for match {}", stored.id);
    Ok(stored)
}

/// Winning side of a completed match, for display.
pub fn winning_side(m: &BracketMatch) -> Option<Side> {
    let winner = m.winner?;
    if winner == m.team_a {
        Some(Side::A)
    } else {
        Some(Side::B)
    }
}
