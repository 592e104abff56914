//! CSV export of a bracket (one row per match).

use crate::logic::results::winning_side;
use crate::models::{BracketKey, BracketMatch, EngineError, MatchStatus, Side, TeamId};
use crate::store::MatchStore;
use serde::Serialize;

#[derive(Serialize)]
struct MatchRow {
    round: u32,
    position: u32,
    match_id: uuid::Uuid,
    team_a: TeamId,
    team_b: Option<TeamId>,
    status: MatchStatus,
    score_a: Option<u32>,
    score_b: Option<u32>,
    winner: Option<TeamId>,
    winner_side: Option<Side>,
    bye: bool,
}

impl From<&BracketMatch> for MatchRow {
    fn from(m: &BracketMatch) -> Self {
        Self {
            round: m.round,
            position: m.position,
            match_id: m.id,
            team_a: m.team_a,
            team_b: m.team_b,
            status: m.status,
            score_a: m.result.as_ref().map(|r| r.score_a),
            score_b: m.result.as_ref().map(|r| r.score_b),
            winner: m.winner,
            winner_side: winning_side(m),
            bye: m.is_bye(),
        }
    }
}

/// Bracket as CSV with a header row; rounds ascending, creation order within a round.
pub fn export_bracket_csv<S: MatchStore + ?Sized>(
    store: &S,
    key: BracketKey,
) -> Result<String, EngineError> {
    let matches = store.bracket_matches(key)?;
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for m in &matches {
        wtr.serialize(MatchRow::from(m))
            .map_err(|e| EngineError::Export(e.to_string()))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| EngineError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| EngineError::Export(e.to_string()))
}
