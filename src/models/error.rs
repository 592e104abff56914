//! Errors surfaced by engine operations.

use crate::models::game::{MatchId, MatchStatus};
use crate::models::team::{BracketKey, TeamId};

/// Errors that can occur during bracket operations.
///
/// Every precondition failure has its own variant so the admin layer can show
/// an exact remediation. Only `ConcurrencyConflict` is safe to retry as-is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// Fewer than two teams registered for the league/season.
    InsufficientTeams { registered: usize },
    /// The league/season already has matches.
    AlreadyGenerated(BracketKey),
    /// The league/season has no matches yet.
    NoBracket(BracketKey),
    /// No match with this id.
    MatchNotFound(MatchId),
    /// The match is not in the status the operation requires.
    InvalidMatchState {
        match_id: MatchId,
        expected: MatchStatus,
        actual: MatchStatus,
    },
    /// Scores are tied and no winner override was supplied.
    AmbiguousResult(MatchId),
    /// Override winner is not one of the match's teams.
    InvalidOverride { match_id: MatchId, team_id: TeamId },
    /// Some match of the round is not completed.
    RoundIncomplete { round: u32, unfinished: usize },
    /// The round does not exist in this bracket.
    RoundNotFound(u32),
    /// Highest round has a single match; ask for the champion instead.
    TournamentComplete,
    /// The next round already has matches.
    AlreadyAdvanced { round: u32 },
    /// The final has not been decided.
    NoChampionYet,
    /// Lock contention or lost compare-and-swap.
    ConcurrencyConflict(String),
    /// Backend failure.
    Storage(String),
    /// Writing a bracket export failed.
    Export(String),
}

impl EngineError {
    /// Whether retrying the same call without any state change can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::ConcurrencyConflict(_))
    }

    /// Stable snake_case name for API clients.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InsufficientTeams { .. } => "insufficient_teams",
            EngineError::AlreadyGenerated(_) => "already_generated",
            EngineError::NoBracket(_) => "no_bracket",
            EngineError::MatchNotFound(_) => "match_not_found",
            EngineError::InvalidMatchState { .. } => "invalid_match_state",
            EngineError::AmbiguousResult(_) => "ambiguous_result",
            EngineError::InvalidOverride { .. } => "invalid_override",
            EngineError::RoundIncomplete { .. } => "round_incomplete",
            EngineError::RoundNotFound(_) => "round_not_found",
            EngineError::TournamentComplete => "tournament_complete",
            EngineError::AlreadyAdvanced { .. } => "already_advanced",
            EngineError::NoChampionYet => "no_champion_yet",
            EngineError::ConcurrencyConflict(_) => "concurrency_conflict",
            EngineError::Storage(_) => "storage",
            EngineError::Export(_) => "export",
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InsufficientTeams { registered } => {
                write!(
                    f,
                    "Need at least 2 registered teams to generate a bracket (have {})",
                    registered
                )
            }
            EngineError::AlreadyGenerated(key) => {
                write!(f, "Bracket already generated for {}", key)
            }
            EngineError::NoBracket(key) => write!(f, "No bracket has been generated for {}", key),
            EngineError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            EngineError::InvalidMatchState {
                match_id,
                expected,
                actual,
            } => write!(f, "Match {} is {}, expected {}", match_id, actual, expected),
            EngineError::AmbiguousResult(id) => {
                write!(f, "Match {} ended in a tie; an admin must pick the winner", id)
            }
            EngineError::InvalidOverride { match_id, team_id } => {
                write!(f, "Team {} does not play in match {}", team_id, match_id)
            }
            EngineError::RoundIncomplete { round, unfinished } => {
                write!(f, "Round {} still has {} unfinished match(es)", round, unfinished)
            }
            EngineError::RoundNotFound(round) => write!(f, "Round {} does not exist", round),
            EngineError::TournamentComplete => {
                write!(f, "Final round reached; nothing left to advance")
            }
            EngineError::AlreadyAdvanced { round } => {
                write!(f, "Round {} has already been created", round)
            }
            EngineError::NoChampionYet => write!(f, "No champion yet; tournament still ongoing"),
            EngineError::ConcurrencyConflict(what) => {
                write!(f, "Concurrent modification ({}); retry", what)
            }
            EngineError::Storage(msg) => write!(f, "Storage error: {}", msg),
            EngineError::Export(msg) => write!(f, "Export failed: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
