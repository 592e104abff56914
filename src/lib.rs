//! Single-elimination tournament progression: bracket generation, result
//! approval, round advancement and champion detection for one league/season.

pub mod config;
pub mod engine;
pub mod logic;
pub mod models;
pub mod store;
pub mod web;

pub use engine::TournamentEngine;
pub use logic::{
    advance_round, advance_round_from, approve_result, bracket_view, export_bracket_csv,
    generate_bracket, get_champion, pending_results, reject_result, rounds_needed,
    shuffle_and_pair, standings, submit_result, ApprovalOverride,
};
pub use models::{
    BracketKey, BracketMatch, BracketView, EngineError, LeagueId, MatchId, MatchResult,
    MatchStatus, RoundView, SeasonId, Side, Standing, Team, TeamId,
};
pub use store::{InMemoryMatchStore, InMemoryRegistry, MatchStore, TeamRegistry};
