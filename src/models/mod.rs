//! Data structures for the bracket: teams, matches, derived bracket state, errors.

mod bracket;
mod error;
mod game;
mod team;

pub use bracket::{BracketView, RoundView, Standing};
pub use error::EngineError;
pub use game::{BracketMatch, MatchId, MatchResult, MatchStatus, Side};
pub use team::{BracketKey, LeagueId, SeasonId, Team, TeamId};
