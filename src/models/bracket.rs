//! Derived bracket state for display: rounds, standings.

use crate::models::game::{BracketMatch, MatchStatus};
use crate::models::team::{BracketKey, TeamId};
use serde::{Deserialize, Serialize};

/// One round: matches in creation order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub round: u32,
    pub matches: Vec<BracketMatch>,
    /// Every match is `Completed`.
    pub complete: bool,
}

impl RoundView {
    pub fn new(round: u32, matches: Vec<BracketMatch>) -> Self {
        let complete = matches.iter().all(BracketMatch::is_completed);
        Self {
            round,
            matches,
            complete,
        }
    }

    /// Matches not yet `Completed`.
    pub fn unfinished(&self) -> usize {
        self.matches.iter().filter(|m| !m.is_completed()).count()
    }

    /// Winners in creation order (byes included).
    pub fn winners(&self) -> Vec<TeamId> {
        self.matches.iter().filter_map(|m| m.winner).collect()
    }

    /// Final round: a single completed match.
    pub fn champion(&self) -> Option<TeamId> {
        match self.matches.as_slice() {
            [only] if only.status == MatchStatus::Completed => only.winner,
            _ => None,
        }
    }
}

/// Full bracket of one league/season.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketView {
    pub league_id: uuid::Uuid,
    pub season_id: uuid::Uuid,
    pub rounds: Vec<RoundView>,
    pub highest_round: Option<u32>,
    pub champion: Option<TeamId>,
}

impl BracketView {
    pub fn from_rounds(key: BracketKey, rounds: Vec<RoundView>) -> Self {
        let highest_round = rounds.last().map(|r| r.round);
        let champion = rounds.last().and_then(RoundView::champion);
        Self {
            league_id: key.league_id,
            season_id: key.season_id,
            rounds,
            highest_round,
            champion,
        }
    }
}

/// Win/loss record of a team over completed matches.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team_id: TeamId,
    pub wins: u32,
    pub losses: u32,
    /// Rounds advanced without playing.
    pub byes: u32,
    /// Highest round the team appeared in.
    pub reached_round: u32,
    pub eliminated: bool,
}

impl Standing {
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            ..Self::default()
        }
    }
}
