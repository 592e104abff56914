//! Match, its two sides, result submissions and the status lifecycle.

use crate::models::team::{BracketKey, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of a match a team plays on.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    A,
    B,
}

/// Where a match is in its lifecycle.
///
/// `Scheduled -> ResultPending -> Completed`, with `ResultPending -> Scheduled`
/// when an admin rejects a submission. Byes are created `Completed`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    ResultPending,
    Completed,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "scheduled"),
            MatchStatus::ResultPending => write!(f, "result pending"),
            MatchStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A proposed (and later approved) score line.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score_a: u32,
    pub score_b: u32,
    /// Reference to uploaded evidence (screenshot path, VOD link).
    pub evidence: Option<String>,
    pub notes: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl MatchResult {
    pub fn new(score_a: u32, score_b: u32) -> Self {
        Self {
            score_a,
            score_b,
            evidence: None,
            notes: None,
            submitted_at: Utc::now(),
        }
    }

    pub fn with_evidence(mut self, evidence: Option<String>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Side with the strictly greater score, `None` on a tie.
    pub fn leading_side(&self) -> Option<Side> {
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => Some(Side::A),
            std::cmp::Ordering::Less => Some(Side::B),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A single bracket match. Slot A always holds a team; slot B is `None` for a bye.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    pub league_id: Uuid,
    pub season_id: Uuid,
    /// 1 = first round.
    pub round: u32,
    /// Creation order within the round.
    pub position: u32,
    pub team_a: TeamId,
    pub team_b: Option<TeamId>,
    pub status: MatchStatus,
    /// Set once the match is `ResultPending`.
    pub result: Option<MatchResult>,
    /// Set only when `Completed`.
    pub winner: Option<TeamId>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl BracketMatch {
    /// A scheduled match between two teams.
    pub fn new(key: BracketKey, round: u32, position: u32, team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            league_id: key.league_id,
            season_id: key.season_id,
            round,
            position,
            team_a,
            team_b: Some(team_b),
            status: MatchStatus::Scheduled,
            result: None,
            winner: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// A bye: completed at creation with the lone team as winner.
    pub fn bye(key: BracketKey, round: u32, position: u32, team: TeamId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            league_id: key.league_id,
            season_id: key.season_id,
            round,
            position,
            team_a: team,
            team_b: None,
            status: MatchStatus::Completed,
            result: None,
            winner: Some(team),
            created_at: now,
            completed_at: Some(now),
        }
    }

    pub fn key(&self) -> BracketKey {
        BracketKey::new(self.league_id, self.season_id)
    }

    pub fn is_bye(&self) -> bool {
        self.team_b.is_none()
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.team_a == team || self.team_b == Some(team)
    }

    /// Team playing on `side` (`None` for side B of a bye).
    pub fn team_on(&self, side: Side) -> Option<TeamId> {
        match side {
            Side::A => Some(self.team_a),
            Side::B => self.team_b,
        }
    }

    /// The eliminated team of a completed, non-bye match.
    pub fn loser(&self) -> Option<TeamId> {
        let winner = self.winner?;
        let b = self.team_b?;
        Some(if winner == self.team_a { b } else { self.team_a })
    }
}
