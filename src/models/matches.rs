//! Match row: an ordered player pair, set scores, outcome, and lifecycle status.

use crate::models::group::GroupId;
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One set's score, from player1's perspective.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub p1: u8,
    pub p2: u8,
}

impl SetScore {
    pub fn new(p1: u8, p2: u8) -> Self {
        Self { p1, p2 }
    }

    /// The same score seen from the other side.
    pub fn flipped(self) -> Self {
        Self {
            p1: self.p2,
            p2: self.p1,
        }
    }
}

/// How the match ended. Determines which of sets/winner are authoritative.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeType {
    /// Played to completion; set scores required.
    Completed,
    /// Winner credited 12 games / 2 sets, no scores recorded.
    Forfeit,
    /// Could not be scheduled; excluded from standings entirely.
    ScheduleProblem,
    /// Rained out; excluded from standings entirely.
    WeatherProblem,
    /// Stopped mid-match; partial set scores count as played.
    InjuryNotFinished,
    /// Never started due to injury; treated like a forfeit for credit.
    InjuryNotPlayed,
}

impl OutcomeType {
    /// Outcomes that record no winner at all.
    pub fn is_no_winner(self) -> bool {
        matches!(self, OutcomeType::ScheduleProblem | OutcomeType::WeatherProblem)
    }

    /// Outcomes with a winner but no set scores (fixed 12-game / 2-set credit).
    pub fn is_winner_only(self) -> bool {
        matches!(self, OutcomeType::Forfeit | OutcomeType::InjuryNotPlayed)
    }
}

/// Lifecycle of a submitted result. Only confirmed matches affect standings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Confirmed,
    Disputed,
}

/// A single ladder match between two groupmates.
///
/// `player1` is always the lower player id; submissions from the other side are
/// flipped on insert. This gives each unordered pair one stable representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub group_id: GroupId,
    pub player1: PlayerId,
    pub player2: PlayerId,
    pub winner: Option<PlayerId>,
    /// Up to 3 sets, from player1's perspective. Set 3 is a match tiebreak.
    pub sets: [Option<SetScore>; 3],
    /// Tiebreak point detail for 7-6 first/second sets (display only).
    pub set_tiebreaks: [Option<SetScore>; 2],
    pub outcome: OutcomeType,
    pub status: MatchStatus,
    pub submitted_by: PlayerId,
    pub confirmed_by: Option<PlayerId>,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn involves(&self, id: PlayerId) -> bool {
        self.player1 == id || self.player2 == id
    }

    /// True if this match is between the same unordered pair.
    pub fn same_pair(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.player1 == a && self.player2 == b) || (self.player1 == b && self.player2 == a)
    }
}
