//! Data structures for the tennis ladder: players, groups, matches, results.

mod group;
mod ladder;
mod matches;
mod player;

pub use group::{Cycle, Group, GroupId};
pub use ladder::{Ladder, LadderError, LadderId, MonthlyResult, Movement};
pub use matches::{Match, MatchId, MatchStatus, OutcomeType, SetScore};
pub use player::{Player, PlayerId};
