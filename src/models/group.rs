//! Cycle (month/year) and Group: 2-3 players compared within one cycle.

use crate::models::player::PlayerId;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// A calendar month/year period during which one round of groups is active.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub month: u32,
    pub year: i32,
}

impl Cycle {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// The current calendar month/year.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            month: today.month(),
            year: today.year(),
        }
    }
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// A cycle-scoped set of players who play each other to determine movement.
/// Normally 2 or 3 members; a single-member group is the partition remainder
/// and plays no matches that cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub cycle: Cycle,
    /// 1-based position from the top of the ladder.
    pub number: u32,
    pub players: Vec<PlayerId>,
}

impl Group {
    pub fn new(cycle: Cycle, number: u32, players: Vec<PlayerId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            cycle,
            number,
            players,
        }
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains(&id)
    }
}
