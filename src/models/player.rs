//! Player data structure: identity plus ladder membership state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// A player on the ladder: identity plus membership state (rank, activity).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub email: Option<String>,
    /// Self-reported skill rating (e.g. NTRP). Used only for initial placement
    /// when joining; the movement engine never reads it.
    pub rating: Option<f32>,
    /// Ladder rank: positive, unique, contiguous 1..N among active players.
    /// Frozen when a player is auto-dropped for inactivity.
    pub rank: u32,
    pub active: bool,
    /// Consecutive cycles with zero confirmed matches.
    pub inactive_cycles: u32,
}

impl Player {
    /// Create a new active player at the given rank. Counters start at zero.
    pub fn new(
        name: impl Into<String>,
        email: Option<String>,
        rating: Option<f32>,
        rank: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email,
            rating,
            rank,
            active: true,
            inactive_cycles: 0,
        }
    }
}
