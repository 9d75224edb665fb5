//! Outcome resolution: derive games, sets, and winner credit from a match row.

use crate::models::{Match, PlayerId};

/// Game credit for a forfeit or injury-not-played win (two 6-0 sets).
const FORFEIT_GAMES: u32 = 12;
const FORFEIT_SETS: u32 = 2;

/// What a match is worth, from (player1, player2)'s perspectives.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Resolved {
    pub games: (u32, u32),
    pub sets: (u32, u32),
    pub winner: Option<PlayerId>,
}

/// Resolve a match into games/sets/winner credit. Pure function of the row:
/// re-running it on an unchanged match always yields identical totals.
pub fn resolve(m: &Match) -> Resolved {
    if m.outcome.is_no_winner() {
        // Excluded from standings entirely; nothing is credited.
        return Resolved::default();
    }

    if m.outcome.is_winner_only() {
        // Fixed credit to the winner; stray set fields are ignored.
        return match m.winner {
            Some(w) if w == m.player1 => Resolved {
                games: (FORFEIT_GAMES, 0),
                sets: (FORFEIT_SETS, 0),
                winner: Some(w),
            },
            Some(w) if w == m.player2 => Resolved {
                games: (0, FORFEIT_GAMES),
                sets: (0, FORFEIT_SETS),
                winner: Some(w),
            },
            _ => Resolved::default(),
        };
    }

    // Completed or injury_not_finished: every present set counts.
    let mut resolved = Resolved {
        winner: m.winner,
        ..Resolved::default()
    };
    for set in m.sets.iter().flatten() {
        resolved.games.0 += u32::from(set.p1);
        resolved.games.1 += u32::from(set.p2);
        if set.p1 > set.p2 {
            resolved.sets.0 += 1;
        } else if set.p2 > set.p1 {
            resolved.sets.1 += 1;
        }
    }
    resolved
}
