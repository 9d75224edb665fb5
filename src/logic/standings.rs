//! Group standings: fold a group's confirmed matches into per-player totals.

use crate::logic::outcome;
use crate::models::{Group, Match, MatchStatus, PlayerId};
use std::collections::HashMap;

/// Per-player win/loss/game/set totals within one group.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PlayerTotals {
    pub wins: u32,
    pub losses: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
}

impl PlayerTotals {
    pub fn set_diff(&self) -> i64 {
        i64::from(self.sets_won) - i64::from(self.sets_lost)
    }

    pub fn game_diff(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }
}

/// Calculate standings within a group based on confirmed matches.
///
/// Pending and disputed matches never affect standings; this is how disputes
/// are frozen out until admin resolution. Schedule/weather outcomes are
/// excluded entirely. Every group member gets a (possibly all-zero) entry.
pub fn group_standings(group: &Group, matches: &[Match]) -> HashMap<PlayerId, PlayerTotals> {
    let mut stats: HashMap<PlayerId, PlayerTotals> = group
        .players
        .iter()
        .map(|&pid| (pid, PlayerTotals::default()))
        .collect();

    for m in matches {
        if m.group_id != group.id || m.status != MatchStatus::Confirmed {
            continue;
        }
        if m.outcome.is_no_winner() {
            continue;
        }

        let resolved = outcome::resolve(m);
        let (p1, p2) = (m.player1, m.player2);

        if let Some(s) = stats.get_mut(&p1) {
            s.games_won += resolved.games.0;
            s.games_lost += resolved.games.1;
            s.sets_won += resolved.sets.0;
            s.sets_lost += resolved.sets.1;
        }
        if let Some(s) = stats.get_mut(&p2) {
            s.games_won += resolved.games.1;
            s.games_lost += resolved.games.0;
            s.sets_won += resolved.sets.1;
            s.sets_lost += resolved.sets.0;
        }

        // A missing winner credits neither side.
        if resolved.winner == Some(p1) {
            if let Some(s) = stats.get_mut(&p1) {
                s.wins += 1;
            }
            if let Some(s) = stats.get_mut(&p2) {
                s.losses += 1;
            }
        } else if resolved.winner == Some(p2) {
            if let Some(s) = stats.get_mut(&p2) {
                s.wins += 1;
            }
            if let Some(s) = stats.get_mut(&p1) {
                s.losses += 1;
            }
        }
    }

    stats
}
