//! Movement resolution: per-group up/stay/down verdicts, including the
//! three-way tie-break cascade.

use crate::logic::standings::PlayerTotals;
use crate::models::{Group, Movement, PlayerId};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Assign a movement verdict to every member of a group.
///
/// 2-player groups: more wins moves up, fewer moves down, equal stays.
/// 3-player groups: 2-0 moves up, 0-2 moves down, 1-1 stays — unless all three
/// are 1-1 (a cycle), in which case the tie-break cascade orders the trio:
/// set differential desc, then game differential desc, then current rank asc
/// (the better-ranked player wins the final tie). Head-to-head is deliberately
/// not a cascade key: it cannot totally order a 3-cycle.
///
/// Players with no matches at all are 0-0 and stay; no-shows are handled by the
/// inactivity mechanism, not by movement.
pub fn resolve_group_movement(
    group: &Group,
    standings: &HashMap<PlayerId, PlayerTotals>,
    ranks: &HashMap<PlayerId, u32>,
) -> HashMap<PlayerId, Movement> {
    let mut movements = HashMap::new();
    let zero = PlayerTotals::default();

    match group.players.len() {
        3 => {
            for &pid in &group.players {
                let s = standings.get(&pid).unwrap_or(&zero);
                let verdict = if s.wins == 2 && s.losses == 0 {
                    Movement::Up
                } else if s.wins == 0 && s.losses == 2 {
                    Movement::Down
                } else {
                    Movement::Stay
                };
                movements.insert(pid, verdict);
            }

            // Three-way 1-1 cycle: break the tie deterministically.
            let mut tied: Vec<PlayerId> = group
                .players
                .iter()
                .copied()
                .filter(|pid| {
                    movements.get(pid) == Some(&Movement::Stay)
                        && standings.get(pid).map(|s| s.wins) == Some(1)
                })
                .collect();
            if tied.len() == 3 {
                tied.sort_by_key(|pid| {
                    let s = standings.get(pid).unwrap_or(&zero);
                    (
                        Reverse(s.set_diff()),
                        Reverse(s.game_diff()),
                        ranks.get(pid).copied().unwrap_or(u32::MAX),
                    )
                });
                movements.insert(tied[0], Movement::Up);
                movements.insert(tied[2], Movement::Down);
                // middle stays
            }
        }
        2 => {
            for &pid in &group.players {
                let s = standings.get(&pid).unwrap_or(&zero);
                let verdict = if s.wins > s.losses {
                    Movement::Up
                } else if s.losses > s.wins {
                    Movement::Down
                } else {
                    Movement::Stay
                };
                movements.insert(pid, verdict);
            }
        }
        _ => {
            // Single-player group (partition remainder): nothing to compare.
            for &pid in &group.players {
                movements.insert(pid, Movement::Stay);
            }
        }
    }

    movements
}
