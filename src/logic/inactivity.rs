//! Inactivity tracking: warn after one idle cycle, auto-drop and compact
//! ranks after two.

use crate::models::{Cycle, Ladder, MatchStatus, PlayerId};
use std::collections::HashSet;

/// How many consecutive idle cycles before a player is dropped.
const DROP_THRESHOLD: u32 = 2;

/// Who was warned and who was dropped this cycle. The two sets are disjoint:
/// a player is either warned (first miss) or dropped (second), never both.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InactivityReport {
    pub warned: Vec<PlayerId>,
    pub dropped: Vec<PlayerId>,
}

/// Players appearing in at least one confirmed match of the cycle's groups.
pub fn participants_for_cycle(ladder: &Ladder, cycle: Cycle) -> HashSet<PlayerId> {
    let group_ids: HashSet<_> = ladder
        .groups_for_cycle(cycle)
        .iter()
        .map(|g| g.id)
        .collect();
    ladder
        .matches
        .iter()
        .filter(|m| m.status == MatchStatus::Confirmed && group_ids.contains(&m.group_id))
        .flat_map(|m| [m.player1, m.player2])
        .collect()
}

/// Update every active player's inactivity counter for the cycle.
///
/// Players with a confirmed match reset to zero. Everyone else is incremented;
/// at the threshold the player is deactivated — their own rank is frozen as a
/// historical artifact — and every active player below them shifts up one rank
/// so active ranks stay contiguous.
pub fn compact_inactive(ladder: &mut Ladder, cycle: Cycle) -> InactivityReport {
    let played = participants_for_cycle(ladder, cycle);

    // Snapshot in rank order: drops compact the ranks of players processed later.
    let candidates: Vec<PlayerId> = ladder.active_by_rank().iter().map(|p| p.id).collect();

    let mut report = InactivityReport::default();
    for pid in candidates {
        if played.contains(&pid) {
            if let Some(p) = ladder.player_mut(pid) {
                p.inactive_cycles = 0;
            }
            continue;
        }

        let (new_count, drop_rank) = match ladder.player_mut(pid) {
            Some(p) => {
                p.inactive_cycles += 1;
                (p.inactive_cycles, p.rank)
            }
            None => continue,
        };

        if new_count >= DROP_THRESHOLD {
            if let Some(p) = ladder.player_mut(pid) {
                p.active = false;
            }
            for p in &mut ladder.players {
                if p.active && p.rank > drop_rank {
                    p.rank -= 1;
                }
            }
            report.dropped.push(pid);
        } else if new_count == 1 {
            report.warned.push(pid);
        }
    }

    debug_assert!(ladder.active_ranks_are_distinct());
    report
}
