//! Rank mutation: per-group adjacent swaps after movement, and the periodic
//! snake reseed of the top and bottom cohorts.

use crate::models::{Cycle, Ladder, LadderError, Movement, PlayerId};
use std::collections::HashMap;

/// Apply movement verdicts as single-position swaps against the global rank
/// order.
///
/// Groups are processed ascending by group number (top of ladder first) and
/// each swap is visible to the groups after it — the adjacent-rank lookups at
/// group boundaries depend on this ordering. For each group, only the
/// top-ranked member can swap upward and only the bottom-ranked member can
/// swap downward; a swap is skipped when there is nobody above (rank 1) or
/// nobody below (bottom of ladder).
pub fn apply_movements(
    ladder: &mut Ladder,
    cycle: Cycle,
    movements: &HashMap<PlayerId, Movement>,
) -> Result<(), LadderError> {
    let mut rankings = ladder.rank_map();
    let group_members: Vec<Vec<PlayerId>> = ladder
        .groups_for_cycle(cycle)
        .iter()
        .map(|g| g.players.clone())
        .collect();

    for mut members in group_members {
        if members.len() < 2 {
            continue;
        }
        for &pid in &members {
            if !rankings.contains_key(&pid) {
                return Err(LadderError::RankLookup(pid));
            }
        }
        members.sort_by_key(|pid| rankings[pid]);

        let top = members[0];
        let bottom = members[members.len() - 1];

        if movements.get(&top) == Some(&Movement::Up) {
            let top_rank = rankings[&top];
            if top_rank > 1 {
                swap_with_holder(ladder, &mut rankings, top, top_rank, top_rank - 1);
            }
        }

        if movements.get(&bottom) == Some(&Movement::Down) {
            let bottom_rank = rankings[&bottom];
            swap_with_holder(ladder, &mut rankings, bottom, bottom_rank, bottom_rank + 1);
        }
    }

    Ok(())
}

/// Swap `player` (at `from`) with whoever currently holds `to`. No-op when the
/// target rank has no holder (the very bottom of the ladder).
fn swap_with_holder(
    ladder: &mut Ladder,
    rankings: &mut HashMap<PlayerId, u32>,
    player: PlayerId,
    from: u32,
    to: u32,
) {
    let other = match ladder.rank_holder(to) {
        Some(p) => p.id,
        None => return,
    };
    if let Some(p) = ladder.player_mut(player) {
        p.rank = to;
    }
    if let Some(p) = ladder.player_mut(other) {
        p.rank = from;
    }
    rankings.insert(player, to);
    rankings.insert(other, from);
}

/// Fixed snake-draw permutation for a cohort of 10: position i+1 in rank order
/// moves to position RESEED_MAP[i].
const RESEED_MAP: [u32; 10] = [1, 4, 7, 2, 5, 8, 3, 6, 10, 9];

/// Scratch rank namespace used while re-permuting a cohort, far above any real
/// rank so a uniquely-constrained store never sees a transient collision.
const SCRATCH_BASE: u32 = u32::MAX - 1024;

/// Reseed the top-10 and (when there are at least 20 active players) bottom-10
/// cohorts using the fixed snake pattern. Ranks in each cohort are reassigned
/// wholesale, independent of the per-cycle adjacent swaps.
pub fn reseed_pools(ladder: &mut Ladder) {
    let active: Vec<(PlayerId, u32)> = ladder
        .active_by_rank()
        .iter()
        .map(|p| (p.id, p.rank))
        .collect();
    let total = active.len();

    if total >= 10 {
        apply_reseed(ladder, &active[..10], 1);
    }
    if total >= 20 {
        let bottom = &active[total - 10..];
        let offset = bottom[0].1;
        apply_reseed(ladder, bottom, offset);
    }
}

/// Re-permute one cohort of up to 10 players whose new rank block starts at
/// `offset`. Two-phase write: every member is first parked on a scratch rank,
/// then final ranks are written.
fn apply_reseed(ladder: &mut Ladder, cohort: &[(PlayerId, u32)], offset: u32) {
    if cohort.len() < 2 {
        return;
    }

    let mut finals: Vec<(PlayerId, u32)> = Vec::with_capacity(cohort.len());
    for (i, &(pid, _)) in cohort.iter().enumerate() {
        let new_pos = RESEED_MAP.get(i).copied().unwrap_or(i as u32 + 1);
        finals.push((pid, offset + new_pos - 1));
        if let Some(p) = ladder.player_mut(pid) {
            p.rank = SCRATCH_BASE + i as u32;
        }
    }
    for (pid, rank) in finals {
        if let Some(p) = ladder.player_mut(pid) {
            p.rank = rank;
        }
    }

    debug_assert!(ladder.active_ranks_are_distinct());
}
