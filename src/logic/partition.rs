//! Group partitioning: split the rank-ordered active list into cycle groups.

use crate::models::{Cycle, Group, Ladder, LadderError, PlayerId};

/// Partition a rank-ordered player list into consecutive groups of 3 from the
/// top. A final remainder of 4 splits into two groups of 2 (never 3+1); a
/// remainder of 2 is one pair; a remainder of 1 is a single-player group that
/// plays no matches. Purely positional — skill ratings are never consulted.
pub fn partition_by_rank(ordered: &[PlayerId]) -> Vec<Vec<PlayerId>> {
    let mut groups = Vec::new();
    let mut i = 0;
    while i < ordered.len() {
        let remaining = ordered.len() - i;
        if remaining == 4 {
            groups.push(ordered[i..i + 2].to_vec());
            groups.push(ordered[i + 2..i + 4].to_vec());
            i += 4;
        } else if remaining == 2 {
            groups.push(ordered[i..i + 2].to_vec());
            i += 2;
        } else {
            let take = remaining.min(3);
            groups.push(ordered[i..i + take].to_vec());
            i += take;
        }
    }
    groups
}

/// Regenerate the cycle's groups from the current active rank order.
///
/// Any existing groups for the cycle are deleted first, cascading their
/// matches. Requires at least 2 active players.
pub fn generate_groups(ladder: &mut Ladder, cycle: Cycle) -> Result<usize, LadderError> {
    let active_ids: Vec<PlayerId> = ladder.active_by_rank().iter().map(|p| p.id).collect();
    if active_ids.len() < 2 {
        return Err(LadderError::NotEnoughPlayers);
    }

    let old_group_ids: Vec<_> = ladder
        .groups
        .iter()
        .filter(|g| g.cycle == cycle)
        .map(|g| g.id)
        .collect();
    ladder
        .matches
        .retain(|m| !old_group_ids.contains(&m.group_id));
    ladder.groups.retain(|g| g.cycle != cycle);

    let partitions = partition_by_rank(&active_ids);
    let count = partitions.len();
    for (idx, members) in partitions.into_iter().enumerate() {
        ladder
            .groups
            .push(Group::new(cycle, idx as u32 + 1, members));
    }

    log::info!(
        "Generated {} groups for {} on ladder '{}'",
        count,
        cycle,
        ladder.name
    );
    Ok(count)
}
