//! End-of-cycle reset: standings, movement, archival, rank mutation,
//! reseeding, inactivity compaction, and notifications, as one atomic step.

use crate::logic::inactivity::{self, InactivityReport};
use crate::logic::{movement, ranking, standings};
use crate::models::{Cycle, Ladder, LadderError, MonthlyResult, Movement, PlayerId};
use crate::notify::Notifier;
use std::collections::HashMap;

/// What a reset did, for the admin response and logs.
#[derive(Clone, Debug)]
pub struct ResetSummary {
    pub cycle: Cycle,
    pub movements: HashMap<PlayerId, Movement>,
    pub warned: Vec<PlayerId>,
    pub dropped: Vec<PlayerId>,
}

/// Process the end of a cycle for one ladder.
///
/// The whole reset is logically atomic: all work happens on a scratch copy of
/// the ladder, which replaces the original only on success. Any error leaves
/// rankings exactly as they were, so a failed reset can be retried after the
/// input data is fixed (e.g. disputed matches resolved).
pub fn monthly_reset(
    ladder: &mut Ladder,
    cycle: Cycle,
    notifier: &dyn Notifier,
) -> Result<ResetSummary, LadderError> {
    let mut work = ladder.clone();
    let summary = run_reset(&mut work, cycle)?;

    // Commit, then notify: warnings and drop notices are fire-and-forget and
    // must never fail or un-commit the reset.
    *ladder = work;
    send_inactivity_notices(ladder, &summary, notifier);

    log::info!(
        "Reset complete for {} on ladder '{}': {} verdicts, {} warned, {} dropped",
        cycle,
        ladder.name,
        summary.movements.len(),
        summary.warned.len(),
        summary.dropped.len()
    );
    Ok(summary)
}

fn run_reset(ladder: &mut Ladder, cycle: Cycle) -> Result<ResetSummary, LadderError> {
    let groups = ladder.groups_for_cycle(cycle);
    if groups.is_empty() {
        return Err(LadderError::NoGroups);
    }

    // Rank map captured before any movement: the 3-way cascade ties break on
    // pre-reset ranks.
    let rankings = ladder.rank_map();

    let mut movements: HashMap<PlayerId, Movement> = HashMap::new();
    let mut totals: HashMap<PlayerId, standings::PlayerTotals> = HashMap::new();
    for group in &groups {
        let group_standings = standings::group_standings(group, &ladder.matches);
        movements.extend(movement::resolve_group_movement(
            group,
            &group_standings,
            &rankings,
        ));
        totals.extend(group_standings);
    }

    // Archive phase one: verdict and old rank now, final rank after settling.
    // Re-running a reset replaces the cycle's rows rather than duplicating.
    ladder
        .results
        .retain(|r| r.cycle != cycle);
    for (&pid, &mv) in &movements {
        let old_rank = rankings.get(&pid).copied().unwrap_or(0);
        let t = totals.get(&pid).copied().unwrap_or_default();
        ladder.results.push(MonthlyResult {
            player_id: pid,
            cycle,
            old_rank,
            new_rank: old_rank,
            wins: t.wins,
            losses: t.losses,
            games_won: t.games_won,
            games_lost: t.games_lost,
            movement: mv,
        });
    }

    ranking::apply_movements(ladder, cycle, &movements)?;
    ranking::reseed_pools(ladder);
    let InactivityReport { warned, dropped } = inactivity::compact_inactive(ladder, cycle);

    // Archive phase two: fill in where everyone actually landed.
    let final_ranks = ladder.rank_map();
    for r in &mut ladder.results {
        if r.cycle == cycle {
            if let Some(&rank) = final_ranks.get(&r.player_id) {
                r.new_rank = rank;
            }
        }
    }

    Ok(ResetSummary {
        cycle,
        movements,
        warned,
        dropped,
    })
}

fn send_inactivity_notices(ladder: &Ladder, summary: &ResetSummary, notifier: &dyn Notifier) {
    for &pid in &summary.warned {
        if let Some(p) = ladder.player(pid) {
            if let Some(to) = &p.email {
                notifier.send(
                    to,
                    &format!("Inactivity warning: {} Tennis Ladder", ladder.name),
                    &format!(
                        "Hi {}, you did not play any matches this cycle. If you do not \
                         play next cycle, you will be automatically removed from the ladder.",
                        p.name
                    ),
                );
            }
        }
    }
    for &pid in &summary.dropped {
        if let Some(p) = ladder.player(pid) {
            if let Some(to) = &p.email {
                notifier.send(
                    to,
                    &format!("You've been removed from the {} Tennis Ladder", ladder.name),
                    &format!(
                        "Hi {}, you have been removed from the ladder after 2 consecutive \
                         cycles without a match. You can rejoin at any time.",
                        p.name
                    ),
                );
            }
        }
    }
}
