//! Roster operations: joining, leaving, pausing, and admin membership edits.
//! All rank shifting goes through the Ladder primitives.

use crate::models::{Ladder, LadderError, PlayerId};
use crate::notify::Notifier;

/// Join the ladder, placed after the last player with an equal-or-higher
/// rating (rank 1 when nobody rates that high). Sends the welcome
/// notification, fire-and-forget.
pub fn join_ladder(
    ladder: &mut Ladder,
    name: impl Into<String>,
    email: Option<String>,
    rating: Option<f32>,
    notifier: &dyn Notifier,
) -> Result<PlayerId, LadderError> {
    let rank = placement_rank(ladder, rating);
    let id = ladder.insert_player_at(name, email, rating, rank)?;

    if let Some(player) = ladder.player(id) {
        if let Some(to) = &player.email {
            notifier.send(
                to,
                &format!("Welcome to the {} Tennis Ladder!", ladder.name),
                &format!(
                    "Hi {}, you've been added to the {} ladder at rank #{}. \
                     Each cycle you'll be placed in a group of 2-3 players. \
                     Play your matches, submit scores, and climb the ladder!",
                    player.name, ladder.name, rank
                ),
            );
        }
    }
    log::info!("{} joined ladder '{}' at rank {}", id, ladder.name, rank);
    Ok(id)
}

/// Rank directly below the last player whose rating is at least `rating`.
fn placement_rank(ladder: &Ladder, rating: Option<f32>) -> u32 {
    let submitted = match rating {
        Some(r) => r,
        None => return ladder.players.len() as u32 + 1,
    };
    let mut max_rank_at_or_above = 0;
    for p in &ladder.players {
        if p.rating.unwrap_or(0.0) >= submitted {
            max_rank_at_or_above = max_rank_at_or_above.max(p.rank);
        }
    }
    max_rank_at_or_above + 1
}

/// Leave the ladder, closing the rank gap.
pub fn leave_ladder(ladder: &mut Ladder, id: PlayerId) -> Result<(), LadderError> {
    ladder.remove_player(id).map(|_| ())
}

/// Pause participation: the player keeps their rank but is skipped by the
/// partitioner and the inactivity compactor.
pub fn pause(ladder: &mut Ladder, id: PlayerId) -> Result<(), LadderError> {
    let p = ladder.player_mut(id).ok_or(LadderError::PlayerNotFound(id))?;
    p.active = false;
    Ok(())
}

/// Resume participation at the retained rank. The inactivity counter is left
/// as it was; it resumes counting from the next cycle played or missed.
pub fn unpause(ladder: &mut Ladder, id: PlayerId) -> Result<(), LadderError> {
    let p = ladder.player_mut(id).ok_or(LadderError::PlayerNotFound(id))?;
    p.active = true;
    Ok(())
}

/// Admin: add a player at an explicit rank, with the welcome notification.
pub fn admin_add(
    ladder: &mut Ladder,
    name: impl Into<String>,
    email: Option<String>,
    rating: Option<f32>,
    rank: u32,
    notifier: &dyn Notifier,
) -> Result<PlayerId, LadderError> {
    let id = ladder.insert_player_at(name, email, rating, rank)?;
    if let Some(player) = ladder.player(id) {
        if let Some(to) = &player.email {
            notifier.send(
                to,
                &format!("Welcome to the {} Tennis Ladder!", ladder.name),
                &format!(
                    "Hi {}, you've been added to the {} ladder at rank #{}.",
                    player.name, ladder.name, rank
                ),
            );
        }
    }
    Ok(id)
}

/// Admin: remove a player and close the rank gap.
pub fn admin_remove(ladder: &mut Ladder, id: PlayerId) -> Result<(), LadderError> {
    ladder.remove_player(id).map(|_| ())
}

/// Admin: relocate a player to a new rank, shifting the affected range.
pub fn admin_update_rank(
    ladder: &mut Ladder,
    id: PlayerId,
    new_rank: u32,
) -> Result<(), LadderError> {
    ladder.move_player_to_rank(id, new_rank)
}
