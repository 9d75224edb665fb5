//! Ladder business logic: scores, standings, movement, ranks, reset, roster.

mod inactivity;
mod movement;
mod outcome;
mod partition;
mod ranking;
mod reset;
mod roster;
mod scores;
mod standings;
mod submit;

pub use inactivity::{compact_inactive, participants_for_cycle, InactivityReport};
pub use movement::resolve_group_movement;
pub use outcome::{resolve, Resolved};
pub use partition::{generate_groups, partition_by_rank};
pub use ranking::{apply_movements, reseed_pools};
pub use reset::{monthly_reset, ResetSummary};
pub use roster::{
    admin_add, admin_remove, admin_update_rank, join_ladder, leave_ladder, pause, unpause,
};
pub use scores::{valid_match_tiebreak, valid_set};
pub use standings::{group_standings, PlayerTotals};
pub use submit::{confirm_match, delete_match, dispute_match, submit_match, MatchSubmission};
