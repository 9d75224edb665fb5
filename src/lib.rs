//! Tennis ladder web app: library with models and the ladder movement engine.

pub mod logic;
pub mod models;
pub mod notify;

pub use logic::{
    admin_add, admin_remove, admin_update_rank, compact_inactive, confirm_match, delete_match,
    dispute_match, generate_groups, group_standings, join_ladder, leave_ladder, monthly_reset,
    partition_by_rank, pause, submit_match, unpause, MatchSubmission, PlayerTotals, ResetSummary,
};
pub use models::{
    Cycle, Group, GroupId, Ladder, LadderError, LadderId, Match, MatchId, MatchStatus,
    MonthlyResult, Movement, OutcomeType, Player, PlayerId, SetScore,
};
pub use notify::{LogNotifier, Notifier, NullNotifier};
