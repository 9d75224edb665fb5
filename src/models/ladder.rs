//! Ladder aggregate: players, groups, matches, archived results, and the rank
//! primitives every rank-shifting operation goes through.

use crate::models::group::{Cycle, Group, GroupId};
use crate::models::matches::{Match, MatchId, SetScore};
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a ladder.
pub type LadderId = Uuid;

/// Errors that can occur during ladder operations.
#[derive(Clone, Debug, PartialEq)]
pub enum LadderError {
    /// A set score is not a legal tennis set.
    InvalidSetScore { set: usize, score: SetScore },
    /// A match tiebreak score is not legal (first to 10 or 7, win by 2).
    InvalidTiebreak { score: SetScore },
    /// A completed match needs at least sets 1 and 2.
    MissingSets,
    /// Winner is required and must be one of the two players.
    InvalidWinner,
    /// The chosen opponent is not a groupmate of the submitter.
    InvalidOpponent,
    /// A result already exists for this matchup in this group.
    DuplicateMatch,
    /// Rank out of range for this ladder.
    InvalidRank(u32),
    /// Player name is empty.
    NameRequired,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// No groups exist for the cycle being reset.
    NoGroups,
    /// Not enough active players to form any group (need at least 2).
    NotEnoughPlayers,
    PlayerNotFound(PlayerId),
    GroupNotFound(GroupId),
    MatchNotFound(MatchId),
    /// The match is not pending confirmation.
    NotPending,
    /// The acting player is not a participant in this match.
    NotAParticipant,
    /// Submitters cannot confirm or dispute their own submission.
    CannotActOnOwnSubmission,
    /// Confirmed matches can only be deleted by an admin.
    AdminRequired,
    /// A group member was missing from the rank map during a swap.
    RankLookup(PlayerId),
}

impl std::fmt::Display for LadderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LadderError::InvalidSetScore { set, score } => {
                write!(f, "Set {} score {}-{} is not a valid tennis score", set, score.p1, score.p2)
            }
            LadderError::InvalidTiebreak { score } => write!(
                f,
                "Tiebreak score {}-{} is not valid: first to 10 or 7, win by 2",
                score.p1, score.p2
            ),
            LadderError::MissingSets => write!(f, "At least 2 sets are required"),
            LadderError::InvalidWinner => write!(f, "Winner must be one of the two players"),
            LadderError::InvalidOpponent => write!(f, "Opponent is not in your group"),
            LadderError::DuplicateMatch => {
                write!(f, "A match result already exists for this matchup")
            }
            LadderError::InvalidRank(r) => write!(f, "Rank {} is out of range", r),
            LadderError::NameRequired => write!(f, "Player name is required"),
            LadderError::DuplicatePlayerName => {
                write!(f, "A player with this name already exists")
            }
            LadderError::NoGroups => write!(f, "No groups found for this cycle"),
            LadderError::NotEnoughPlayers => {
                write!(f, "Need at least 2 active players to generate groups")
            }
            LadderError::PlayerNotFound(_) => write!(f, "Player not found"),
            LadderError::GroupNotFound(_) => write!(f, "Group not found"),
            LadderError::MatchNotFound(_) => write!(f, "Match not found"),
            LadderError::NotPending => write!(f, "This match is not pending confirmation"),
            LadderError::NotAParticipant => write!(f, "You are not a player in this match"),
            LadderError::CannotActOnOwnSubmission => {
                write!(f, "You cannot confirm or dispute your own submission")
            }
            LadderError::AdminRequired => write!(f, "Admin access required for this action"),
            LadderError::RankLookup(_) => {
                write!(f, "A group member has no rank; reset aborted")
            }
        }
    }
}

/// Per-player outcome of a cycle: promote, hold, or relegate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Up,
    Stay,
    Down,
}

/// Archived snapshot of one player's cycle. Written once per (player, cycle);
/// `new_rank` is back-filled after movement, reseeding, and compaction settle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyResult {
    pub player_id: PlayerId,
    pub cycle: Cycle,
    pub old_rank: u32,
    pub new_rank: u32,
    pub wins: u32,
    pub losses: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub movement: Movement,
}

/// A named competition instance owning players, groups, matches, and results.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ladder {
    pub id: LadderId,
    pub name: String,
    /// All membership rows, active and inactive.
    pub players: Vec<Player>,
    /// Groups across all cycles.
    pub groups: Vec<Group>,
    /// Matches across all groups.
    pub matches: Vec<Match>,
    /// Archived per-cycle results, for ranking-history display.
    pub results: Vec<MonthlyResult>,
}

impl Ladder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            players: Vec::new(),
            groups: Vec::new(),
            matches: Vec::new(),
            results: Vec::new(),
        }
    }

    // ---- lookups ----

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The membership row currently holding `rank`, active or not.
    pub fn rank_holder(&self, rank: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.rank == rank)
    }

    /// Active players sorted by rank ascending.
    pub fn active_by_rank(&self) -> Vec<&Player> {
        let mut active: Vec<&Player> = self.players.iter().filter(|p| p.active).collect();
        active.sort_by_key(|p| p.rank);
        active
    }

    /// Rank of every membership row, keyed by player id.
    pub fn rank_map(&self) -> HashMap<PlayerId, u32> {
        self.players.iter().map(|p| (p.id, p.rank)).collect()
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Groups of one cycle, sorted ascending by group number (top of ladder first).
    pub fn groups_for_cycle(&self, cycle: Cycle) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.groups.iter().filter(|g| g.cycle == cycle).collect();
        groups.sort_by_key(|g| g.number);
        groups
    }

    pub fn group_matches(&self, group_id: GroupId) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.group_id == group_id)
    }

    pub fn match_by_id(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn match_by_id_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    // ---- rank primitives ----
    // All rank shifting lives here: inserting, removing, and relocating each
    // compensate by shifting exactly the affected range.

    /// Insert a new player at `rank` (1..=N+1), shifting ranks at or below down
    /// by one. Names are unique, case-insensitive.
    pub fn insert_player_at(
        &mut self,
        name: impl Into<String>,
        email: Option<String>,
        rating: Option<f32>,
        rank: u32,
    ) -> Result<PlayerId, LadderError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(LadderError::NameRequired);
        }
        if self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed))
        {
            return Err(LadderError::DuplicatePlayerName);
        }
        let max = self.players.len() as u32 + 1;
        if rank < 1 || rank > max {
            return Err(LadderError::InvalidRank(rank));
        }
        for p in &mut self.players {
            if p.rank >= rank {
                p.rank += 1;
            }
        }
        let player = Player::new(name_trimmed, email, rating, rank);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a membership row, closing the rank gap it leaves.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<u32, LadderError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(LadderError::PlayerNotFound(id))?;
        let old_rank = self.players.remove(idx).rank;
        for p in &mut self.players {
            if p.rank > old_rank {
                p.rank -= 1;
            }
        }
        Ok(old_rank)
    }

    /// Relocate a player to `new_rank`, shifting only the affected range.
    pub fn move_player_to_rank(&mut self, id: PlayerId, new_rank: u32) -> Result<(), LadderError> {
        let old_rank = self
            .player(id)
            .ok_or(LadderError::PlayerNotFound(id))?
            .rank;
        let max = self.players.len() as u32;
        if new_rank < 1 || new_rank > max {
            return Err(LadderError::InvalidRank(new_rank));
        }
        if new_rank == old_rank {
            return Ok(());
        }
        if new_rank < old_rank {
            // Moving up: shift the range in between down.
            for p in &mut self.players {
                if p.rank >= new_rank && p.rank < old_rank {
                    p.rank += 1;
                }
            }
        } else {
            // Moving down: shift the range in between up.
            for p in &mut self.players {
                if p.rank > old_rank && p.rank <= new_rank {
                    p.rank -= 1;
                }
            }
        }
        if let Some(p) = self.player_mut(id) {
            p.rank = new_rank;
        }
        Ok(())
    }

    /// Check that active ranks are exactly {1..N} with no duplicates. Only
    /// holds while no paused row occupies an in-range rank; tests use it on
    /// fully active ladders.
    pub fn active_ranks_are_permutation(&self) -> bool {
        let mut ranks: Vec<u32> = self
            .players
            .iter()
            .filter(|p| p.active)
            .map(|p| p.rank)
            .collect();
        ranks.sort_unstable();
        ranks.iter().enumerate().all(|(i, &r)| r == i as u32 + 1)
    }

    /// Check that no two active players share a rank. Paused players keep
    /// their slot, so active ranks may have gaps but never duplicates; this is
    /// the invariant the engine's rank mutations preserve unconditionally.
    pub fn active_ranks_are_distinct(&self) -> bool {
        let mut ranks: Vec<u32> = self
            .players
            .iter()
            .filter(|p| p.active)
            .map(|p| p.rank)
            .collect();
        ranks.sort_unstable();
        ranks.windows(2).all(|w| w[0] != w[1])
    }
}
