//! Match submission and lifecycle: validate, store, confirm, dispute, delete.

use crate::logic::scores::{valid_match_tiebreak, valid_set};
use crate::models::{
    GroupId, Ladder, LadderError, Match, MatchId, MatchStatus, OutcomeType, PlayerId, SetScore,
};
use chrono::Utc;
use uuid::Uuid;

/// One player's result submission, from the submitter's perspective.
#[derive(Clone, Debug)]
pub struct MatchSubmission {
    pub group_id: GroupId,
    pub submitter: PlayerId,
    pub opponent: PlayerId,
    pub outcome: OutcomeType,
    pub winner: Option<PlayerId>,
    /// Sets as the submitter saw them: submitter's games first.
    pub sets: [Option<SetScore>; 3],
    /// Tiebreak point detail for 7-6 sets 1 and 2.
    pub set_tiebreaks: [Option<SetScore>; 2],
}

/// Validate and store a match result as pending. Returns the new match id.
///
/// The stored row always has `player1` = the lower player id, flipping the
/// submitted scores when necessary, so each unordered pair has exactly one
/// representation and duplicates are easy to reject.
pub fn submit_match(ladder: &mut Ladder, sub: MatchSubmission) -> Result<MatchId, LadderError> {
    let group = ladder
        .group(sub.group_id)
        .ok_or(LadderError::GroupNotFound(sub.group_id))?;
    if sub.submitter == sub.opponent
        || !group.contains(sub.submitter)
        || !group.contains(sub.opponent)
    {
        return Err(LadderError::InvalidOpponent);
    }

    // Outcome determines which fields are authoritative.
    let winner = if sub.outcome.is_no_winner() {
        None
    } else {
        match sub.winner {
            Some(w) if w == sub.submitter || w == sub.opponent => Some(w),
            _ => return Err(LadderError::InvalidWinner),
        }
    };

    let (sets, set_tiebreaks) = if sub.outcome.is_no_winner() || sub.outcome.is_winner_only() {
        // Scores carry no meaning for these outcomes; drop any strays.
        ([None; 3], [None; 2])
    } else {
        if sub.outcome == OutcomeType::Completed {
            for (i, set) in sub.sets.iter().enumerate().take(2) {
                if let Some(s) = set {
                    if !valid_set(*s) {
                        return Err(LadderError::InvalidSetScore {
                            set: i + 1,
                            score: *s,
                        });
                    }
                }
            }
            if let Some(s) = sub.sets[2] {
                if !valid_match_tiebreak(s) {
                    return Err(LadderError::InvalidTiebreak { score: s });
                }
            }
            if sub.sets[0].is_none() || sub.sets[1].is_none() {
                return Err(LadderError::MissingSets);
            }
        }
        (sub.sets, sub.set_tiebreaks)
    };

    if ladder
        .group_matches(sub.group_id)
        .any(|m| m.same_pair(sub.submitter, sub.opponent))
    {
        return Err(LadderError::DuplicateMatch);
    }

    // Stable order: lower id is player1.
    let flip = sub.submitter > sub.opponent;
    let (player1, player2) = if flip {
        (sub.opponent, sub.submitter)
    } else {
        (sub.submitter, sub.opponent)
    };
    let orient = |s: Option<SetScore>| if flip { s.map(SetScore::flipped) } else { s };

    let m = Match {
        id: Uuid::new_v4(),
        group_id: sub.group_id,
        player1,
        player2,
        winner,
        sets: [orient(sets[0]), orient(sets[1]), orient(sets[2])],
        set_tiebreaks: [orient(set_tiebreaks[0]), orient(set_tiebreaks[1])],
        outcome: sub.outcome,
        status: MatchStatus::Pending,
        submitted_by: sub.submitter,
        confirmed_by: None,
        created_at: Utc::now(),
    };
    let id = m.id;
    ladder.matches.push(m);
    Ok(id)
}

/// Confirm a pending match. Only the non-submitting participant may confirm.
pub fn confirm_match(ladder: &mut Ladder, match_id: MatchId, by: PlayerId) -> Result<(), LadderError> {
    let m = ladder
        .match_by_id_mut(match_id)
        .ok_or(LadderError::MatchNotFound(match_id))?;
    if m.status != MatchStatus::Pending {
        return Err(LadderError::NotPending);
    }
    if by == m.submitted_by {
        return Err(LadderError::CannotActOnOwnSubmission);
    }
    if !m.involves(by) {
        return Err(LadderError::NotAParticipant);
    }
    m.status = MatchStatus::Confirmed;
    m.confirmed_by = Some(by);
    Ok(())
}

/// Dispute a match. Disputed matches are frozen out of standings until an
/// admin deletes them for resubmission.
pub fn dispute_match(ladder: &mut Ladder, match_id: MatchId, by: PlayerId) -> Result<(), LadderError> {
    let m = ladder
        .match_by_id_mut(match_id)
        .ok_or(LadderError::MatchNotFound(match_id))?;
    if by == m.submitted_by {
        return Err(LadderError::CannotActOnOwnSubmission);
    }
    if !m.involves(by) {
        return Err(LadderError::NotAParticipant);
    }
    m.status = MatchStatus::Disputed;
    Ok(())
}

/// Delete a match. The submitter may delete their own unconfirmed submission;
/// confirmed matches can only be deleted by an admin.
pub fn delete_match(
    ladder: &mut Ladder,
    match_id: MatchId,
    by: PlayerId,
    is_admin: bool,
) -> Result<(), LadderError> {
    let m = ladder
        .match_by_id(match_id)
        .ok_or(LadderError::MatchNotFound(match_id))?;
    if by != m.submitted_by && !is_admin {
        return Err(LadderError::AdminRequired);
    }
    if m.status == MatchStatus::Confirmed && !is_admin {
        return Err(LadderError::AdminRequired);
    }
    ladder.matches.retain(|m| m.id != match_id);
    Ok(())
}
