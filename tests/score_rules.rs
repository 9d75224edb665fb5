//! Integration tests for score validation and the match submission lifecycle.

use tennis_ladder_web::logic::{valid_match_tiebreak, valid_set};
use tennis_ladder_web::{
    confirm_match, delete_match, dispute_match, submit_match, Cycle, Ladder, LadderError,
    MatchStatus, MatchSubmission, OutcomeType, PlayerId, SetScore,
};

fn ladder_with_players(n: usize) -> Ladder {
    let mut l = Ladder::new("Test");
    for i in 0..n {
        l.insert_player_at(format!("P{i}"), None, None, i as u32 + 1)
            .unwrap();
    }
    l
}

fn id_at(l: &Ladder, rank: u32) -> PlayerId {
    l.rank_holder(rank).unwrap().id
}

/// Two players, one group for the current cycle. Returns (ladder, group_id).
fn two_player_group() -> (Ladder, uuid::Uuid) {
    let mut l = ladder_with_players(2);
    tennis_ladder_web::generate_groups(&mut l, Cycle::current()).unwrap();
    let gid = l.groups[0].id;
    (l, gid)
}

fn completed_submission(
    group_id: uuid::Uuid,
    submitter: PlayerId,
    opponent: PlayerId,
    winner: PlayerId,
    sets: [Option<SetScore>; 3],
) -> MatchSubmission {
    MatchSubmission {
        group_id,
        submitter,
        opponent,
        outcome: OutcomeType::Completed,
        winner: Some(winner),
        sets,
        set_tiebreaks: [None; 2],
    }
}

#[test]
fn set_scores_accept_only_legal_tennis_sets() {
    assert!(valid_set(SetScore::new(6, 0)));
    assert!(valid_set(SetScore::new(6, 4)));
    assert!(valid_set(SetScore::new(4, 6)));
    assert!(valid_set(SetScore::new(7, 5)));
    assert!(valid_set(SetScore::new(7, 6)));
    assert!(valid_set(SetScore::new(6, 7)));

    assert!(!valid_set(SetScore::new(6, 5)));
    assert!(!valid_set(SetScore::new(7, 4)));
    assert!(!valid_set(SetScore::new(8, 6)));
    assert!(!valid_set(SetScore::new(6, 6)));
    assert!(!valid_set(SetScore::new(0, 0)));
}

#[test]
fn match_tiebreaks_are_first_to_10_or_7_win_by_2() {
    assert!(valid_match_tiebreak(SetScore::new(10, 8)));
    assert!(valid_match_tiebreak(SetScore::new(10, 0)));
    assert!(valid_match_tiebreak(SetScore::new(11, 9)));
    assert!(valid_match_tiebreak(SetScore::new(12, 10)));
    assert!(valid_match_tiebreak(SetScore::new(7, 5)));
    assert!(valid_match_tiebreak(SetScore::new(5, 7)));
    assert!(valid_match_tiebreak(SetScore::new(8, 6)));
    assert!(valid_match_tiebreak(SetScore::new(9, 7)));

    assert!(!valid_match_tiebreak(SetScore::new(10, 9)));
    assert!(!valid_match_tiebreak(SetScore::new(11, 10)));
    assert!(!valid_match_tiebreak(SetScore::new(9, 8)));
    assert!(!valid_match_tiebreak(SetScore::new(13, 10)));
    assert!(!valid_match_tiebreak(SetScore::new(6, 4)));
    assert!(!valid_match_tiebreak(SetScore::new(7, 6)));
}

#[test]
fn completed_match_rejects_bad_set_score() {
    let (mut l, gid) = two_player_group();
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let sub = completed_submission(
        gid,
        a,
        b,
        a,
        [Some(SetScore::new(6, 5)), Some(SetScore::new(6, 3)), None],
    );
    assert!(matches!(
        submit_match(&mut l, sub),
        Err(LadderError::InvalidSetScore { set: 1, .. })
    ));
}

#[test]
fn completed_match_requires_first_two_sets() {
    let (mut l, gid) = two_player_group();
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let sub = completed_submission(gid, a, b, a, [Some(SetScore::new(6, 4)), None, None]);
    assert!(matches!(
        submit_match(&mut l, sub),
        Err(LadderError::MissingSets)
    ));
}

#[test]
fn third_set_must_be_a_valid_tiebreak() {
    let (mut l, gid) = two_player_group();
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let sub = completed_submission(
        gid,
        a,
        b,
        a,
        [
            Some(SetScore::new(6, 4)),
            Some(SetScore::new(4, 6)),
            Some(SetScore::new(10, 9)),
        ],
    );
    assert!(matches!(
        submit_match(&mut l, sub),
        Err(LadderError::InvalidTiebreak { .. })
    ));
}

#[test]
fn winner_must_be_a_participant() {
    let mut l = ladder_with_players(4);
    tennis_ladder_web::generate_groups(&mut l, Cycle::current()).unwrap();
    // 4 players partition to 2+2; group 1 holds ranks 1-2.
    let gid = l.groups[0].id;
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let outsider = id_at(&l, 3);
    let sub = completed_submission(
        gid,
        a,
        b,
        outsider,
        [Some(SetScore::new(6, 4)), Some(SetScore::new(6, 3)), None],
    );
    assert!(matches!(
        submit_match(&mut l, sub),
        Err(LadderError::InvalidWinner)
    ));
}

#[test]
fn opponent_must_be_a_groupmate() {
    let mut l = ladder_with_players(4);
    tennis_ladder_web::generate_groups(&mut l, Cycle::current()).unwrap();
    let gid = l.groups[0].id;
    let a = id_at(&l, 1);
    let outsider = id_at(&l, 3);
    let sub = completed_submission(
        gid,
        a,
        outsider,
        a,
        [Some(SetScore::new(6, 4)), Some(SetScore::new(6, 3)), None],
    );
    assert!(matches!(
        submit_match(&mut l, sub),
        Err(LadderError::InvalidOpponent)
    ));
}

#[test]
fn stored_row_is_oriented_to_the_lower_player_id() {
    let (mut l, gid) = two_player_group();
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    // Submit from the higher id so the row must be flipped on insert.
    let (lower, higher) = if a < b { (a, b) } else { (b, a) };
    let sub = completed_submission(
        gid,
        higher,
        lower,
        higher,
        [Some(SetScore::new(6, 2)), Some(SetScore::new(7, 5)), None],
    );
    let mid = submit_match(&mut l, sub).unwrap();

    let m = l.match_by_id(mid).unwrap();
    assert_eq!(m.player1, lower);
    assert_eq!(m.player2, higher);
    // Scores were submitted from the winner's side; stored from player1's.
    assert_eq!(m.sets[0], Some(SetScore::new(2, 6)));
    assert_eq!(m.sets[1], Some(SetScore::new(5, 7)));
    assert_eq!(m.winner, Some(higher));
}

#[test]
fn duplicate_matchup_in_a_group_is_rejected() {
    let (mut l, gid) = two_player_group();
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let sets = [Some(SetScore::new(6, 4)), Some(SetScore::new(6, 3)), None];
    submit_match(&mut l, completed_submission(gid, a, b, a, sets)).unwrap();

    // Same pair, other direction, still a duplicate.
    let again = completed_submission(gid, b, a, b, sets);
    assert!(matches!(
        submit_match(&mut l, again),
        Err(LadderError::DuplicateMatch)
    ));
}

#[test]
fn forfeit_and_no_winner_outcomes_drop_stray_scores() {
    let (mut l, gid) = two_player_group();
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let sub = MatchSubmission {
        group_id: gid,
        submitter: a,
        opponent: b,
        outcome: OutcomeType::Forfeit,
        winner: Some(a),
        sets: [Some(SetScore::new(6, 0)), None, None],
        set_tiebreaks: [None; 2],
    };
    let mid = submit_match(&mut l, sub).unwrap();
    let m = l.match_by_id(mid).unwrap();
    assert_eq!(m.sets, [None; 3]);
    assert_eq!(m.winner, Some(a));
}

#[test]
fn confirm_flow_only_the_opponent_may_confirm() {
    let (mut l, gid) = two_player_group();
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let sets = [Some(SetScore::new(6, 4)), Some(SetScore::new(6, 3)), None];
    let mid = submit_match(&mut l, completed_submission(gid, a, b, a, sets)).unwrap();
    assert_eq!(l.match_by_id(mid).unwrap().status, MatchStatus::Pending);

    assert!(matches!(
        confirm_match(&mut l, mid, a),
        Err(LadderError::CannotActOnOwnSubmission)
    ));
    confirm_match(&mut l, mid, b).unwrap();
    let m = l.match_by_id(mid).unwrap();
    assert_eq!(m.status, MatchStatus::Confirmed);
    assert_eq!(m.confirmed_by, Some(b));

    // Confirming twice fails: no longer pending.
    assert!(matches!(
        confirm_match(&mut l, mid, b),
        Err(LadderError::NotPending)
    ));
}

#[test]
fn dispute_marks_the_match_and_blocks_self_dispute() {
    let (mut l, gid) = two_player_group();
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let sets = [Some(SetScore::new(6, 4)), Some(SetScore::new(6, 3)), None];
    let mid = submit_match(&mut l, completed_submission(gid, a, b, a, sets)).unwrap();

    assert!(matches!(
        dispute_match(&mut l, mid, a),
        Err(LadderError::CannotActOnOwnSubmission)
    ));
    dispute_match(&mut l, mid, b).unwrap();
    assert_eq!(l.match_by_id(mid).unwrap().status, MatchStatus::Disputed);
}

#[test]
fn confirmed_match_deletion_requires_admin() {
    let (mut l, gid) = two_player_group();
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let sets = [Some(SetScore::new(6, 4)), Some(SetScore::new(6, 3)), None];
    let mid = submit_match(&mut l, completed_submission(gid, a, b, a, sets)).unwrap();
    confirm_match(&mut l, mid, b).unwrap();

    assert!(matches!(
        delete_match(&mut l, mid, a, false),
        Err(LadderError::AdminRequired)
    ));
    delete_match(&mut l, mid, a, true).unwrap();
    assert!(l.match_by_id(mid).is_none());
}

#[test]
fn submitter_may_delete_their_own_pending_match() {
    let (mut l, gid) = two_player_group();
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let sets = [Some(SetScore::new(6, 4)), Some(SetScore::new(6, 3)), None];
    let mid = submit_match(&mut l, completed_submission(gid, a, b, a, sets)).unwrap();

    assert!(matches!(
        delete_match(&mut l, mid, b, false),
        Err(LadderError::AdminRequired)
    ));
    delete_match(&mut l, mid, a, false).unwrap();
    assert!(l.matches.is_empty());
}
