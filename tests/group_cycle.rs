//! Integration tests for standings, outcome credit, and movement verdicts.

use chrono::Utc;
use std::collections::HashMap;
use tennis_ladder_web::logic::{resolve, resolve_group_movement};
use tennis_ladder_web::{
    group_standings, Cycle, Group, Ladder, Match, MatchStatus, Movement, OutcomeType, PlayerId,
    SetScore,
};
use uuid::Uuid;

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

/// A confirmed match row, scores from `a`'s perspective.
fn confirmed(
    group_id: Uuid,
    a: PlayerId,
    b: PlayerId,
    winner: Option<PlayerId>,
    outcome: OutcomeType,
    sets: [Option<SetScore>; 3],
) -> Match {
    Match {
        id: Uuid::new_v4(),
        group_id,
        player1: a,
        player2: b,
        winner,
        sets,
        set_tiebreaks: [None; 2],
        outcome,
        status: MatchStatus::Confirmed,
        submitted_by: a,
        confirmed_by: Some(b),
        created_at: Utc::now(),
    }
}

fn s(p1: u8, p2: u8) -> Option<SetScore> {
    Some(SetScore::new(p1, p2))
}

#[test]
fn forfeit_credits_twelve_games_and_two_sets_to_the_winner() {
    let l = ladder_with_players(2);
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b]);
    let m = confirmed(group.id, a, b, Some(b), OutcomeType::Forfeit, [None; 3]);

    let r = resolve(&m);
    assert_eq!(r.games, (0, 12));
    assert_eq!(r.sets, (0, 2));
    assert_eq!(r.winner, Some(b));

    let stats = group_standings(&group, &[m]);
    assert_eq!(stats[&b].wins, 1);
    assert_eq!(stats[&b].games_won, 12);
    assert_eq!(stats[&a].losses, 1);
    assert_eq!(stats[&a].games_lost, 12);
}

#[test]
fn schedule_and_weather_outcomes_are_excluded_from_standings() {
    let l = ladder_with_players(2);
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b]);
    let matches = vec![
        confirmed(group.id, a, b, None, OutcomeType::ScheduleProblem, [None; 3]),
        confirmed(group.id, a, b, None, OutcomeType::WeatherProblem, [None; 3]),
    ];

    let stats = group_standings(&group, &matches);
    assert_eq!(stats[&a], Default::default());
    assert_eq!(stats[&b], Default::default());
}

#[test]
fn pending_and_disputed_matches_never_affect_standings() {
    let l = ladder_with_players(2);
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b]);
    let sets = [s(6, 4), s(6, 3), None];

    let mut pending = confirmed(group.id, a, b, Some(a), OutcomeType::Completed, sets);
    pending.status = MatchStatus::Pending;
    let mut disputed = confirmed(group.id, a, b, Some(a), OutcomeType::Completed, sets);
    disputed.status = MatchStatus::Disputed;

    let stats = group_standings(&group, &[pending, disputed]);
    assert_eq!(stats[&a].wins, 0);
    assert_eq!(stats[&a].games_won, 0);
}

#[test]
fn standings_are_a_pure_fold_of_the_rows() {
    let l = ladder_with_players(2);
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b]);
    let matches = vec![confirmed(
        group.id,
        a,
        b,
        Some(a),
        OutcomeType::Completed,
        [s(6, 4), s(7, 5), None],
    )];

    let first = group_standings(&group, &matches);
    let second = group_standings(&group, &matches);
    assert_eq!(first, second);
    assert_eq!(first[&a].games_won, 13);
    assert_eq!(first[&a].games_lost, 9);
    assert_eq!(first[&a].sets_won, 2);
}

#[test]
fn injury_not_finished_counts_partial_sets() {
    let l = ladder_with_players(2);
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b]);
    // One completed set, then a retirement; winner recorded by agreement.
    let matches = vec![confirmed(
        group.id,
        a,
        b,
        Some(a),
        OutcomeType::InjuryNotFinished,
        [s(6, 2), None, None],
    )];

    let stats = group_standings(&group, &matches);
    assert_eq!(stats[&a].wins, 1);
    assert_eq!(stats[&a].games_won, 6);
    assert_eq!(stats[&a].sets_won, 1);
    assert_eq!(stats[&b].losses, 1);
}

#[test]
fn three_player_group_clear_results_move_up_and_down() {
    let l = ladder_with_players(3);
    let (a, b, c) = (id_at(&l, 1), id_at(&l, 2), id_at(&l, 3));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b, c]);
    let matches = vec![
        confirmed(group.id, a, b, Some(a), OutcomeType::Completed, [s(6, 3), s(6, 4), None]),
        confirmed(group.id, a, c, Some(a), OutcomeType::Completed, [s(6, 1), s(6, 2), None]),
        confirmed(group.id, b, c, Some(b), OutcomeType::Completed, [s(6, 4), s(6, 4), None]),
    ];

    let stats = group_standings(&group, &matches);
    let ranks = l.rank_map();
    let verdicts = resolve_group_movement(&group, &stats, &ranks);
    assert_eq!(verdicts[&a], Movement::Up);
    assert_eq!(verdicts[&b], Movement::Stay);
    assert_eq!(verdicts[&c], Movement::Down);
}

#[test]
fn three_way_tie_breaks_on_set_differential_first() {
    let l = ladder_with_players(3);
    let (a, b, c) = (id_at(&l, 1), id_at(&l, 2), id_at(&l, 3));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b, c]);
    // Everyone 1-1. Set diffs: c +1, a 0, b -1.
    let matches = vec![
        confirmed(group.id, a, b, Some(a), OutcomeType::Completed, [s(6, 0), s(6, 0), None]),
        confirmed(group.id, b, c, Some(b), OutcomeType::Completed, [s(6, 0), s(0, 6), s(10, 0)]),
        confirmed(group.id, c, a, Some(c), OutcomeType::Completed, [s(6, 0), s(6, 0), None]),
    ];

    let stats = group_standings(&group, &matches);
    for pid in [a, b, c] {
        assert_eq!(stats[&pid].wins, 1);
        assert_eq!(stats[&pid].losses, 1);
    }
    assert_eq!(stats[&c].set_diff(), 1);
    assert_eq!(stats[&a].set_diff(), 0);
    assert_eq!(stats[&b].set_diff(), -1);

    let verdicts = resolve_group_movement(&group, &stats, &l.rank_map());
    assert_eq!(verdicts[&c], Movement::Up);
    assert_eq!(verdicts[&a], Movement::Stay);
    assert_eq!(verdicts[&b], Movement::Down);
}

#[test]
fn three_way_tie_falls_through_to_game_differential() {
    let l = ladder_with_players(3);
    let (a, b, c) = (id_at(&l, 1), id_at(&l, 2), id_at(&l, 3));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b, c]);
    // Everyone 1-1 with set diff 0; game diffs differ via set margins.
    let matches = vec![
        confirmed(group.id, a, b, Some(a), OutcomeType::Completed, [s(6, 0), s(6, 0), None]),
        confirmed(group.id, b, c, Some(b), OutcomeType::Completed, [s(6, 4), s(6, 4), None]),
        confirmed(group.id, c, a, Some(c), OutcomeType::Completed, [s(6, 4), s(6, 4), None]),
    ];

    let stats = group_standings(&group, &matches);
    // a: +12 vs b, -4 vs c => +8. b: -12, +4 => -8. c: -4, +4 => 0.
    assert_eq!(stats[&a].game_diff(), 8);
    assert_eq!(stats[&b].game_diff(), -8);
    assert_eq!(stats[&c].game_diff(), 0);
    for pid in [a, b, c] {
        assert_eq!(stats[&pid].set_diff(), 0);
    }

    let verdicts = resolve_group_movement(&group, &stats, &l.rank_map());
    assert_eq!(verdicts[&a], Movement::Up);
    assert_eq!(verdicts[&c], Movement::Stay);
    assert_eq!(verdicts[&b], Movement::Down);
}

#[test]
fn fully_symmetric_three_way_tie_resolves_by_rank() {
    let l = ladder_with_players(3);
    let (a, b, c) = (id_at(&l, 1), id_at(&l, 2), id_at(&l, 3));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b, c]);
    // A perfect cycle: identical set and game diffs all around.
    let matches = vec![
        confirmed(group.id, a, b, Some(a), OutcomeType::Completed, [s(6, 0), s(6, 0), None]),
        confirmed(group.id, b, c, Some(b), OutcomeType::Completed, [s(6, 0), s(6, 0), None]),
        confirmed(group.id, c, a, Some(c), OutcomeType::Completed, [s(6, 0), s(6, 0), None]),
    ];

    let stats = group_standings(&group, &matches);
    let verdicts = resolve_group_movement(&group, &stats, &l.rank_map());
    // Better current rank wins the final tie: rank 1 up, rank 3 down.
    assert_eq!(verdicts[&a], Movement::Up);
    assert_eq!(verdicts[&b], Movement::Stay);
    assert_eq!(verdicts[&c], Movement::Down);
}

#[test]
fn two_player_group_compares_wins() {
    let l = ladder_with_players(2);
    let (a, b) = (id_at(&l, 1), id_at(&l, 2));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b]);
    let matches = vec![confirmed(
        group.id,
        a,
        b,
        Some(b),
        OutcomeType::Completed,
        [s(4, 6), s(3, 6), None],
    )];

    let stats = group_standings(&group, &matches);
    let verdicts = resolve_group_movement(&group, &stats, &l.rank_map());
    assert_eq!(verdicts[&b], Movement::Up);
    assert_eq!(verdicts[&a], Movement::Down);
}

#[test]
fn players_with_no_matches_stay() {
    let l = ladder_with_players(3);
    let (a, b, c) = (id_at(&l, 1), id_at(&l, 2), id_at(&l, 3));
    let group = Group::new(Cycle::new(6, 2026), 1, vec![a, b, c]);

    let stats = group_standings(&group, &[]);
    let verdicts = resolve_group_movement(&group, &stats, &l.rank_map());
    let expected: HashMap<PlayerId, Movement> =
        [a, b, c].into_iter().map(|p| (p, Movement::Stay)).collect();
    assert_eq!(verdicts, expected);
}
