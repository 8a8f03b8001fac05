//! Serve rotation tests: the one-serve rule, the doubles side-out cycle,
//! singles alternation, and rally serve-switching.

use crate::domain::engine::Event;
use crate::domain::match_config::{GameType, MatchFormat, ScoringMode};
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{config, doubles_sideout_single_11, started};

#[test]
fn doubles_sideout_opens_on_server_two() {
    let engine = started(doubles_sideout_single_11());
    let ctx = engine.context();
    assert_eq!(ctx.serving_team, 1);
    assert_eq!(ctx.server_number, 2);
}

#[test]
fn first_side_out_passes_serve_after_single_turn() {
    let mut engine = started(doubles_sideout_single_11());
    engine.send(Event::SideOut);
    let ctx = engine.context();
    assert_eq!(ctx.serving_team, 2);
    assert_eq!(ctx.server_number, 1);
}

#[test]
fn doubles_sideout_rotation_has_period_four() {
    let mut engine = started(doubles_sideout_single_11());

    // Four side outs walk the full cycle; the fifth lands back on the
    // pair after the initial state, confirming period 4.
    let expected = [(2, 1), (2, 2), (1, 1), (1, 2), (2, 1)];
    for (serving_team, server_number) in expected {
        engine.send(Event::SideOut);
        let ctx = engine.context();
        assert_eq!(
            (ctx.serving_team, ctx.server_number),
            (serving_team, server_number)
        );
    }
    assert_eq!(engine.phase(), Phase::Serving);
}

#[test]
fn singles_side_out_alternates_teams_on_server_one() {
    let mut engine = started(config(
        GameType::Singles,
        ScoringMode::SideOut,
        MatchFormat::Single,
        11,
    ));
    assert_eq!(engine.context().server_number, 1);

    engine.send(Event::SideOut);
    assert_eq!(engine.context().serving_team, 2);
    assert_eq!(engine.context().server_number, 1);

    engine.send(Event::SideOut);
    assert_eq!(engine.context().serving_team, 1);
    assert_eq!(engine.context().server_number, 1);
}

#[test]
fn rally_receiving_team_point_takes_the_serve() {
    let mut engine = started(config(
        GameType::Doubles,
        ScoringMode::Rally,
        MatchFormat::Single,
        11,
    ));
    assert_eq!(engine.context().serving_team, 1);

    engine.send(Event::ScorePoint { team: 2 });
    let ctx = engine.context();
    assert_eq!(ctx.serving_team, 2);
    assert_eq!(ctx.server_number, 1);
    assert_eq!(ctx.scores, [0, 1]);
}

#[test]
fn rally_serving_team_point_keeps_the_serve() {
    let mut engine = started(config(
        GameType::Doubles,
        ScoringMode::Rally,
        MatchFormat::Single,
        11,
    ));
    engine.send(Event::ScorePoint { team: 1 });
    engine.send(Event::ScorePoint { team: 1 });
    let ctx = engine.context();
    assert_eq!(ctx.serving_team, 1);
    assert_eq!(ctx.scores, [2, 0]);
}

#[test]
fn rally_doubles_side_out_event_still_rotates_servers() {
    // Side out is guard-free: a rally UI never emits it, but a caller
    // that does still gets the doubles rotation.
    let mut engine = started(config(
        GameType::Doubles,
        ScoringMode::Rally,
        MatchFormat::Single,
        11,
    ));
    assert_eq!(engine.context().server_number, 1);

    engine.send(Event::SideOut);
    let ctx = engine.context();
    assert_eq!(ctx.serving_team, 1);
    assert_eq!(ctx.server_number, 2);
}

#[test]
fn sideout_score_does_not_move_the_serve() {
    let mut engine = started(doubles_sideout_single_11());
    engine.send(Event::ScorePoint { team: 1 });
    let ctx = engine.context();
    assert_eq!(ctx.serving_team, 1);
    assert_eq!(ctx.server_number, 2);
    assert_eq!(ctx.scores, [1, 0]);
}

#[test]
fn sideout_non_serving_team_score_is_dropped() {
    let mut engine = started(doubles_sideout_single_11());
    let before = engine.context().clone();

    engine.send(Event::ScorePoint { team: 2 });
    assert_eq!(engine.phase(), Phase::Serving);
    assert_eq!(*engine.context(), before);
}
