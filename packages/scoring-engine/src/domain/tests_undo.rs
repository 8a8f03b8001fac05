//! Undo semantics: strict inversion of scoring and side-out mutations.

use crate::domain::engine::Event;
use crate::domain::match_config::{GameType, MatchFormat, ScoringMode};
use crate::domain::snapshot::ScoringSnapshot;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{config, doubles_sideout_single_11, score_n, started};

#[test]
fn undo_reverses_a_score() {
    let mut engine = started(doubles_sideout_single_11());
    score_n(&mut engine, 1, 3);
    let before = ScoringSnapshot::capture(engine.context());
    let depth = engine.context().history.len();

    engine.send(Event::ScorePoint { team: 1 });
    engine.send(Event::Undo);

    assert_eq!(ScoringSnapshot::capture(engine.context()), before);
    assert_eq!(engine.context().history.len(), depth);
}

#[test]
fn undo_reverses_a_side_out() {
    let mut engine = started(doubles_sideout_single_11());
    engine.send(Event::SideOut);
    let before = ScoringSnapshot::capture(engine.context());
    let depth = engine.context().history.len();

    engine.send(Event::SideOut);
    engine.send(Event::Undo);

    assert_eq!(ScoringSnapshot::capture(engine.context()), before);
    assert_eq!(engine.context().history.len(), depth);
}

#[test]
fn undo_reverses_a_rally_serve_switch() {
    let mut engine = started(config(
        GameType::Doubles,
        ScoringMode::Rally,
        MatchFormat::Single,
        11,
    ));
    let before = ScoringSnapshot::capture(engine.context());

    engine.send(Event::ScorePoint { team: 2 });
    assert_eq!(engine.context().serving_team, 2);

    engine.send(Event::Undo);
    assert_eq!(ScoringSnapshot::capture(engine.context()), before);
    assert_eq!(engine.context().serving_team, 1);
}

#[test]
fn undo_with_empty_history_is_a_no_op() {
    let mut engine = started(doubles_sideout_single_11());
    let before = engine.context().clone();

    engine.send(Event::Undo);
    assert_eq!(engine.phase(), Phase::Serving);
    assert_eq!(*engine.context(), before);
}

#[test]
fn repeated_undo_walks_back_to_the_game_start() {
    let mut engine = started(doubles_sideout_single_11());
    let fresh = ScoringSnapshot::capture(engine.context());

    score_n(&mut engine, 1, 4);
    engine.send(Event::SideOut);
    engine.send(Event::SideOut);
    score_n(&mut engine, 1, 2);

    let depth = engine.context().history.len();
    for _ in 0..depth {
        engine.send(Event::Undo);
    }

    assert_eq!(ScoringSnapshot::capture(engine.context()), fresh);
    assert!(engine.context().history.is_empty());

    // One more is silently dropped.
    engine.send(Event::Undo);
    assert_eq!(ScoringSnapshot::capture(engine.context()), fresh);
}

#[test]
fn history_is_cleared_when_the_next_game_starts() {
    let mut engine = started(config(
        GameType::Singles,
        ScoringMode::Rally,
        MatchFormat::BestOfThree,
        11,
    ));
    score_n(&mut engine, 1, 11);
    assert_eq!(engine.phase(), Phase::BetweenGames);
    assert!(!engine.context().history.is_empty());

    engine.send(Event::StartNextGame);
    assert!(engine.context().history.is_empty());

    // Undo in the fresh game has nothing to pop.
    let before = engine.context().clone();
    engine.send(Event::Undo);
    assert_eq!(*engine.context(), before);
}

#[test]
fn undo_does_not_cross_a_dropped_event() {
    // A rejected score attempt must leave no history entry behind.
    let mut engine = started(doubles_sideout_single_11());
    engine.send(Event::ScorePoint { team: 1 });
    let depth = engine.context().history.len();

    engine.send(Event::ScorePoint { team: 2 }); // guard rejection
    assert_eq!(engine.context().history.len(), depth);
}
