//! The scoring state machine: events, guards, and transition actions.
//!
//! Every transition is a pure function of (phase, context, event); there is
//! no I/O and no suspension point. Guard failures are silent no-ops by
//! design: a mis-tap on a live-scoring UI must never crash or corrupt state,
//! so an illegal event is indistinguishable from nothing having happened.

use tracing::{debug, trace};

use crate::domain::history;
use crate::domain::match_config::{GameType, MatchConfig, ScoringMode};
use crate::domain::rules::{self, TEAMS};
use crate::domain::snapshot::{self, EngineView, ResumeState};
use crate::domain::state::{is_team, opposing, team_index, Phase, ScoringContext, Team};

/// Events accepted by the scoring machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Begin a fresh match from `Pregame`.
    StartGame,
    /// The named team won the rally.
    ScorePoint { team: Team },
    /// Serve passes without a point (side-out play).
    SideOut,
    /// Take back the most recent scoring or side-out mutation.
    Undo,
    /// Acknowledge a finished game and begin the next one.
    StartNextGame,
    /// Restore a persisted match from `Pregame`. The caller supplies the
    /// config from its own match record; undo history never survives this.
    Resume {
        config: MatchConfig,
        state: ResumeState,
    },
}

/// Handle owning one match's phase and context. Single-writer: concurrent
/// event delivery into one instance must be serialized by the caller.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    phase: Phase,
    context: ScoringContext,
}

impl ScoringEngine {
    /// New engine in `Pregame`. The caller then sends exactly one of
    /// [`Event::StartGame`] or [`Event::Resume`] before any other event.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            phase: Phase::Pregame,
            context: ScoringContext::new(config),
        }
    }

    /// Feed one event through the machine. Illegal events are dropped.
    pub fn send(&mut self, event: Event) {
        self.phase = transition(self.phase, &mut self.context, event);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn context(&self) -> &ScoringContext {
        &self.context
    }

    /// Observable snapshot for UI, persistence, and announcement callers.
    pub fn view(&self) -> EngineView {
        snapshot::view(self.phase, &self.context)
    }
}

/// The transition function. Arms not listed are guard rejections: the event
/// is dropped and both phase and context stay untouched. `MatchOver` is
/// terminal by virtue of having no arm at all.
pub fn transition(phase: Phase, ctx: &mut ScoringContext, event: Event) -> Phase {
    match (phase, event) {
        (Phase::Pregame, Event::StartGame) => Phase::Serving,
        (Phase::Pregame, Event::Resume { config, state }) => resume(ctx, config, state),
        (Phase::Serving, Event::ScorePoint { team }) => score_point(ctx, team),
        (Phase::Serving, Event::SideOut) => {
            side_out(ctx);
            Phase::Serving
        }
        (Phase::Serving, Event::Undo) => {
            if history::undo(ctx) {
                trace!(
                    game = ctx.game_number,
                    scores = ?ctx.scores,
                    "undo applied"
                );
            }
            Phase::Serving
        }
        (Phase::BetweenGames, Event::StartNextGame) => {
            start_next_game(ctx);
            Phase::Serving
        }
        (phase, event) => {
            trace!(?phase, ?event, "event dropped");
            phase
        }
    }
}

/// Score a rally for `team`, then run the transient win checks.
fn score_point(ctx: &mut ScoringContext, team: Team) -> Phase {
    if !is_team(team) {
        return Phase::Serving;
    }
    // Side-out discipline: only the serving team may score.
    if ctx.config.scoring_mode == ScoringMode::SideOut && team != ctx.serving_team {
        return Phase::Serving;
    }

    history::push_snapshot(ctx);
    let idx = team_index(team);
    ctx.scores[idx] = ctx.scores[idx].saturating_add(1);

    // Rally discipline: serve follows a receiving-team point, and the
    // server number resets. A serving-team point changes nothing.
    if ctx.config.scoring_mode == ScoringMode::Rally && team != ctx.serving_team {
        ctx.serving_team = team;
        ctx.server_number = 1;
    }

    trace!(
        team,
        scores = ?ctx.scores,
        serving_team = ctx.serving_team,
        "point scored"
    );

    check_win(ctx)
}

/// Record a game win if either side has one, then check the match.
fn check_win(ctx: &mut ScoringContext) -> Phase {
    let target = ctx.config.points_to_win;
    let winner: Option<Team> = if rules::game_won(ctx.scores[0], ctx.scores[1], target) {
        Some(1)
    } else if rules::game_won(ctx.scores[1], ctx.scores[0], target) {
        Some(2)
    } else {
        None
    };

    let Some(winner) = winner else {
        return Phase::Serving;
    };

    let idx = team_index(winner);
    ctx.games_won[idx] = ctx.games_won[idx].saturating_add(1);
    debug!(
        game = ctx.game_number,
        winner,
        scores = ?ctx.scores,
        games_won = ?ctx.games_won,
        "game won"
    );
    check_match_win(ctx)
}

/// Match is decided once either side holds enough games.
fn check_match_win(ctx: &ScoringContext) -> Phase {
    if ctx.games_won.iter().any(|&won| won >= ctx.games_to_win) {
        debug!(games_won = ?ctx.games_won, "match over");
        Phase::MatchOver
    } else {
        Phase::BetweenGames
    }
}

/// Serve rotation on a side out. Singles alternates teams; doubles gives
/// each team two server turns (the opening team's single turn is already
/// encoded in the initial server number).
fn side_out(ctx: &mut ScoringContext) {
    history::push_snapshot(ctx);
    match ctx.config.game_type {
        GameType::Singles => {
            ctx.serving_team = opposing(ctx.serving_team);
            ctx.server_number = 1;
        }
        GameType::Doubles => {
            if ctx.server_number == 1 {
                ctx.server_number = 2;
            } else {
                ctx.serving_team = opposing(ctx.serving_team);
                ctx.server_number = 1;
            }
        }
    }
    trace!(
        serving_team = ctx.serving_team,
        server_number = ctx.server_number,
        "side out"
    );
}

/// Reset for the next game: fresh scores, fresh undo stack, first server
/// by strict game-number alternation, one-serve rule re-applied.
fn start_next_game(ctx: &mut ScoringContext) {
    ctx.scores = [0; TEAMS];
    ctx.game_number = ctx.game_number.saturating_add(1);
    ctx.history.clear();
    ctx.serving_team = rules::first_serving_team(ctx.game_number);
    ctx.server_number = rules::initial_server_number(&ctx.config);
    debug!(
        game = ctx.game_number,
        serving_team = ctx.serving_team,
        "next game started"
    );
}

/// Restore a persisted match. History is discarded, so undo never crosses
/// a restart; the phase is re-derived from the restored fields because the
/// snapshot may have been written between a game ending and the player
/// acknowledging it.
fn resume(ctx: &mut ScoringContext, config: MatchConfig, state: ResumeState) -> Phase {
    ctx.config = config;
    ctx.games_to_win = config.games_to_win();
    ctx.scores = state.scores;
    ctx.serving_team = state.serving_team;
    ctx.server_number = state.server_number;
    ctx.game_number = state.game_number;
    ctx.games_won = state.games_won;
    ctx.history.clear();

    let phase = snapshot::resume_phase(ctx);
    debug!(
        game = ctx.game_number,
        scores = ?ctx.scores,
        games_won = ?ctx.games_won,
        ?phase,
        "match resumed"
    );
    phase
}
