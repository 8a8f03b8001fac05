//! Snapshot shapes: undo-history entries, the external resume contract,
//! and the observable view callers read after each event.
//!
//! The engine defines these shapes and their restore semantics only; the
//! wire format (JSON or otherwise) is owned by the persistence collaborator.

use serde::{Deserialize, Serialize};

use crate::domain::match_config::MatchConfig;
use crate::domain::rules::{self, TEAMS};
use crate::domain::state::{is_team, Phase, ScoringContext, Team};
use crate::errors::domain::{DomainError, ValidationKind};

/// Point-in-time copy of the mutable scoring fields, used for undo entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSnapshot {
    pub scores: [u8; TEAMS],
    pub serving_team: Team,
    pub server_number: u8,
    pub game_number: u8,
    pub games_won: [u8; TEAMS],
}

impl ScoringSnapshot {
    /// Capture the mutable fields of a context (config and history excluded).
    pub fn capture(ctx: &ScoringContext) -> Self {
        Self {
            scores: ctx.scores,
            serving_team: ctx.serving_team,
            server_number: ctx.server_number,
            game_number: ctx.game_number,
            games_won: ctx.games_won,
        }
    }

    /// Write the captured fields back onto a context.
    pub fn restore(&self, ctx: &mut ScoringContext) {
        ctx.scores = self.scores;
        ctx.serving_team = self.serving_team;
        ctx.server_number = self.server_number;
        ctx.game_number = self.game_number;
        ctx.games_won = self.games_won;
    }
}

/// External resume contract: the fields a persistence collaborator stores
/// after each mutating event and feeds back through
/// [`Event::Resume`](crate::Event::Resume) on restart. The match config is
/// not embedded; the caller supplies it from its own match record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeState {
    pub scores: [u8; TEAMS],
    pub serving_team: Team,
    pub server_number: u8,
    pub game_number: u8,
    pub games_won: [u8; TEAMS],
}

impl From<&ScoringContext> for ResumeState {
    fn from(ctx: &ScoringContext) -> Self {
        Self {
            scores: ctx.scores,
            serving_team: ctx.serving_team,
            server_number: ctx.server_number,
            game_number: ctx.game_number,
            games_won: ctx.games_won,
        }
    }
}

impl ResumeState {
    /// Optional caller-side consistency check against the config the state
    /// is about to be resumed under. The engine never calls this: a resume
    /// with inconsistent input is a caller precondition violation, and this
    /// helper is how a stricter caller avoids it.
    pub fn check_against(&self, config: &MatchConfig) -> Result<(), DomainError> {
        if config.points_to_win == 0 {
            return Err(DomainError::validation(
                ValidationKind::PointsToWinZero,
                "points_to_win must be at least 1",
            ));
        }
        if !is_team(self.serving_team) {
            return Err(DomainError::validation(
                ValidationKind::TeamOutOfRange,
                format!("serving_team must be 1 or 2, got {}", self.serving_team),
            ));
        }
        if self.server_number != 1 && self.server_number != 2 {
            return Err(DomainError::validation(
                ValidationKind::ServerOutOfRange,
                format!("server_number must be 1 or 2, got {}", self.server_number),
            ));
        }
        let games_to_win = config.games_to_win();
        if self.games_won.iter().any(|&won| won > games_to_win) {
            return Err(DomainError::validation(
                ValidationKind::GamesWonExceedsFormat,
                format!(
                    "games_won {:?} exceeds games_to_win {games_to_win}",
                    self.games_won
                ),
            ));
        }
        // game_number counts the game in progress: equal to the games-played
        // tally only when the current game has just finished, otherwise one
        // ahead of it.
        let played = u16::from(self.games_won[0]) + u16::from(self.games_won[1]);
        let game_number = u16::from(self.game_number);
        if game_number == 0 || (game_number != played && game_number != played + 1) {
            return Err(DomainError::validation(
                ValidationKind::GameNumberInconsistent,
                format!(
                    "game_number {} inconsistent with games_won {:?}",
                    self.game_number, self.games_won
                ),
            ));
        }
        Ok(())
    }
}

/// Observable snapshot of the machine: phase plus the public context fields.
/// Built fresh on every read; callers poll this after each send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineView {
    pub phase: Phase,
    pub config: MatchConfig,
    pub scores: [u8; TEAMS],
    pub serving_team: Team,
    pub server_number: u8,
    pub game_number: u8,
    pub games_won: [u8; TEAMS],
    pub games_to_win: u8,
    /// Whether an undo event would currently do anything.
    pub can_undo: bool,
}

impl EngineView {
    /// The blob a persistence collaborator stores for cross-session resume.
    pub fn resume_state(&self) -> ResumeState {
        ResumeState {
            scores: self.scores,
            serving_team: self.serving_team,
            server_number: self.server_number,
            game_number: self.game_number,
            games_won: self.games_won,
        }
    }
}

/// Entry point: produce the observable view of the current machine state.
pub fn view(phase: Phase, ctx: &ScoringContext) -> EngineView {
    EngineView {
        phase,
        config: ctx.config,
        scores: ctx.scores,
        serving_team: ctx.serving_team,
        server_number: ctx.server_number,
        game_number: ctx.game_number,
        games_won: ctx.games_won,
        games_to_win: ctx.games_to_win,
        can_undo: !ctx.history.is_empty(),
    }
}

/// Three-way resume routing. A persisted snapshot may have been written
/// exactly between a game ending and the player acknowledging it, so a
/// resumed context can land past a game-win or past the match-win.
pub(crate) fn resume_phase(ctx: &ScoringContext) -> Phase {
    if ctx.games_won.iter().any(|&won| won >= ctx.games_to_win) {
        return Phase::MatchOver;
    }
    let target = ctx.config.points_to_win;
    if rules::game_won(ctx.scores[0], ctx.scores[1], target)
        || rules::game_won(ctx.scores[1], ctx.scores[0], target)
    {
        return Phase::BetweenGames;
    }
    Phase::Serving
}
