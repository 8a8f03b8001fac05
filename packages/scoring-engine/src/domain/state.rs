//! Scoring context and phase definitions.

use serde::{Deserialize, Serialize};

use crate::domain::match_config::MatchConfig;
use crate::domain::rules::{self, TEAMS};
use crate::domain::snapshot::ScoringSnapshot;

pub type Team = u8; // 1 or 2

/// Observable phases of the scoring machine.
///
/// Game-win and match-win checks run as internal pass-throughs between a
/// scored point and the next observable phase; they never appear here.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Engine constructed, no game started or resumed yet.
    Pregame,
    /// A game is live; scoring events apply.
    Serving,
    /// A game just ended but the match has not; waiting for the next game.
    BetweenGames,
    /// Match decided. Terminal: every event is dropped.
    MatchOver,
}

/// Team math helpers (2 fixed teams: 1 and 2).
///
/// These live in `domain` so the engine, snapshot codec, and any caller
/// share a single source of truth for "the other side" and array indexing.
#[inline]
pub fn is_team(value: u8) -> bool {
    value == 1 || value == 2
}

/// The opposing team (1 ↔ 2).
#[inline]
pub fn opposing(team: Team) -> Team {
    debug_assert!(is_team(team));
    3 - team
}

/// Index of a team into the `[u8; TEAMS]` score/tally arrays.
#[inline]
pub fn team_index(team: Team) -> usize {
    debug_assert!(is_team(team));
    (team - 1) as usize
}

/// Entire mutable scoring state for one running match.
///
/// Owned exclusively by one [`ScoringEngine`](crate::ScoringEngine) and
/// mutated only through its transitions, never directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringContext {
    /// Rules for this match; fixed for the context's lifetime.
    pub config: MatchConfig,
    /// Current game scores, indexed by [`team_index`]. Reset each game.
    pub scores: [u8; TEAMS],
    /// Team currently serving.
    pub serving_team: Team,
    /// Server 1 or 2; meaningful only in doubles side-out play. Stays 1
    /// in singles and under rally scoring for the event streams a rally
    /// UI emits — a side-out event is guard-free and still rotates the
    /// doubles server if a caller sends one.
    pub server_number: u8,
    /// 1-based game number within the match.
    pub game_number: u8,
    /// Games won per team, indexed by [`team_index`].
    pub games_won: [u8; TEAMS],
    /// Derived from `config.match_format`, cached on the context.
    pub games_to_win: u8,
    /// In-session undo stack of pre-mutation snapshots. Never persisted:
    /// a resumed match always starts with an empty stack.
    pub history: Vec<ScoringSnapshot>,
}

impl ScoringContext {
    /// Fresh context for game 1. Team 1 serves first; the server number
    /// encodes the doubles one-serve rule.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            scores: [0; TEAMS],
            serving_team: 1,
            server_number: rules::initial_server_number(&config),
            game_number: 1,
            games_won: [0; TEAMS],
            games_to_win: config.games_to_win(),
            history: Vec::new(),
        }
    }
}
