//! Immutable match configuration: the rules a match is played under.

use serde::{Deserialize, Serialize};

use crate::domain::rules;

/// Singles or doubles play.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Singles,
    Doubles,
}

/// Scoring discipline for the match.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Only the serving team can score; serve passes on a side out.
    SideOut,
    /// Either team scores the rally; serve follows a receiving-team point.
    Rally,
}

/// How many games make up the match.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    Single,
    BestOfThree,
    BestOfFive,
}

/// Immutable description of a match's rules.
///
/// Fixed for the lifetime of a [`ScoringContext`](crate::ScoringContext);
/// the only way a context ever sees a different config is through a resume,
/// where the caller supplies the config persisted with the match record.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub game_type: GameType,
    pub scoring_mode: ScoringMode,
    pub match_format: MatchFormat,
    /// Target points for each game (typically 11, 15, or 21). Win-by-2
    /// still applies past the target; there is no cap.
    pub points_to_win: u8,
}

impl MatchConfig {
    /// Games a side must win to take the match (majority of the format).
    pub fn games_to_win(&self) -> u8 {
        rules::games_to_win(self.match_format)
    }
}
