//! Pure rule functions shared by the engine, the snapshot codec, and tests.

use crate::domain::match_config::{GameType, MatchConfig, MatchFormat, ScoringMode};
use crate::domain::state::Team;

pub const TEAMS: usize = 2;

/// Games a side must win to take the match.
pub fn games_to_win(format: MatchFormat) -> u8 {
    match format {
        MatchFormat::Single => 1,
        MatchFormat::BestOfThree => 2,
        MatchFormat::BestOfFive => 3,
    }
}

/// Win-by-2 game test: target reached and leading by at least two.
/// No cap; deuce play continues past the target indefinitely.
pub fn game_won(score: u8, opponent: u8, points_to_win: u8) -> bool {
    score >= points_to_win && u16::from(score) >= u16::from(opponent) + 2
}

/// First server of a game alternates strictly by game number:
/// odd games team 1, even games team 2.
pub fn first_serving_team(game_number: u8) -> Team {
    if game_number % 2 == 1 {
        1
    } else {
        2
    }
}

/// Starting server number for a game under the one-serve rule: the first
/// serving team of a doubles side-out game gets a single service turn, so
/// the game opens on server two. Every other discipline opens on server one.
pub fn initial_server_number(config: &MatchConfig) -> u8 {
    if config.game_type == GameType::Doubles && config.scoring_mode == ScoringMode::SideOut {
        2
    } else {
        1
    }
}
