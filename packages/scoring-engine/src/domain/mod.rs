//! Domain layer: pure scoring rules, context, and the state machine.

pub mod engine;
pub mod history;
pub mod match_config;
pub mod rules;
pub mod snapshot;
pub mod state;


#[cfg(test)]
mod tests_serve_rotation;
#[cfg(test)]
mod tests_undo;

// Re-exports for ergonomics
pub use engine::{Event, ScoringEngine};
pub use match_config::{GameType, MatchConfig, MatchFormat, ScoringMode};
pub use snapshot::{EngineView, ResumeState, ScoringSnapshot};
pub use state::{opposing, team_index, Phase, ScoringContext, Team};
