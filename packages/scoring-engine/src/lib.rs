#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod domain;
pub mod errors;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use domain::engine::{Event, ScoringEngine};
pub use domain::match_config::{GameType, MatchConfig, MatchFormat, ScoringMode};
pub use domain::snapshot::{EngineView, ResumeState, ScoringSnapshot};
pub use domain::state::{Phase, ScoringContext, Team};
pub use errors::domain::{DomainError, ValidationKind};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
