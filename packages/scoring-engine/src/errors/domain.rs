//! Domain-level error type for caller-side validation.
//!
//! The scoring machine itself never returns errors: illegal events are
//! rejected by guards as silent no-ops. This type is the contract for
//! validation helpers that callers may run *before* driving the engine
//! (e.g. checking a persisted [`ResumeState`](crate::ResumeState) against
//! the match config it is about to be resumed under).

use thiserror::Error;

/// Validation failure kinds (extend as needed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// A team value outside 1..=2.
    TeamOutOfRange,
    /// A server number outside 1..=2.
    ServerOutOfRange,
    /// `points_to_win` must be at least 1.
    PointsToWinZero,
    /// Game number inconsistent with the games-won tally.
    GameNumberInconsistent,
    /// A games-won count exceeds what the match format allows.
    GamesWonExceedsFormat,
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DomainError {
    /// Input validation or business rule violation.
    #[error("validation error ({kind:?}): {detail}")]
    Validation {
        kind: ValidationKind,
        detail: String,
    },
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }
}
