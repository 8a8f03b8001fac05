//! Undo history: an in-session stack of pre-mutation snapshots.
//!
//! Append-only during forward play, one pop per undo. Entries capture
//! exactly the mutable fields needed to reverse a scoring or side-out
//! transition. The stack is deliberately excluded from resume persistence,
//! so undo never crosses a process restart.

use crate::domain::snapshot::ScoringSnapshot;
use crate::domain::state::ScoringContext;

/// Push the current mutable fields onto the undo stack.
/// Called before every mutation that a player may want to take back.
pub fn push_snapshot(ctx: &mut ScoringContext) {
    let snapshot = ScoringSnapshot::capture(ctx);
    ctx.history.push(snapshot);
}

/// Pop the most recent snapshot and restore it. Returns `false` (leaving
/// the context untouched) when there is nothing to undo.
pub fn undo(ctx: &mut ScoringContext) -> bool {
    match ctx.history.pop() {
        Some(snapshot) => {
            snapshot.restore(ctx);
            true
        }
        None => false,
    }
}
