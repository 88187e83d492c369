//! Trait seams between the context engine and its collaborators
//!
//! The context engine consumes a transaction engine only through
//! [`TranEngine`]: begin a fresh local scope, end a coordinator with an
//! outcome. The commit protocol behind `end` is the engine's business.

use crate::coordinator::Coordinator;
use crate::error::TranError;
use crate::types::Outcome;

/// The transaction engine contract consumed by the context engine
///
/// Implementations begin lightweight LOCAL scopes used as substitutes while
/// a task runs, and end any coordinator (local or global) with a commit or
/// rollback outcome.
pub trait TranEngine {
    /// Begin a fresh LOCAL coordinator, not yet bound to any slot
    fn begin_local(&self) -> Coordinator;

    /// End a coordinator with the given outcome
    ///
    /// Fails with [`TranError::AlreadyEnded`] when the coordinator has
    /// already ended.
    fn end(&self, coordinator: &Coordinator, outcome: Outcome) -> Result<(), TranError>;
}

/// Ability to begin GLOBAL coordinators
///
/// The context engine itself never creates a global transaction; this seam
/// exists for task execution hosts (and tests) that drive global scopes
/// through the same engine.
pub trait GlobalTranSource {
    /// Begin a fresh GLOBAL coordinator, not yet bound to any slot
    fn begin_global(&self) -> Coordinator;
}
