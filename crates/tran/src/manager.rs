//! Transaction manager for coordinator lifecycle
//!
//! Begins and ends transaction coordinators:
//! 1. begin_local() / begin_global() - Create a fresh Active coordinator
//! 2. end() - Transition it to Committed or RolledBack, exactly once
//!
//! The manager owns no per-thread state; which thread a coordinator is
//! bound to is the registry slot's business, not the manager's. Commit
//! here is lifecycle-only: the distributed commit protocol, resource
//! enlistment, and recovery logging all live behind other components.

use std::sync::atomic::{AtomicU64, Ordering};
use txspan_core::{Coordinator, GlobalTranSource, Outcome, TranEngine, TranError, TranKind};

/// Manages transaction coordinator lifecycle
///
/// TranManager creates coordinators and ends them with an outcome. Each
/// coordinator gets a monotonic sequence number for diagnostics; identity
/// is the coordinator's own UUID token.
///
/// # Thread Safety
///
/// The manager is freely shared across threads; coordinator state is
/// internally synchronized. The sequence counter is the only state the
/// manager itself carries.
#[derive(Debug)]
pub struct TranManager {
    /// Next diagnostic sequence number
    ///
    /// Monotonically increasing. Each begun transaction takes the next one.
    next_seq: AtomicU64,
}

impl TranManager {
    /// Create a new transaction manager
    pub fn new() -> Self {
        TranManager {
            next_seq: AtomicU64::new(1),
        }
    }

    fn begin(&self, kind: TranKind) -> Coordinator {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let coordinator = Coordinator::begin(kind, seq);
        tracing::debug!(
            coordinator = %coordinator.id(),
            kind = %kind,
            seq,
            "transaction begun"
        );
        coordinator
    }

    /// Begin a lightweight LOCAL transaction scope
    pub fn begin_local(&self) -> Coordinator {
        self.begin(TranKind::Local)
    }

    /// Begin a GLOBAL transaction
    pub fn begin_global(&self) -> Coordinator {
        self.begin(TranKind::Global)
    }

    /// End a coordinator with the given outcome
    ///
    /// # Returns
    /// - Ok(()) when the coordinator transitioned out of Active
    /// - Err(TranError::AlreadyEnded) when it had already ended
    pub fn end(&self, coordinator: &Coordinator, outcome: Outcome) -> Result<(), TranError> {
        coordinator.mark_ended(outcome)?;
        tracing::debug!(
            coordinator = %coordinator.id(),
            kind = %coordinator.kind(),
            outcome = %outcome,
            "transaction ended"
        );
        Ok(())
    }
}

impl TranEngine for TranManager {
    fn begin_local(&self) -> Coordinator {
        TranManager::begin_local(self)
    }

    fn end(&self, coordinator: &Coordinator, outcome: Outcome) -> Result<(), TranError> {
        TranManager::end(self, coordinator, outcome)
    }
}

impl GlobalTranSource for TranManager {
    fn begin_global(&self) -> Coordinator {
        TranManager::begin_global(self)
    }
}

impl Default for TranManager {
    fn default() -> Self {
        Self::new()
    }
}
