//! Coordinator handles
//!
//! A [`Coordinator`] represents one in-flight transaction bound to (or
//! suspended from) a thread of execution. Handles are cheap to clone; all
//! clones observe the same lifecycle state. Equality is identity equality:
//! two handles are equal when they refer to the same transaction.

use crate::error::TranError;
use crate::types::{CoordinatorId, Outcome, TranKind, TranStatus};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Shared lifecycle state behind a coordinator handle
#[derive(Debug)]
struct CoordState {
    status: Mutex<TranStatus>,
    began_at: DateTime<Utc>,
    /// Monotonic diagnostic sequence assigned by the engine that began this
    /// transaction. Not part of identity.
    seq: u64,
}

/// Handle to one in-flight transaction
///
/// Created by a transaction engine (`begin`), ended exactly once with a
/// commit or rollback outcome. The context engine never inspects a
/// coordinator beyond its kind, identity, and status.
///
/// # Examples
///
/// ```
/// use txspan_core::{Coordinator, Outcome, TranKind, TranStatus};
///
/// let c = Coordinator::begin(TranKind::Local, 1);
/// assert!(c.is_active());
/// c.mark_ended(Outcome::Rollback).unwrap();
/// assert_eq!(c.status(), TranStatus::RolledBack);
/// ```
#[derive(Debug, Clone)]
pub struct Coordinator {
    id: CoordinatorId,
    kind: TranKind,
    state: Arc<CoordState>,
}

impl Coordinator {
    /// Begin a new transaction of the given kind
    ///
    /// Normally invoked through a transaction engine, which assigns the
    /// diagnostic sequence number.
    pub fn begin(kind: TranKind, seq: u64) -> Self {
        Coordinator {
            id: CoordinatorId::new(),
            kind,
            state: Arc::new(CoordState {
                status: Mutex::new(TranStatus::Active),
                began_at: Utc::now(),
                seq,
            }),
        }
    }

    /// Identity token for this transaction
    pub fn id(&self) -> CoordinatorId {
        self.id
    }

    /// Local or global scope
    pub fn kind(&self) -> TranKind {
        self.kind
    }

    /// Current lifecycle status
    pub fn status(&self) -> TranStatus {
        *self.state.status.lock()
    }

    /// Whether the transaction is still in flight
    pub fn is_active(&self) -> bool {
        self.status() == TranStatus::Active
    }

    /// When the transaction began (diagnostics only)
    pub fn began_at(&self) -> DateTime<Utc> {
        self.state.began_at
    }

    /// Diagnostic sequence number assigned at begin time
    pub fn seq(&self) -> u64 {
        self.state.seq
    }

    /// Whether two handles refer to the same transaction
    pub fn same(&self, other: &Coordinator) -> bool {
        self.id == other.id
    }

    /// Transition this transaction out of `Active`
    ///
    /// Normally invoked through a transaction engine's `end`. Fails with
    /// [`TranError::AlreadyEnded`] if the transaction has already ended;
    /// a coordinator ends exactly once.
    pub fn mark_ended(&self, outcome: Outcome) -> Result<(), TranError> {
        let mut status = self.state.status.lock();
        if *status != TranStatus::Active {
            return Err(TranError::AlreadyEnded {
                id: self.id,
                status: *status,
            });
        }
        *status = outcome.final_status();
        Ok(())
    }
}

impl PartialEq for Coordinator {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Coordinator {}
