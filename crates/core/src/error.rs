//! Error types for transaction lifecycle and frame pairing
//!
//! Two taxonomies live here:
//! - [`TranError`]: lifecycle misuse at the transaction-engine boundary
//! - [`ContextError`]: frame-pairing violations in the context engine
//!   (programmer errors in the task execution host)
//!
//! Dangling-transaction and substitute-cleanup conditions are *not* errors:
//! they are contained during `stop` and reported through `StopReport`.

use crate::types::{CoordinatorId, TranStatus};
use thiserror::Error;

/// Errors from transaction lifecycle operations
#[derive(Debug, Error)]
pub enum TranError {
    /// `end` was called on a coordinator that has already ended
    #[error("transaction {id} already ended: {status}")]
    AlreadyEnded {
        /// The transaction that was already ended
        id: CoordinatorId,
        /// The status it ended in
        status: TranStatus,
    },

    /// `begin` was requested while a coordinator is bound to this context
    #[error("a transaction is already bound to this execution context: {id}")]
    AlreadyBound {
        /// The coordinator currently occupying the slot
        id: CoordinatorId,
    },

    /// `commit`/`rollback` was requested with no coordinator bound
    #[error("no transaction is bound to this execution context")]
    NotBound,

    /// The engine could not end a transaction (e.g. its log write failed)
    #[error("transaction {id} could not be ended: {reason}")]
    EndFailed {
        /// The transaction that could not be ended
        id: CoordinatorId,
        /// Engine-specific failure description
        reason: String,
    },
}

/// Frame-pairing violations in `start`/`stop`
///
/// These indicate a structural bug in the task execution host: every
/// successful `start` must be paired with exactly one `stop`, in reverse
/// creation order, on the same context. The context is left unchanged when
/// one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    /// `stop` was called with no open task frame
    #[error("stop called with no open task frame")]
    NoOpenFrame,

    /// `stop` was called with a handle that is not the innermost open frame
    #[error("stop called out of order: frame {handle} given, frame {innermost} is innermost")]
    OutOfOrderStop {
        /// The frame the caller tried to stop
        handle: u64,
        /// The frame that must be stopped first
        innermost: u64,
    },
}
