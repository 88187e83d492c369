//! # txspan
//!
//! Transaction context propagation for task handoffs.
//!
//! When a unit of work is handed from the thread that owns a transaction to
//! another execution context and later handed back, txspan captures the
//! in-flight transaction, suspends it, runs the task under a private local
//! scope, contains anything the task left dangling, and restores the
//! original transaction exactly once, no matter what the task did.
//!
//! ## Quick Start
//!
//! ```
//! use txspan::prelude::*;
//!
//! // One context per worker thread
//! let mut cx = txspan::thread_context();
//!
//! // The caller's global transaction
//! let g = cx.begin_global()?;
//!
//! // Hand a task off: it runs under a private substitute scope
//! {
//!     let scope = cx.task_scope();
//!     assert!(!scope.current().unwrap().same(&g));
//! } // scope closed: substitute ended, g restored
//!
//! assert!(cx.current().unwrap().same(&g));
//! cx.commit()?;
//! # Ok::<(), txspan::TranError>(())
//! ```
//!
//! ## Guarantees
//!
//! - `start`/`stop` pairs nest strictly (LIFO); mispaired stops are rejected
//! - A suspended global transaction is never exposed to the task
//! - A global transaction the task leaves bound is rolled back and reported
//! - Restoration of the pre-task state is the last action of every `stop`

#![warn(missing_docs)]

pub mod prelude;

// Re-export the context engine surface
pub use txspan_context::{
    ContextConfig, DanglingReport, FrameHandle, StopReport, TaskScope, ThreadTranContext, TranSlot,
};

// Re-export the transaction engine
pub use txspan_tran::TranManager;

// Re-export core types
pub use txspan_core::{
    ContextError, Coordinator, CoordinatorId, GlobalTranSource, Outcome, TranEngine, TranError,
    TranKind, TranStatus,
};

/// Create a per-thread context backed by the default transaction manager
pub fn thread_context() -> ThreadTranContext<TranManager> {
    ThreadTranContext::new(TranManager::new())
}
