//! Context propagation engine for txspan
//!
//! This crate implements the per-thread bookkeeping that makes transaction
//! boundaries safe across task handoffs:
//! - TranSlot: single-slot register holding the thread's current coordinator
//! - ThreadTranContext: `start`/`stop` task-boundary lifecycle with frame
//!   nesting, substitution, and dangling-transaction resolution
//! - TaskScope: RAII guard guaranteeing `stop` on every exit path
//!
//! The central guarantee: whatever a task does to the transaction state of
//! the thread it runs on, the coordinator that was bound before `start` is
//! bound again after `stop`, unconditionally.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod frame;
pub mod report;
pub mod scope;
pub mod slot;

pub use context::{ContextConfig, ThreadTranContext};
pub use frame::FrameHandle;
pub use report::{DanglingReport, StopReport};
pub use scope::TaskScope;
pub use slot::TranSlot;
