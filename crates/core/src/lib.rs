//! Core types for txspan
//!
//! This crate defines the fundamental types shared across the workspace:
//! - [`CoordinatorId`]: identity token for in-flight transactions
//! - [`Coordinator`]: cheap-to-clone handle to one transaction's state
//! - [`TranEngine`]: the contract between the context engine and the
//!   transaction engine
//! - Error taxonomies for lifecycle and frame-pairing violations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coordinator;
pub mod error;
pub mod traits;
pub mod types;

pub use coordinator::Coordinator;
pub use error::{ContextError, TranError};
pub use traits::{GlobalTranSource, TranEngine};
pub use types::{CoordinatorId, Outcome, TranKind, TranStatus};
