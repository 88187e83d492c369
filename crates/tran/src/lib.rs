//! Transaction lifecycle manager for txspan
//!
//! This crate implements the default [`TranEngine`]:
//! - TranManager: begins LOCAL and GLOBAL coordinators, ends them with a
//!   commit or rollback outcome
//! - Lifecycle-only semantics: no resource enlistment, no two-phase commit
//!
//! [`TranEngine`]: txspan_core::TranEngine

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod manager;

pub use manager::TranManager;
