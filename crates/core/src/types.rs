//! Fundamental types for transaction identity and lifecycle
//!
//! This module defines the types used throughout the system:
//! - [`CoordinatorId`]: Unique identity token for one in-flight transaction
//! - [`TranKind`]: Local vs. global transaction scope
//! - [`TranStatus`]: Lifecycle state of a coordinator
//! - [`Outcome`]: How a transaction scope is ended

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identity token for one in-flight transaction
///
/// CoordinatorId is opaque: it is used only for equality ("is this the same
/// transaction?") and diagnostics. It is never inspected structurally.
///
/// # Examples
///
/// ```
/// use txspan_core::types::CoordinatorId;
///
/// let id1 = CoordinatorId::new();
/// let id2 = CoordinatorId::new();
/// assert_ne!(id1, id2); // Each CoordinatorId is unique
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordinatorId(Uuid);

impl CoordinatorId {
    /// Create a new random CoordinatorId using UUID v4
    pub fn new() -> Self {
        CoordinatorId(Uuid::new_v4())
    }

    /// Create a CoordinatorId from raw bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        CoordinatorId(Uuid::from_bytes(bytes))
    }

    /// Get raw bytes representation
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for CoordinatorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CoordinatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The scope of a transaction coordinator
///
/// A GLOBAL coordinator represents a distributed unit of work owned by the
/// caller; a LOCAL coordinator is a lightweight, non-distributed scope used
/// as a private substitute while a task runs. Absence of a coordinator is
/// modeled as `Option::None` at the registry slot, not as a third kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TranKind {
    /// Lightweight, non-distributed transaction scope
    Local,
    /// Distributed, two-phase-commit-capable unit of work
    Global,
}

impl std::fmt::Display for TranKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranKind::Local => write!(f, "local"),
            TranKind::Global => write!(f, "global"),
        }
    }
}

/// Lifecycle state of a coordinator
///
/// Transitions: `Active` → `Committed` or `Active` → `RolledBack`, exactly
/// once. Ended coordinators never return to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranStatus {
    /// The transaction is in flight
    Active,
    /// The transaction ended with a commit outcome
    Committed,
    /// The transaction ended with a rollback outcome
    RolledBack,
}

impl std::fmt::Display for TranStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranStatus::Active => write!(f, "active"),
            TranStatus::Committed => write!(f, "committed"),
            TranStatus::RolledBack => write!(f, "rolled back"),
        }
    }
}

/// How a transaction scope is ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Make the transaction's work permanent
    Commit,
    /// Discard the transaction's work
    Rollback,
}

impl Outcome {
    /// The status a coordinator ends in for this outcome
    pub fn final_status(self) -> TranStatus {
        match self {
            Outcome::Commit => TranStatus::Committed,
            Outcome::Rollback => TranStatus::RolledBack,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Commit => write!(f, "commit"),
            Outcome::Rollback => write!(f, "rollback"),
        }
    }
}
