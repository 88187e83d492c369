//! Stop reports
//!
//! `stop` never fails because of what the task did; conditions it detected
//! and contained come back in a [`StopReport`] so the task execution host
//! can surface them for diagnostics or audit.

use txspan_core::{CoordinatorId, TranError};

/// What `stop` observed and contained
///
/// A report with no entries means the task was well-behaved: it left the
/// substitute scope (or the untouched original state) exactly as `start`
/// arranged it.
#[derive(Debug, Default)]
pub struct StopReport {
    /// A global transaction the task left bound to the thread, rolled back
    /// during stop
    pub dangling: Option<DanglingReport>,

    /// Ending the installed substitute scope failed; restoration proceeded
    /// regardless
    pub substitute_failure: Option<TranError>,
}

impl StopReport {
    /// Whether the task left nothing behind that needed containment
    pub fn is_clean(&self) -> bool {
        self.dangling.is_none() && self.substitute_failure.is_none()
    }
}

/// A dangling global transaction detected at task completion
#[derive(Debug)]
pub struct DanglingReport {
    /// The transaction the task left bound
    pub coordinator: CoordinatorId,

    /// Set when the best-effort rollback itself failed
    pub rollback_failure: Option<TranError>,
}
