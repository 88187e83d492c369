//! Task frames and frame handles
//!
//! One task frame per `start`/`stop` pairing: it remembers what was bound
//! to the thread when the task started and which substitute scope (if any)
//! was installed for the task's duration. Frames nest LIFO; the
//! [`FrameHandle`] returned by `start` is the token that validates correct
//! pairing with the matching `stop`.

use txspan_core::Coordinator;

/// Opaque handle pairing one `start` with its `stop`
///
/// Handles are `Copy` so a task execution host can thread them through
/// continuations freely; they carry no authority beyond pairing validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle {
    seq: u64,
}

impl FrameHandle {
    pub(crate) fn new(seq: u64) -> Self {
        FrameHandle { seq }
    }

    pub(crate) fn seq(self) -> u64 {
        self.seq
    }
}

impl std::fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame#{}", self.seq)
    }
}

/// Saved state for one open task frame
#[derive(Debug)]
pub(crate) struct TaskFrame {
    /// Frame identity; validates stop pairing
    pub(crate) seq: u64,
    /// What was bound to the thread when the task started
    pub(crate) saved: Option<Coordinator>,
    /// The substitute LOCAL scope installed for the task, if any
    pub(crate) installed: Option<Coordinator>,
}
