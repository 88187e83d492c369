//! Scoped task frames with guaranteed release
//!
//! Every `start` must be paired with a `stop` on every exit path, including
//! panics and early returns; a frame left open permanently leaves the thread
//! in a substituted state. [`TaskScope`] makes the pairing structural: the
//! guard opens the frame on construction and closes it on drop.

use crate::context::ThreadTranContext;
use crate::frame::FrameHandle;
use crate::report::StopReport;
use std::ops::{Deref, DerefMut};
use txspan_core::{ContextError, TranEngine};

/// RAII guard for one task frame
///
/// Created by [`ThreadTranContext::task_scope`]. Dereferences to the
/// underlying context so the task body can use it directly. Call
/// [`finish`](TaskScope::finish) to close the frame and receive the
/// [`StopReport`]; if the guard is dropped instead (early return, panic,
/// cancellation), the frame is closed anyway and any contained conditions
/// are logged.
///
/// # Example
///
/// ```
/// use txspan_context::ThreadTranContext;
/// use txspan_tran::TranManager;
///
/// let mut cx = ThreadTranContext::new(TranManager::new());
/// let g = cx.begin_global().unwrap();
///
/// {
///     let scope = cx.task_scope();
///     // task body: runs under a private local substitute
///     assert!(!scope.current().unwrap().same(&g));
/// } // frame closed here, g restored
///
/// assert!(cx.current().unwrap().same(&g));
/// ```
pub struct TaskScope<'a, E: TranEngine> {
    cx: &'a mut ThreadTranContext<E>,
    handle: FrameHandle,
    closed: bool,
}

impl<E: TranEngine> ThreadTranContext<E> {
    /// Open a task frame that is guaranteed to close
    pub fn task_scope(&mut self) -> TaskScope<'_, E> {
        let handle = self.start();
        TaskScope {
            cx: self,
            handle,
            closed: false,
        }
    }
}

impl<E: TranEngine> TaskScope<'_, E> {
    /// The handle of the frame this scope owns
    pub fn handle(&self) -> FrameHandle {
        self.handle
    }

    /// Close the frame and return what `stop` observed
    pub fn finish(mut self) -> Result<StopReport, ContextError> {
        self.closed = true;
        self.cx.stop(self.handle)
    }
}

impl<E: TranEngine> Deref for TaskScope<'_, E> {
    type Target = ThreadTranContext<E>;

    fn deref(&self) -> &Self::Target {
        self.cx
    }
}

impl<E: TranEngine> DerefMut for TaskScope<'_, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cx
    }
}

impl<E: TranEngine> Drop for TaskScope<'_, E> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        match self.cx.stop(self.handle) {
            Ok(report) if !report.is_clean() => {
                tracing::warn!(
                    dangling = ?report.dangling.as_ref().map(|d| d.coordinator),
                    "task scope closed on drop with contained conditions"
                );
            }
            Ok(_) => {}
            Err(e) => {
                // Unreachable while the guard holds the context borrow;
                // surfaced rather than swallowed if it ever happens.
                tracing::error!(error = %e, "task scope failed to close its frame");
            }
        }
    }
}
