//! The task-boundary context engine
//!
//! [`ThreadTranContext`] owns one thread's registry slot and frame stack and
//! provides the `start`/`stop` lifecycle:
//!
//! ```text
//! start: snapshot the slot
//!        suspend a global coordinator (substitute a fresh local scope)
//!        push a frame
//! ...task body runs...
//! stop:  pop the frame (pairing validated)
//!        roll back any global transaction the task left bound
//!        end the installed substitute if still active
//!        restore the snapshot -- unconditionally
//! ```
//!
//! Restoration is the last action of `stop` and happens no matter what the
//! task did; everything else `stop` detects is contained and reported.

use crate::frame::{FrameHandle, TaskFrame};
use crate::report::{DanglingReport, StopReport};
use crate::slot::TranSlot;
use txspan_core::{
    ContextError, Coordinator, GlobalTranSource, Outcome, TranEngine, TranError, TranKind,
};

/// Construction-time policy for the context engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextConfig {
    /// Substitute a fresh local scope for every task, not only when a
    /// global transaction is bound
    ///
    /// With the default (`false`), a task starting over a vacant slot or an
    /// existing local scope runs in place; a local scope is already safe to
    /// nest or absent entirely. With `true`, every task gets its own private
    /// substitute.
    pub always_substitute: bool,
}

/// Per-thread transaction context with task-boundary propagation
///
/// One instance per worker thread (or per logical execution context when
/// continuations migrate across threads). Not `Sync`, never shared: all
/// concurrency correctness at this layer is thread confinement.
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
/// let frame = cx.start();              // g suspended, local substitute in
/// assert!(!cx.current().unwrap().same(&g));
/// let report = cx.stop(frame).unwrap(); // substitute ended, g restored
///
/// assert!(report.is_clean());
/// assert!(cx.current().unwrap().same(&g));
/// ```
pub struct ThreadTranContext<E: TranEngine> {
    slot: TranSlot,
    frames: Vec<TaskFrame>,
    next_seq: u64,
    engine: E,
    config: ContextConfig,
}

impl<E: TranEngine> ThreadTranContext<E> {
    /// Create a context with the default substitution policy
    pub fn new(engine: E) -> Self {
        Self::with_config(engine, ContextConfig::default())
    }

    /// Create a context with an explicit substitution policy
    pub fn with_config(engine: E, config: ContextConfig) -> Self {
        ThreadTranContext {
            slot: TranSlot::new(),
            frames: Vec::new(),
            next_seq: 1,
            engine,
            config,
        }
    }

    /// The coordinator currently bound to this context, if any
    ///
    /// Read-only introspection; never mutates state.
    pub fn current(&self) -> Option<Coordinator> {
        self.slot.get().cloned()
    }

    /// The registry slot
    pub fn slot(&self) -> &TranSlot {
        &self.slot
    }

    /// Mutable access to the registry slot
    ///
    /// The transaction engine is the only intended external writer; task
    /// bodies go through [`begin_local`](Self::begin_local) /
    /// [`begin_global`](Self::begin_global) instead.
    pub fn slot_mut(&mut self) -> &mut TranSlot {
        &mut self.slot
    }

    /// The transaction engine behind this context
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of open task frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Open a task frame: snapshot the slot and substitute if required
    ///
    /// A GLOBAL coordinator bound to the thread is suspended: detached from
    /// the slot (not ended) and remembered in the frame, with a fresh LOCAL
    /// scope installed in its place so the task cannot silently participate
    /// in the caller's transaction. A vacant slot or a LOCAL coordinator is
    /// left in place unless [`ContextConfig::always_substitute`] is set.
    ///
    /// Total: always succeeds, always returns the handle for the matching
    /// [`stop`](Self::stop).
    pub fn start(&mut self) -> FrameHandle {
        let seq = self.next_seq;
        self.next_seq += 1;

        let suspend = self.config.always_substitute
            || matches!(self.slot.get().map(Coordinator::kind), Some(TranKind::Global));

        let (saved, installed) = if suspend {
            let saved = self.slot.take();
            let local = self.engine.begin_local();
            self.slot.set(Some(local.clone()));
            (saved, Some(local))
        } else {
            // No substitution needed; the snapshot remembers what to put back.
            (self.slot.get().cloned(), None)
        };

        tracing::debug!(
            frame = seq,
            suspended = ?saved.as_ref().map(Coordinator::id),
            substitute = ?installed.as_ref().map(Coordinator::id),
            "task frame opened"
        );

        self.frames.push(TaskFrame {
            seq,
            saved,
            installed,
        });
        FrameHandle::new(seq)
    }

    /// Close a task frame: contain what the task left, restore the snapshot
    ///
    /// Restoration of the saved coordinator is unconditional and is the last
    /// action before returning. A global transaction the task left bound is
    /// rolled back best-effort; the installed substitute is ended if still
    /// active. Both conditions come back in the [`StopReport`] rather than
    /// as errors.
    ///
    /// # Errors
    ///
    /// [`ContextError::NoOpenFrame`] when no frame is open, and
    /// [`ContextError::OutOfOrderStop`] when `handle` does not name the
    /// innermost open frame. Both indicate a structural bug in the task
    /// execution host; the context is left unchanged.
    pub fn stop(&mut self, handle: FrameHandle) -> Result<StopReport, ContextError> {
        let frame = match self.frames.pop() {
            None => return Err(ContextError::NoOpenFrame),
            Some(frame) if frame.seq != handle.seq() => {
                let innermost = frame.seq;
                self.frames.push(frame);
                return Err(ContextError::OutOfOrderStop {
                    handle: handle.seq(),
                    innermost,
                });
            }
            Some(frame) => frame,
        };

        let mut report = StopReport::default();

        // What the task left behind. Taking it unbinds it either way; only a
        // global is forcibly ended here.
        if let Some(left) = self.slot.take() {
            if left.kind() == TranKind::Global {
                report.dangling = Some(self.resolve_dangling(&left));
            }
        }

        // The substitute was a throwaway scope, never a unit of work the
        // caller asked to commit. End it if the task did not.
        if let Some(installed) = &frame.installed {
            if installed.is_active() {
                if let Err(e) = self.engine.end(installed, Outcome::Rollback) {
                    tracing::error!(
                        coordinator = %installed.id(),
                        error = %e,
                        "failed to end substitute scope"
                    );
                    report.substitute_failure = Some(e);
                }
            }
        }

        // Unconditional restoration: the thread's transactional state is
        // never left corrupted by a misbehaving task.
        tracing::debug!(
            frame = frame.seq,
            restored = ?frame.saved.as_ref().map(Coordinator::id),
            clean = report.is_clean(),
            "task frame closed"
        );
        self.slot.set(frame.saved);

        Ok(report)
    }

    fn resolve_dangling(&self, left: &Coordinator) -> DanglingReport {
        tracing::warn!(
            coordinator = %left.id(),
            began_at = %left.began_at(),
            "task left a global transaction bound; rolling back"
        );
        let rollback_failure = self.engine.end(left, Outcome::Rollback).err();
        if let Some(e) = &rollback_failure {
            tracing::error!(
                coordinator = %left.id(),
                error = %e,
                "rollback of dangling global transaction failed"
            );
        }
        DanglingReport {
            coordinator: left.id(),
            rollback_failure,
        }
    }

    /// Bind an externally begun coordinator to this context
    ///
    /// The door through which a transaction engine associates a transaction
    /// with the thread. Fails with [`TranError::AlreadyBound`] when a
    /// coordinator is already bound.
    pub fn bind(&mut self, coordinator: Coordinator) -> Result<(), TranError> {
        if let Some(current) = self.slot.get() {
            return Err(TranError::AlreadyBound { id: current.id() });
        }
        self.slot.set(Some(coordinator));
        Ok(())
    }

    /// Begin a LOCAL transaction and bind it to this context
    pub fn begin_local(&mut self) -> Result<Coordinator, TranError> {
        if let Some(current) = self.slot.get() {
            return Err(TranError::AlreadyBound { id: current.id() });
        }
        let local = self.engine.begin_local();
        self.slot.set(Some(local.clone()));
        Ok(local)
    }

    /// End the bound transaction with a commit outcome and vacate the slot
    pub fn commit(&mut self) -> Result<(), TranError> {
        self.end_current(Outcome::Commit)
    }

    /// End the bound transaction with a rollback outcome and vacate the slot
    pub fn rollback(&mut self) -> Result<(), TranError> {
        self.end_current(Outcome::Rollback)
    }

    fn end_current(&mut self, outcome: Outcome) -> Result<(), TranError> {
        let current = self.slot.take().ok_or(TranError::NotBound)?;
        self.engine.end(&current, outcome)
    }
}

impl<E: TranEngine + GlobalTranSource> ThreadTranContext<E> {
    /// Begin a GLOBAL transaction and bind it to this context
    ///
    /// The context engine itself never creates globals; this is for task
    /// execution hosts driving global scopes through the same engine.
    pub fn begin_global(&mut self) -> Result<Coordinator, TranError> {
        if let Some(current) = self.slot.get() {
            return Err(TranError::AlreadyBound { id: current.id() });
        }
        let global = self.engine.begin_global();
        self.slot.set(Some(global.clone()));
        Ok(global)
    }
}

impl<E: TranEngine + std::fmt::Debug> std::fmt::Debug for ThreadTranContext<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadTranContext")
            .field("slot", &self.slot)
            .field("depth", &self.frames.len())
            .field("engine", &self.engine)
            .field("config", &self.config)
            .finish()
    }
}
