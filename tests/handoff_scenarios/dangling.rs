//! Dangling-Transaction Containment Scenarios
//!
//! A task that leaves a global transaction bound to the thread at completion
//! has that transaction rolled back during `stop`; the condition is reported
//! to the caller, and restoration of the pre-task state happens regardless.

use crate::new_context;
use std::sync::atomic::{AtomicBool, Ordering};
use txspan::prelude::*;

// ============================================================================
// Containment
// ============================================================================

#[test]
fn dangling_global_is_rolled_back_and_reported() {
    // slot=NONE -> begin G1 -> start -> slot=LOCAL1 -> roll back LOCAL1
    // -> begin G2 (left open) -> stop
    let mut cx = new_context();
    let g1 = cx.begin_global().unwrap();

    let frame = cx.start();
    let local1 = cx.current().unwrap();
    assert_eq!(local1.kind(), TranKind::Local);

    cx.rollback().unwrap(); // end LOCAL1
    let g2 = cx.begin_global().unwrap(); // new global, never ended

    let report = cx.stop(frame).unwrap();
    let dangling = report.dangling.expect("dangling condition reported");
    assert_eq!(dangling.coordinator, g2.id());
    assert!(dangling.rollback_failure.is_none());

    assert_eq!(g2.status(), TranStatus::RolledBack, "contained, not leaked");
    assert!(cx.current().unwrap().same(&g1), "restoration is unconditional");
    assert!(g1.is_active(), "the suspended global is unaffected");
}

#[test]
fn dangling_over_vacant_prestate() {
    let mut cx = new_context();

    let frame = cx.start();
    let g = cx.begin_global().unwrap();

    let report = cx.stop(frame).unwrap();
    assert_eq!(report.dangling.unwrap().coordinator, g.id());
    assert_eq!(g.status(), TranStatus::RolledBack);
    assert!(cx.current().is_none(), "vacant pre-state restored");
}

#[test]
fn ended_global_left_bound_is_still_reported() {
    // The task commits its global through the engine but never unbinds it.
    let mut cx = new_context();
    let g1 = cx.begin_global().unwrap();

    let frame = cx.start();
    cx.rollback().unwrap();
    let g2 = cx.begin_global().unwrap();
    cx.engine().end(&g2, Outcome::Commit).unwrap();

    let report = cx.stop(frame).unwrap();
    let dangling = report.dangling.expect("a bound global is reported either way");
    assert_eq!(dangling.coordinator, g2.id());
    assert!(
        matches!(dangling.rollback_failure, Some(TranError::AlreadyEnded { .. })),
        "best-effort rollback failure is reported, not thrown"
    );
    assert!(cx.current().unwrap().same(&g1));
}

// ============================================================================
// Engine failure during stop
// ============================================================================

/// Engine whose `end` can be made to fail, for exercising the contained
/// failure paths of `stop`.
struct FlakyEndEngine {
    inner: TranManager,
    fail_end: AtomicBool,
}

impl FlakyEndEngine {
    fn new() -> Self {
        FlakyEndEngine {
            inner: TranManager::new(),
            fail_end: AtomicBool::new(false),
        }
    }

    fn fail_next_ends(&self) {
        self.fail_end.store(true, Ordering::SeqCst);
    }
}

impl TranEngine for FlakyEndEngine {
    fn begin_local(&self) -> Coordinator {
        self.inner.begin_local()
    }

    fn end(&self, coordinator: &Coordinator, outcome: Outcome) -> Result<(), TranError> {
        if self.fail_end.load(Ordering::SeqCst) {
            return Err(TranError::EndFailed {
                id: coordinator.id(),
                reason: "injected end failure".to_string(),
            });
        }
        self.inner.end(coordinator, outcome)
    }
}

impl GlobalTranSource for FlakyEndEngine {
    fn begin_global(&self) -> Coordinator {
        self.inner.begin_global()
    }
}

#[test]
fn substitute_end_failure_does_not_block_restoration() {
    let mut cx = ThreadTranContext::new(FlakyEndEngine::new());
    let g = cx.begin_global().unwrap();

    let frame = cx.start();
    cx.engine().fail_next_ends();

    let report = cx.stop(frame).unwrap();
    assert!(
        matches!(report.substitute_failure, Some(TranError::EndFailed { .. })),
        "substitute cleanup failure is reported"
    );
    assert!(report.dangling.is_none());
    assert!(cx.current().unwrap().same(&g), "restoration still happened");
}

#[test]
fn dangling_rollback_failure_does_not_block_restoration() {
    let mut cx = ThreadTranContext::new(FlakyEndEngine::new());
    let g1 = cx.begin_global().unwrap();

    let frame = cx.start();
    cx.rollback().unwrap();
    let g2 = cx.begin_global().unwrap();
    cx.engine().fail_next_ends();

    let report = cx.stop(frame).unwrap();
    let dangling = report.dangling.expect("dangling still reported");
    assert_eq!(dangling.coordinator, g2.id());
    assert!(matches!(
        dangling.rollback_failure,
        Some(TranError::EndFailed { .. })
    ));
    assert!(g2.is_active(), "the failed rollback left g2 as the engine did");
    assert!(cx.current().unwrap().same(&g1), "restoration still happened");
}
