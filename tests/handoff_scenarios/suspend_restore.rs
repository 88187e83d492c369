//! Suspend/Substitute/Restore Scenarios
//!
//! A caller's global transaction is suspended for the task's duration,
//! replaced with a private local substitute, and rebound afterwards,
//! unaffected by anything the task did.

use crate::new_context;
use txspan::prelude::*;

// ============================================================================
// No-op handoffs
// ============================================================================

#[test]
fn vacant_slot_restores_to_vacant() {
    let mut cx = new_context();
    assert!(cx.current().is_none());

    let frame = cx.start();
    assert!(cx.current().is_none(), "no substitution over a vacant slot");

    let report = cx.stop(frame).unwrap();
    assert!(report.is_clean());
    assert!(cx.current().is_none());

    // The engine's diagnostic sequence starts at 1; a no-op handoff must
    // not have consumed any of it.
    let probe = cx.engine().begin_local();
    assert_eq!(probe.seq(), 1, "no coordinator was created during the handoff");
}

#[test]
fn local_prestate_is_left_in_place() {
    let mut cx = new_context();
    let local = cx.begin_local().unwrap();

    let frame = cx.start();
    assert!(
        cx.current().unwrap().same(&local),
        "an existing local scope is safe to nest"
    );

    let report = cx.stop(frame).unwrap();
    assert!(report.is_clean());
    assert!(cx.current().unwrap().same(&local));
    assert!(local.is_active(), "the caller's local scope is untouched");
}

// ============================================================================
// Global suspension
// ============================================================================

#[test]
fn global_is_suspended_and_restored() {
    let mut cx = new_context();
    let g = cx.begin_global().unwrap();

    let frame = cx.start();
    let substitute = cx.current().expect("substitute installed");
    assert_eq!(substitute.kind(), TranKind::Local);
    assert!(!substitute.same(&g), "the task never sees the caller's transaction");
    assert!(g.is_active(), "suspension does not end the global");

    // Task ends its substitute normally.
    cx.rollback().unwrap();
    assert!(cx.current().is_none());

    let report = cx.stop(frame).unwrap();
    assert!(report.is_clean());

    let restored = cx.current().expect("global rebound");
    assert!(restored.same(&g), "identity equality, not just kind");
    assert!(g.is_active(), "the substitution neither committed nor rolled back g");
}

#[test]
fn suspended_global_survives_substitute_left_bound() {
    let mut cx = new_context();
    let g = cx.begin_global().unwrap();

    let frame = cx.start();
    let substitute = cx.current().unwrap();
    // Task returns without ending its substitute.
    let report = cx.stop(frame).unwrap();

    assert!(report.is_clean());
    assert_eq!(substitute.status(), TranStatus::RolledBack, "throwaway scope");
    assert!(cx.current().unwrap().same(&g));
    assert!(g.is_active());
}

// ============================================================================
// Literal end-to-end scenario
// ============================================================================

#[test]
fn full_lifecycle_scenario() {
    // slot=NONE -> begin G -> slot=G -> start -> slot=LOCAL1 (!=G)
    // -> end LOCAL1 via rollback -> stop -> slot=G -> commit G -> slot=NONE
    let mut cx = new_context();
    assert!(cx.current().is_none());

    let g = cx.begin_global().unwrap();
    assert!(cx.current().unwrap().same(&g));

    let frame = cx.start();
    let local1 = cx.current().expect("LOCAL1 installed");
    assert_eq!(local1.kind(), TranKind::Local);
    assert!(!local1.same(&g));

    cx.rollback().unwrap();
    assert_eq!(local1.status(), TranStatus::RolledBack);

    let report = cx.stop(frame).unwrap();
    assert!(report.is_clean());
    assert!(cx.current().unwrap().same(&g));

    cx.commit().unwrap();
    assert!(cx.current().is_none());
    assert_eq!(g.status(), TranStatus::Committed);
}
