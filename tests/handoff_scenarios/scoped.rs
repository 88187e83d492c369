//! Scoped Task Frame Scenarios
//!
//! The Task Execution Host obligation: `stop` must run on every exit path.
//! `TaskScope` makes that structural; these scenarios exercise the paths a
//! `try`/`finally` would cover in other runtimes: normal return, early
//! return, and panic.

use crate::new_context;
use std::panic::{catch_unwind, AssertUnwindSafe};
use txspan::prelude::*;

#[test]
fn scope_restores_on_normal_exit() {
    let mut cx = new_context();
    let g = cx.begin_global().unwrap();

    {
        let scope = cx.task_scope();
        assert!(!scope.current().unwrap().same(&g));
    }

    assert!(cx.current().unwrap().same(&g));
    assert_eq!(cx.depth(), 0);
}

#[test]
fn scope_restores_across_panic() {
    let mut cx = new_context();
    let g = cx.begin_global().unwrap();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let mut scope = cx.task_scope();
        scope.rollback().unwrap();
        scope.begin_global().unwrap(); // left open at panic time
        panic!("task body failed");
    }));
    assert!(result.is_err());

    // The unwind closed the frame: the dangling global was contained and
    // the caller's transaction rebound.
    assert_eq!(cx.depth(), 0);
    assert!(cx.current().unwrap().same(&g));
    assert!(g.is_active());
}

#[test]
fn scope_restores_on_early_return() {
    fn task(cx: &mut ThreadTranContext<TranManager>, bail: bool) -> Result<(), TranError> {
        let _scope = cx.task_scope();
        if bail {
            return Err(TranError::NotBound); // early exit path
        }
        Ok(())
    }

    let mut cx = new_context();
    let local = cx.begin_local().unwrap();

    assert!(task(&mut cx, true).is_err());
    assert!(cx.current().unwrap().same(&local), "restored on the error path");
    assert_eq!(cx.depth(), 0);
}

#[test]
fn finish_surfaces_the_report() {
    let mut cx = new_context();
    cx.begin_global().unwrap();

    let mut scope = cx.task_scope();
    scope.rollback().unwrap();
    let g2 = scope.begin_global().unwrap();

    let report = scope.finish().unwrap();
    assert_eq!(report.dangling.unwrap().coordinator, g2.id());
    assert_eq!(g2.status(), TranStatus::RolledBack);
}
