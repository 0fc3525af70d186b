//! Tests for termination conditions.

use std::time::Duration;

use super::*;
use tourforge_core::Tour;

fn scope_after(iterations: u64, improved_at: &[u64]) -> GraspScope {
    let mut scope = GraspScope::new();
    scope.start_solving();
    let mut length = 100.0;
    for iteration in 0..iterations {
        if iteration == 0 || improved_at.contains(&iteration) {
            length -= 1.0;
            scope.offer(Tour::identity(3), length, iteration);
        }
        scope.increment_iteration_count();
    }
    scope
}

#[test]
fn test_iteration_count_termination() {
    let term = IterationCountTermination::new(3);

    assert!(!term.is_terminated(&scope_after(0, &[])));
    assert!(!term.is_terminated(&scope_after(2, &[])));
    assert!(term.is_terminated(&scope_after(3, &[])));
    assert!(term.is_terminated(&scope_after(4, &[])));
}

#[test]
fn test_unimproved_termination() {
    let term = UnimprovedIterationCountTermination::new(2);

    assert!(!term.is_terminated(&scope_after(0, &[])));
    assert!(!term.is_terminated(&scope_after(1, &[])));
    assert!(!term.is_terminated(&scope_after(2, &[])));
    assert!(term.is_terminated(&scope_after(3, &[])));
    assert!(!term.is_terminated(&scope_after(3, &[2])));
    assert!(term.is_terminated(&scope_after(5, &[2])));
}

#[test]
fn test_time_termination() {
    let scope = scope_after(1, &[]);

    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&scope));
}

#[test]
fn test_time_termination_before_start() {
    let scope = GraspScope::new();
    assert!(!TimeTermination::new(Duration::ZERO).is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let scope = scope_after(3, &[]);

    let neither = OrTermination((
        IterationCountTermination::new(10),
        TimeTermination::seconds(3600),
    ));
    assert!(!neither.is_terminated(&scope));

    let one = OrTermination::new((
        IterationCountTermination::new(10),
        UnimprovedIterationCountTermination::new(2),
        TimeTermination::seconds(3600),
    ));
    assert!(one.is_terminated(&scope));
}

#[test]
fn test_optional_termination() {
    let scope = scope_after(5, &[]);

    let absent: Option<IterationCountTermination> = None;
    assert!(!absent.is_terminated(&scope));
    assert!(Some(IterationCountTermination::new(5)).is_terminated(&scope));
}

#[test]
fn test_boxed_termination() {
    let term: Box<dyn Termination> = Box::new(IterationCountTermination::new(1));
    assert!(term.is_terminated(&scope_after(1, &[])));
}
