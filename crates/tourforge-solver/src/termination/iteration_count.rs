//! Iteration count termination.

use super::Termination;
use crate::scope::GraspScope;

/// Terminates once `limit` iterations have completed.
///
/// The solver's `max_iterations` stays the hard bound. This condition is
/// meant for [`OrTermination`](super::OrTermination), capping a run next to
/// a time or stagnation limit.
///
/// # Example
///
/// ```
/// use tourforge_solver::termination::{
///     IterationCountTermination, OrTermination, TimeTermination,
/// };
///
/// let term = OrTermination((
///     IterationCountTermination::new(50),
///     TimeTermination::seconds(30),
/// ));
/// assert_eq!(term.0 .0.limit(), 50);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IterationCountTermination {
    limit: u64,
}

impl IterationCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Termination for IterationCountTermination {
    fn is_terminated(&self, scope: &GraspScope) -> bool {
        scope.iteration_count() >= self.limit
    }
}
