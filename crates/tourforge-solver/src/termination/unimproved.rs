//! Termination based on lack of improvement.

use super::Termination;
use crate::scope::GraspScope;

/// Terminates after `limit` consecutive iterations that did not replace the
/// incumbent.
///
/// # Example
///
/// ```
/// use tourforge_solver::termination::UnimprovedIterationCountTermination;
///
/// // Stop after 20 iterations without a shorter tour
/// let term = UnimprovedIterationCountTermination::new(20);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UnimprovedIterationCountTermination {
    limit: u64,
}

impl UnimprovedIterationCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for UnimprovedIterationCountTermination {
    fn is_terminated(&self, scope: &GraspScope) -> bool {
        scope.incumbent().is_some() && scope.iterations_since_improvement() >= self.limit
    }
}
