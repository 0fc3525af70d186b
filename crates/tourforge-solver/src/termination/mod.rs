//! Termination conditions for a GRASP run.
//!
//! `max_iterations` is always the hard bound; these conditions can only stop
//! a run earlier. They are checked before each iteration after the first.

mod composite;
mod iteration_count;
mod time;
mod unimproved;

use std::fmt::Debug;

use crate::scope::GraspScope;

pub use composite::OrTermination;
pub use iteration_count::IterationCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedIterationCountTermination;

/// Trait for determining when to stop iterating.
pub trait Termination: Send + Debug {
    /// Returns true if no further iteration should start.
    fn is_terminated(&self, scope: &GraspScope) -> bool;
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn is_terminated(&self, scope: &GraspScope) -> bool {
        (**self).is_terminated(scope)
    }
}

/// An absent condition never terminates.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &GraspScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }
}

#[cfg(test)]
mod tests;
