//! Composite termination (OR).
//!
//! Uses macro-generated tuple implementations.

use super::Termination;
use crate::scope::GraspScope;

/// Combines terminations with OR logic: stops when any child stops.
///
/// # Examples
///
/// ```
/// use tourforge_solver::termination::{
///     OrTermination, TimeTermination, UnimprovedIterationCountTermination,
/// };
///
/// // Terminate after 30 seconds OR 10 iterations without improvement
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     UnimprovedIterationCountTermination::new(10),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &GraspScope) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
