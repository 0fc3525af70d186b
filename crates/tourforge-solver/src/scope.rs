//! Iteration-level state of one GRASP run.

use std::time::{Duration, Instant};

use tourforge_core::Tour;

use crate::statistics::{GraspStatistics, TourImprovement};

/// Best tour found so far and its length.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    pub tour: Tour,
    pub length: f64,
}

/// State owned by the driver for the duration of one run.
///
/// The incumbent is only ever replaced through [`GraspScope::offer`].
#[derive(Debug, Default)]
pub struct GraspScope {
    start_time: Option<Instant>,
    iteration_count: u64,
    last_improvement_iteration: Option<u64>,
    incumbent: Option<Incumbent>,
    statistics: GraspStatistics,
}

impl GraspScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.iteration_count = 0;
        self.last_improvement_iteration = None;
        self.incumbent = None;
        self.statistics = GraspStatistics::new();
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    /// Number of completed iterations.
    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    pub fn increment_iteration_count(&mut self) {
        self.iteration_count += 1;
    }

    /// Completed iterations since the one that last replaced the incumbent.
    pub fn iterations_since_improvement(&self) -> u64 {
        match self.last_improvement_iteration {
            Some(iteration) => self.iteration_count.saturating_sub(iteration + 1),
            None => self.iteration_count,
        }
    }

    pub fn incumbent(&self) -> Option<&Incumbent> {
        self.incumbent.as_ref()
    }

    pub fn best_length(&self) -> Option<f64> {
        self.incumbent.as_ref().map(|i| i.length)
    }

    /// Offers a refined tour from `iteration`.
    ///
    /// The tour becomes the incumbent if there is none yet or it is strictly
    /// shorter. Returns true if it was taken.
    pub fn offer(&mut self, tour: Tour, length: f64, iteration: u64) -> bool {
        let is_better = match &self.incumbent {
            None => true,
            Some(best) => length < best.length,
        };
        if !is_better {
            return false;
        }

        self.incumbent = Some(Incumbent { tour, length });
        self.last_improvement_iteration = Some(iteration);
        let time_offset = self.elapsed().unwrap_or_default();
        self.statistics.record_improvement(TourImprovement {
            time_offset,
            iteration,
            length,
        });
        true
    }

    pub fn statistics(&self) -> &GraspStatistics {
        &self.statistics
    }

    pub fn statistics_mut(&mut self) -> &mut GraspStatistics {
        &mut self.statistics
    }

    /// Consumes the scope, returning the incumbent and the final statistics.
    pub fn into_parts(mut self) -> (Option<Incumbent>, GraspStatistics) {
        self.statistics.total_duration = self.elapsed().unwrap_or_default();
        (self.incumbent, self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_offer_always_taken() {
        let mut scope = GraspScope::new();
        scope.start_solving();

        assert!(scope.offer(Tour::identity(3), 50.0, 0));
        assert_eq!(scope.best_length(), Some(50.0));
        assert_eq!(scope.statistics().improvement_count(), 1);
    }

    #[test]
    fn test_only_strictly_shorter_replaces() {
        let mut scope = GraspScope::new();
        scope.start_solving();
        scope.offer(Tour::identity(3), 10.0, 0);

        assert!(!scope.offer(Tour::from_order_unchecked(vec![0, 2, 1]), 10.0, 1));
        assert!(!scope.offer(Tour::from_order_unchecked(vec![0, 2, 1]), 11.0, 2));
        assert_eq!(scope.incumbent().unwrap().tour, Tour::identity(3));

        assert!(scope.offer(Tour::from_order_unchecked(vec![0, 2, 1]), 9.5, 3));
        assert_eq!(scope.incumbent().unwrap().tour.order(), &[0, 2, 1]);
        assert_eq!(scope.statistics().improvement_count(), 2);
    }

    #[test]
    fn test_iterations_since_improvement() {
        let mut scope = GraspScope::new();
        scope.start_solving();
        assert_eq!(scope.iterations_since_improvement(), 0);

        scope.offer(Tour::identity(2), 4.0, 0);
        scope.increment_iteration_count();
        assert_eq!(scope.iterations_since_improvement(), 0);

        scope.increment_iteration_count();
        scope.increment_iteration_count();
        assert_eq!(scope.iterations_since_improvement(), 2);

        scope.offer(Tour::identity(2), 3.0, 3);
        scope.increment_iteration_count();
        assert_eq!(scope.iterations_since_improvement(), 0);
    }

    #[test]
    fn test_start_solving_resets() {
        let mut scope = GraspScope::new();
        scope.start_solving();
        scope.offer(Tour::identity(2), 4.0, 0);
        scope.increment_iteration_count();

        scope.start_solving();
        assert_eq!(scope.iteration_count(), 0);
        assert!(scope.incumbent().is_none());
        assert!(scope.elapsed().is_some());
    }

    #[test]
    fn test_into_parts_sets_duration() {
        let mut scope = GraspScope::new();
        scope.start_solving();
        scope.offer(Tour::identity(2), 4.0, 0);

        let (incumbent, stats) = scope.into_parts();
        assert_eq!(incumbent.map(|i| i.length), Some(4.0));
        assert_eq!(stats.improvement_history.len(), 1);
    }
}
