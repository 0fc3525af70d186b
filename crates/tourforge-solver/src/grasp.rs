//! The GRASP driver.
//!
//! Each iteration builds a nearest-neighbor tour from a selected start city,
//! refines it with 2-opt and offers it to the incumbent. Listeners hear
//! about the incumbent after every iteration.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand_chacha::ChaCha8Rng;
use tourforge_config::DistanceCalculation;
use tourforge_core::{
    City, CityId, CityRegistry, DistanceMatrix, DistanceMeter, Result, Tour, TourForgeError,
};
use tracing::{debug, info};

use crate::construction::{NearestNeighborConstructor, RandomStartSelector, StartCitySelector};
use crate::event::{GraspEventListener, GraspEventSupport};
use crate::localsearch::TwoOptLocalSearch;
use crate::scope::GraspScope;
use crate::statistics::{GraspStatistics, IterationRecord};
use crate::termination::Termination;

/// Lifecycle of a [`GraspSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Not yet run, or the last run failed.
    Idle,
    Iterating,
    /// A run finished and its result was returned.
    Done,
}

/// Best tour of a run.
#[derive(Debug, Clone)]
pub struct GraspResult {
    pub best_tour: Tour,
    pub best_length: f64,
    /// Iterations completed.
    pub iterations: u64,
    /// True if a termination condition stopped the run before
    /// `max_iterations`.
    pub terminated_early: bool,
    pub statistics: GraspStatistics,
}

impl GraspResult {
    /// Cities of the best tour in visiting order.
    pub fn best_cities<'a>(&self, cities: &'a CityRegistry) -> Vec<&'a City> {
        self.best_tour.order().iter().map(|&i| &cities[i]).collect()
    }

    /// Ids of the best tour's cities in visiting order.
    pub fn best_city_ids(&self, cities: &CityRegistry) -> Vec<CityId> {
        self.best_tour.city_ids(cities)
    }
}

/// GRASP solver for Euclidean TSP instances.
///
/// # Example
///
/// ```
/// use tourforge_core::CityRegistry;
/// use tourforge_solver::GraspSolver;
///
/// let cities = CityRegistry::from_points([(0.0, 0.0), (5.0, 1.0), (2.0, 7.0), (3.0, 4.0)]);
/// let mut solver = GraspSolver::with_seed(5, 42);
///
/// let result = solver.solve(&cities).unwrap();
/// assert_eq!(result.best_tour.len(), 4);
/// assert_eq!(result.iterations, 5);
/// ```
#[derive(Debug)]
pub struct GraspSolver<Sel = Box<dyn StartCitySelector>> {
    max_iterations: u64,
    selector: Sel,
    constructor: NearestNeighborConstructor,
    local_search: TwoOptLocalSearch,
    distance_calculation: DistanceCalculation,
    termination: Option<Box<dyn Termination>>,
    events: GraspEventSupport,
    state: SolverState,
}

impl GraspSolver<RandomStartSelector<StdRng>> {
    /// Solver with start cities drawn from an OS-seeded generator.
    pub fn new(max_iterations: u64) -> Self {
        Self::with_selector(max_iterations, RandomStartSelector::from_os_rng())
    }
}

impl GraspSolver<RandomStartSelector<ChaCha8Rng>> {
    /// Reproducible solver: the same seed and input give the same result.
    pub fn with_seed(max_iterations: u64, seed: u64) -> Self {
        Self::with_selector(max_iterations, RandomStartSelector::with_seed(seed))
    }
}

impl<Sel: StartCitySelector> GraspSolver<Sel> {
    pub fn with_selector(max_iterations: u64, selector: Sel) -> Self {
        Self {
            max_iterations,
            selector,
            constructor: NearestNeighborConstructor::new(),
            local_search: TwoOptLocalSearch::new(),
            distance_calculation: DistanceCalculation::Direct,
            termination: None,
            events: GraspEventSupport::new(),
            state: SolverState::Idle,
        }
    }

    pub fn with_local_search(mut self, local_search: TwoOptLocalSearch) -> Self {
        self.local_search = local_search;
        self
    }

    pub fn with_distance_calculation(mut self, calculation: DistanceCalculation) -> Self {
        self.distance_calculation = calculation;
        self
    }

    /// Adds a condition that may stop the run before `max_iterations`.
    pub fn with_termination<T: Termination + 'static>(mut self, termination: T) -> Self {
        self.termination = Some(Box::new(termination));
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn GraspEventListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    pub fn add_listener(&mut self, listener: Arc<dyn GraspEventListener>) {
        self.events.add_listener(listener);
    }

    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn local_search(&self) -> &TwoOptLocalSearch {
        &self.local_search
    }

    pub fn distance_calculation(&self) -> DistanceCalculation {
        self.distance_calculation
    }

    pub fn has_termination(&self) -> bool {
        self.termination.is_some()
    }

    /// Runs GRASP over `cities` and returns the best tour found.
    ///
    /// A finished solver may be run again; each run starts from an empty
    /// incumbent but keeps drawing from the same start city selector.
    ///
    /// # Errors
    ///
    /// Returns [`TourForgeError::InvalidInput`] if `cities` is empty,
    /// `max_iterations` is 0 or the selector's first start city is out of
    /// range. Nothing is reported to listeners and the state is left
    /// unchanged. An out-of-range start drawn in a later iteration fails
    /// the run and returns the solver to [`SolverState::Idle`].
    pub fn solve(&mut self, cities: &CityRegistry) -> Result<GraspResult> {
        if cities.is_empty() {
            return Err(TourForgeError::invalid_input("cannot solve an empty city set"));
        }
        if self.max_iterations < 1 {
            return Err(TourForgeError::invalid_input("max_iterations must be at least 1"));
        }

        let first_start = self.select_start(cities.len())?;

        self.state = SolverState::Iterating;
        let result = match self.distance_calculation {
            DistanceCalculation::Direct => self.iterate(cities, cities, first_start),
            DistanceCalculation::Matrix => {
                let matrix = DistanceMatrix::from_registry(cities);
                self.iterate(cities, &matrix, first_start)
            }
        };
        self.state = if result.is_ok() {
            SolverState::Done
        } else {
            SolverState::Idle
        };
        result
    }

    fn select_start(&mut self, city_count: usize) -> Result<usize> {
        let start = self.selector.select_start(city_count);
        if start >= city_count {
            return Err(TourForgeError::invalid_input(format!(
                "start city index {start} is out of range for {city_count} cities"
            )));
        }
        Ok(start)
    }

    fn iterate<M>(
        &mut self,
        cities: &CityRegistry,
        meter: &M,
        first_start: usize,
    ) -> Result<GraspResult>
    where
        M: DistanceMeter + ?Sized,
    {
        let city_count = cities.len();
        let mut scope = GraspScope::new();
        scope.start_solving();

        info!(
            event = "grasp_start",
            city_count,
            max_iterations = self.max_iterations,
            distance_calculation = ?self.distance_calculation,
        );
        self.events.fire_solving_started(cities, self.max_iterations);

        let mut terminated_early = false;
        for iteration in 0..self.max_iterations {
            if iteration > 0 && self.termination.is_terminated(&scope) {
                terminated_early = true;
                break;
            }

            let start_index = if iteration == 0 {
                first_start
            } else {
                self.select_start(city_count)?
            };
            let constructed = self.constructor.construct_from(meter, start_index)?;
            let constructed_length = constructed.total_distance(meter)?;
            let outcome = self.local_search.refine(constructed, meter)?;
            let refined_length = outcome.tour.total_distance(meter)?;

            let improved = scope.offer(outcome.tour, refined_length, iteration);
            scope.increment_iteration_count();

            let Some(best) = scope.incumbent() else {
                continue;
            };
            let best_length = best.length;
            if improved {
                info!(event = "new_best", iteration, length = best_length);
                self.events
                    .fire_best_tour_changed(cities, &best.tour, best_length, iteration);
            }
            debug!(
                event = "iteration_end",
                iteration,
                start_index,
                constructed_length,
                candidate_length = refined_length,
                best_length,
                moves_evaluated = outcome.stats.moves_evaluated,
                moves_accepted = outcome.stats.moves_accepted,
            );
            self.events
                .fire_iteration_ended(cities, &best.tour, best_length, iteration);

            scope.statistics_mut().record_iteration(IterationRecord {
                iteration,
                start_index,
                constructed_length,
                refined_length,
                best_length,
                local_search: outcome.stats,
            });
        }

        let iterations = scope.iteration_count();
        let (incumbent, statistics) = scope.into_parts();
        let incumbent = incumbent
            .ok_or_else(|| TourForgeError::invalid_input("no GRASP iteration completed"))?;

        info!(
            event = "grasp_end",
            best_length = incumbent.length,
            iterations,
            terminated_early,
            duration_ms = statistics.total_duration.as_millis() as u64,
            moves_evaluated = statistics.moves_evaluated,
        );
        self.events.fire_solving_ended(
            cities,
            &incumbent.tour,
            incumbent.length,
            terminated_early,
        );

        Ok(GraspResult {
            best_tour: incumbent.tour,
            best_length: incumbent.length,
            iterations,
            terminated_early,
            statistics,
        })
    }
}

#[cfg(test)]
#[path = "grasp_tests.rs"]
mod tests;
