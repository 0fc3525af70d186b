//! Wiring between [`GraspConfig`] and [`GraspSolver`].

use std::sync::Arc;

use tourforge_config::{ConfigError, GraspConfig};
use tourforge_core::{Result, TourForgeError};

use crate::construction::{RandomStartSelector, StartCitySelector};
use crate::event::GraspEventListener;
use crate::grasp::GraspSolver;
use crate::localsearch::TwoOptLocalSearch;
use crate::termination::{OrTermination, TimeTermination, UnimprovedIterationCountTermination};

/// Termination assembled from the optional config limits.
pub type ConfiguredTermination = OrTermination<(
    Option<UnimprovedIterationCountTermination>,
    Option<TimeTermination>,
)>;

/// Converts a configuration failure into the engine's error type.
pub fn config_error(err: ConfigError) -> TourForgeError {
    TourForgeError::Config(err.to_string())
}

/// Builds solvers from configuration.
///
/// # Example
///
/// ```
/// use tourforge_config::GraspConfig;
/// use tourforge_solver::builder::GraspSolverBuilder;
///
/// let config = GraspConfig::new()
///     .with_random_seed(7)
///     .with_iteration_count_limit(20)
///     .with_unimproved_iteration_count_limit(5);
///
/// let solver = GraspSolverBuilder::from_config(&config).unwrap().build();
/// assert_eq!(solver.max_iterations(), 20);
/// assert!(solver.has_termination());
/// ```
#[derive(Debug)]
pub struct GraspSolverBuilder {
    config: GraspConfig,
    local_search: TwoOptLocalSearch,
    selector: Option<Box<dyn StartCitySelector>>,
    listeners: Vec<Arc<dyn GraspEventListener>>,
}

impl GraspSolverBuilder {
    /// Starts from a validated copy of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TourForgeError::Config`] if the configuration is invalid.
    pub fn from_config(config: &GraspConfig) -> Result<Self> {
        config.validate().map_err(config_error)?;
        let local_search = TwoOptLocalSearch::with_epsilon(config.improvement_epsilon())?;
        Ok(Self {
            config: config.clone(),
            local_search,
            selector: None,
            listeners: Vec::new(),
        })
    }

    /// Overrides the start city selector derived from `random_seed`.
    pub fn with_selector<Sel: StartCitySelector + 'static>(mut self, selector: Sel) -> Self {
        self.selector = Some(Box::new(selector));
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn GraspEventListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn build(self) -> GraspSolver {
        let config = self.config;
        let selector = self
            .selector
            .unwrap_or_else(|| Self::selector(config.random_seed));

        let mut solver = GraspSolver::with_selector(config.max_iterations(), selector)
            .with_local_search(self.local_search)
            .with_distance_calculation(config.distance_calculation);
        if let Some(termination) = Self::termination(&config) {
            solver = solver.with_termination(termination);
        }
        for listener in self.listeners {
            solver.add_listener(listener);
        }
        solver
    }

    /// Seeded selector when a seed is given, OS-seeded otherwise.
    pub fn selector(seed: Option<u64>) -> Box<dyn StartCitySelector> {
        match seed {
            Some(seed) => Box::new(RandomStartSelector::with_seed(seed)),
            None => Box::new(RandomStartSelector::from_os_rng()),
        }
    }

    /// Early-stop conditions from the config, `None` if it sets none.
    pub fn termination(config: &GraspConfig) -> Option<ConfiguredTermination> {
        let unimproved = config
            .unimproved_iteration_count_limit()
            .map(UnimprovedIterationCountTermination::new);
        let time = config.time_limit().map(TimeTermination::new);
        if unimproved.is_none() && time.is_none() {
            return None;
        }
        Some(OrTermination((unimproved, time)))
    }
}
