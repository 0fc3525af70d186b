//! Entry points that hide solver wiring.

use std::path::Path;
use std::sync::Arc;

use tourforge_config::GraspConfig;
use tourforge_core::{CityRegistry, Result};
use tourforge_solver::{
    config_error, GraspEventListener, GraspResult, GraspSolver, GraspSolverBuilder,
};

/// Runs `max_iterations` GRASP iterations with OS-seeded start cities.
///
/// # Errors
///
/// Returns [`tourforge_core::TourForgeError::InvalidInput`] if `cities` is
/// empty or `max_iterations` is 0.
pub fn run(cities: &CityRegistry, max_iterations: u64) -> Result<GraspResult> {
    #[cfg(feature = "console")]
    crate::console::init();

    GraspSolver::new(max_iterations).solve(cities)
}

/// Like [`run`], but reproducible: the same seed gives the same tour.
pub fn run_seeded(cities: &CityRegistry, max_iterations: u64, seed: u64) -> Result<GraspResult> {
    #[cfg(feature = "console")]
    crate::console::init();

    GraspSolver::with_seed(max_iterations, seed).solve(cities)
}

/// Like [`run`], reporting every iteration to `listeners`.
pub fn run_with_listeners<I>(
    cities: &CityRegistry,
    max_iterations: u64,
    listeners: I,
) -> Result<GraspResult>
where
    I: IntoIterator<Item = Arc<dyn GraspEventListener>>,
{
    #[cfg(feature = "console")]
    crate::console::init();

    let mut solver = GraspSolver::new(max_iterations);
    for listener in listeners {
        solver.add_listener(listener);
    }
    solver.solve(cities)
}

/// Runs a solver configured by `config`.
///
/// # Errors
///
/// Returns [`tourforge_core::TourForgeError::Config`] for an invalid
/// configuration and `InvalidInput` for an empty city set.
pub fn solve_with_config(cities: &CityRegistry, config: &GraspConfig) -> Result<GraspResult> {
    #[cfg(feature = "console")]
    crate::console::init();

    GraspSolverBuilder::from_config(config)?.build().solve(cities)
}

/// Loads a TOML configuration from `path` and runs it.
///
/// # Errors
///
/// Returns [`tourforge_core::TourForgeError::Config`] if the file cannot be
/// read, parsed or validated.
pub fn solve_with_config_file(
    cities: &CityRegistry,
    path: impl AsRef<Path>,
) -> Result<GraspResult> {
    let config = GraspConfig::load(path).map_err(config_error)?;
    solve_with_config(cities, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourforge_core::TourForgeError;
    use tourforge_solver::{CountingEventListener, RecordingEventListener};
    use tourforge_test::cities::four_cities_optimal_length;
    use tourforge_test::{assert_permutation, four_cities};

    #[test]
    fn test_run_four_cities() {
        let cities = four_cities();
        let result = run(&cities, 5).unwrap();

        assert_permutation(&result.best_tour, 4);
        assert!((result.best_length - four_cities_optimal_length()).abs() < 1e-6);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_run_errors() {
        let err = run(&CityRegistry::new(), 5).unwrap_err();
        assert!(err.is_invalid_input());

        let err = run(&four_cities(), 0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_run_seeded_is_reproducible() {
        let cities = tourforge_test::random_cities(30, 8);
        let first = run_seeded(&cities, 6, 8).unwrap();
        let second = run_seeded(&cities, 6, 8).unwrap();

        assert_eq!(first.best_tour, second.best_tour);
        assert_eq!(first.best_length.to_bits(), second.best_length.to_bits());
    }

    #[test]
    fn test_run_with_listeners() {
        let counter = Arc::new(CountingEventListener::new());
        let recorder = Arc::new(RecordingEventListener::new());
        let listeners: Vec<Arc<dyn GraspEventListener>> = vec![counter.clone(), recorder.clone()];

        let result = run_with_listeners(&four_cities(), 4, listeners).unwrap();

        assert_eq!(counter.iteration_count(), 4);
        assert_eq!(recorder.lengths().last().copied(), Some(result.best_length));
    }

    #[test]
    fn test_run_with_listeners_error_reports_nothing() {
        let counter = Arc::new(CountingEventListener::new());
        let listeners: Vec<Arc<dyn GraspEventListener>> = vec![counter.clone()];

        assert!(run_with_listeners(&four_cities(), 0, listeners).is_err());
        assert!(counter.is_silent());
    }

    #[test]
    fn test_solve_with_config() {
        let config = GraspConfig::from_toml_str(
            r#"
            random_seed = 1
            [termination]
            iteration_count_limit = 3
        "#,
        )
        .unwrap();

        let result = solve_with_config(&four_cities(), &config).unwrap();
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let config = GraspConfig::new().with_improvement_epsilon(-1.0);
        let err = solve_with_config(&four_cities(), &config).unwrap_err();
        assert!(matches!(err, TourForgeError::Config(_)));
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let err = solve_with_config_file(&four_cities(), "no/such/tourforge.toml").unwrap_err();
        assert!(matches!(err, TourForgeError::Config(_)));
    }
}
