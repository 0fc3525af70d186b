//! TourForge - GRASP tours for the Euclidean traveling salesman problem
//!
//! Build a [`CityRegistry`], call [`run`], and read the best tour from the
//! returned [`GraspResult`].
//!
//! # Example
//!
//! ```rust
//! use tourforge::prelude::*;
//!
//! let cities = CityRegistry::from_points([(0.0, 0.0), (5.0, 1.0), (2.0, 7.0), (3.0, 4.0)]);
//! let result = tourforge::run(&cities, 5).unwrap();
//!
//! assert_eq!(result.best_tour.len(), 4);
//! println!("{}", tourforge::report::format_route(&result, &cities));
//! ```

// Core types
pub use tourforge_core::{
    distance, total_distance, City, CityId, CityRegistry, DistanceMatrix, DistanceMeter, Result,
    Tour, TourForgeError,
};

// Configuration
pub use tourforge_config::{ConfigError, DistanceCalculation, GraspConfig};

// Engine
pub use tourforge_solver::{
    CountingEventListener, FixedStartSelector, FnIterationListener, GraspEventListener,
    GraspResult, GraspSolver, GraspSolverBuilder, GraspStatistics, LoggingEventListener,
    RandomStartSelector, StartCitySelector, TwoOptLocalSearch,
};

mod run;
pub use run::{run, run_seeded, run_with_listeners, solve_with_config, solve_with_config_file};

pub mod report;

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{run, run_seeded, run_with_listeners, solve_with_config};
    pub use super::{City, CityId, CityRegistry, Tour, TourForgeError};
    pub use super::{GraspConfig, GraspEventListener, GraspResult, GraspSolver};
    pub use super::report::{format_route, RouteReportListener};
}
