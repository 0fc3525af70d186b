//! TourForge GRASP engine
//!
//! This crate provides the optimization engine including:
//! - Nearest-neighbor construction with an injectable start city selector
//! - First-improvement 2-opt local search
//! - The GRASP driver and its incumbent
//! - Termination conditions
//! - Event system for monitoring
//! - Configuration wiring (builder module)

pub mod builder;
pub mod construction;
pub mod event;
pub mod grasp;
pub mod localsearch;
pub mod scope;
pub mod statistics;
pub mod termination;

pub use builder::{config_error, GraspSolverBuilder};
pub use construction::{
    FixedStartSelector, NearestNeighborConstructor, RandomStartSelector, StartCitySelector,
};
pub use event::{
    CountingEventListener, FnIterationListener, GraspEventListener, GraspEventSupport,
    IterationSnapshot, LoggingEventListener, RecordingEventListener,
};
pub use grasp::{GraspResult, GraspSolver, SolverState};
pub use localsearch::{
    find_improving_move, LocalSearchOutcome, LocalSearchStats, TwoOptLocalSearch, TwoOptMove,
};
pub use scope::{GraspScope, Incumbent};
pub use statistics::{GraspStatistics, IterationRecord, TourImprovement};
pub use termination::{
    IterationCountTermination, OrTermination, Termination, TimeTermination,
    UnimprovedIterationCountTermination,
};
