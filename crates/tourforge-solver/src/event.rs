//! Event system for monitoring GRASP runs.
//!
//! Listeners are called synchronously, in registration order, after the
//! driver has updated its own state. They receive shared references only and
//! cannot influence the optimization result.
//!
//! # Event Types
//!
//! - **Iteration ended**: fired after every iteration with the incumbent,
//!   whether or not it changed
//! - **Best tour changed**: fired when an iteration replaces the incumbent
//! - **Solving started/ended**
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use tourforge_core::{CityRegistry, Tour};
//! use tourforge_solver::event::{GraspEventListener, GraspEventSupport};
//!
//! #[derive(Debug)]
//! struct PrintListener;
//!
//! impl GraspEventListener for PrintListener {
//!     fn on_iteration_ended(&self, _cities: &CityRegistry, tour: &Tour, length: f64, iteration: u64) {
//!         println!("iteration {iteration}: {tour} ({length:.2})");
//!     }
//! }
//!
//! let mut support = GraspEventSupport::new();
//! support.add_listener(Arc::new(PrintListener));
//! assert_eq!(support.listener_count(), 1);
//! ```

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tourforge_core::{CityRegistry, Tour};
use tracing::info;

/// Listener for GRASP run events.
pub trait GraspEventListener: Send + Sync + Debug {
    /// Called after every iteration with the current incumbent.
    ///
    /// # Arguments
    ///
    /// * `cities` - The registry the tour indexes into
    /// * `best_tour` - The incumbent after this iteration
    /// * `best_length` - The incumbent's total length
    /// * `iteration` - 0-based iteration index
    fn on_iteration_ended(
        &self,
        cities: &CityRegistry,
        best_tour: &Tour,
        best_length: f64,
        iteration: u64,
    );

    /// Called once before the first iteration.
    fn on_solving_started(&self, _cities: &CityRegistry, _max_iterations: u64) {}

    /// Called when an iteration replaces the incumbent.
    fn on_best_tour_changed(
        &self,
        _cities: &CityRegistry,
        _best_tour: &Tour,
        _best_length: f64,
        _iteration: u64,
    ) {
    }

    /// Called once after the last iteration.
    fn on_solving_ended(
        &self,
        _cities: &CityRegistry,
        _best_tour: &Tour,
        _best_length: f64,
        _is_terminated_early: bool,
    ) {
    }
}

/// Central event broadcaster.
#[derive(Default)]
pub struct GraspEventSupport {
    listeners: Vec<Arc<dyn GraspEventListener>>,
}

impl GraspEventSupport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Arc<dyn GraspEventListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn fire_solving_started(&self, cities: &CityRegistry, max_iterations: u64) {
        for listener in &self.listeners {
            listener.on_solving_started(cities, max_iterations);
        }
    }

    pub fn fire_best_tour_changed(
        &self,
        cities: &CityRegistry,
        best_tour: &Tour,
        best_length: f64,
        iteration: u64,
    ) {
        for listener in &self.listeners {
            listener.on_best_tour_changed(cities, best_tour, best_length, iteration);
        }
    }

    pub fn fire_iteration_ended(
        &self,
        cities: &CityRegistry,
        best_tour: &Tour,
        best_length: f64,
        iteration: u64,
    ) {
        for listener in &self.listeners {
            listener.on_iteration_ended(cities, best_tour, best_length, iteration);
        }
    }

    pub fn fire_solving_ended(
        &self,
        cities: &CityRegistry,
        best_tour: &Tour,
        best_length: f64,
        is_terminated_early: bool,
    ) {
        for listener in &self.listeners {
            listener.on_solving_ended(cities, best_tour, best_length, is_terminated_early);
        }
    }
}

impl Debug for GraspEventSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraspEventSupport")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Emits every event as a `tracing` INFO event.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventListener {
    prefix: String,
}

impl LoggingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `prefix` as a field on every event.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl GraspEventListener for LoggingEventListener {
    fn on_iteration_ended(
        &self,
        cities: &CityRegistry,
        best_tour: &Tour,
        best_length: f64,
        iteration: u64,
    ) {
        let start_city = best_tour.start().map(|i| cities[i].id().0);
        info!(
            prefix = %self.prefix,
            event = "listener_iteration",
            iteration = iteration + 1,
            best_length,
            start_city,
        );
    }

    fn on_solving_started(&self, cities: &CityRegistry, max_iterations: u64) {
        info!(
            prefix = %self.prefix,
            event = "listener_start",
            city_count = cities.len(),
            max_iterations,
        );
    }

    fn on_best_tour_changed(
        &self,
        _cities: &CityRegistry,
        _best_tour: &Tour,
        best_length: f64,
        iteration: u64,
    ) {
        info!(
            prefix = %self.prefix,
            event = "listener_new_best",
            iteration,
            best_length,
        );
    }

    fn on_solving_ended(
        &self,
        _cities: &CityRegistry,
        _best_tour: &Tour,
        best_length: f64,
        is_terminated_early: bool,
    ) {
        info!(
            prefix = %self.prefix,
            event = "listener_end",
            best_length,
            is_terminated_early,
        );
    }
}

/// Counts event occurrences.
#[derive(Debug, Default)]
pub struct CountingEventListener {
    solving_started_count: AtomicUsize,
    best_tour_count: AtomicUsize,
    iteration_count: AtomicUsize,
    solving_ended_count: AtomicUsize,
}

impl CountingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solving_started_count(&self) -> usize {
        self.solving_started_count.load(Ordering::SeqCst)
    }

    pub fn best_tour_count(&self) -> usize {
        self.best_tour_count.load(Ordering::SeqCst)
    }

    pub fn iteration_count(&self) -> usize {
        self.iteration_count.load(Ordering::SeqCst)
    }

    pub fn solving_ended_count(&self) -> usize {
        self.solving_ended_count.load(Ordering::SeqCst)
    }

    /// Returns true if no event has been received.
    pub fn is_silent(&self) -> bool {
        self.solving_started_count() == 0
            && self.best_tour_count() == 0
            && self.iteration_count() == 0
            && self.solving_ended_count() == 0
    }

    pub fn reset(&self) {
        self.solving_started_count.store(0, Ordering::SeqCst);
        self.best_tour_count.store(0, Ordering::SeqCst);
        self.iteration_count.store(0, Ordering::SeqCst);
        self.solving_ended_count.store(0, Ordering::SeqCst);
    }
}

impl GraspEventListener for CountingEventListener {
    fn on_iteration_ended(&self, _: &CityRegistry, _: &Tour, _: f64, _: u64) {
        self.iteration_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_started(&self, _: &CityRegistry, _: u64) {
        self.solving_started_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_best_tour_changed(&self, _: &CityRegistry, _: &Tour, _: f64, _: u64) {
        self.best_tour_count.fetch_add(1, Ordering::SeqCst);
    }

    fn on_solving_ended(&self, _: &CityRegistry, _: &Tour, _: f64, _: bool) {
        self.solving_ended_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Adapts a closure into an iteration listener.
///
/// ```
/// use std::sync::Arc;
/// use tourforge_solver::event::{FnIterationListener, GraspEventSupport};
///
/// let mut support = GraspEventSupport::new();
/// support.add_listener(Arc::new(FnIterationListener::new(|_cities, tour, length, k| {
///     println!("{k}: {tour} = {length}");
/// })));
/// ```
pub struct FnIterationListener<F> {
    callback: F,
}

impl<F> FnIterationListener<F>
where
    F: Fn(&CityRegistry, &Tour, f64, u64) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> Debug for FnIterationListener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnIterationListener").finish_non_exhaustive()
    }
}

impl<F> GraspEventListener for FnIterationListener<F>
where
    F: Fn(&CityRegistry, &Tour, f64, u64) + Send + Sync,
{
    fn on_iteration_ended(
        &self,
        cities: &CityRegistry,
        best_tour: &Tour,
        best_length: f64,
        iteration: u64,
    ) {
        (self.callback)(cities, best_tour, best_length, iteration);
    }
}

/// Incumbent as reported after one iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationSnapshot {
    pub iteration: u64,
    pub tour: Tour,
    pub length: f64,
}

/// Keeps every reported iteration, for inspection after a run.
#[derive(Debug, Default)]
pub struct RecordingEventListener {
    snapshots: Mutex<Vec<IterationSnapshot>>,
    best_changes: AtomicU64,
}

impl RecordingEventListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots in the order they were reported.
    pub fn snapshots(&self) -> Vec<IterationSnapshot> {
        self.recorded().clone()
    }

    /// Reported incumbent lengths, one per iteration.
    pub fn lengths(&self) -> Vec<f64> {
        self.snapshots().into_iter().map(|s| s.length).collect()
    }

    /// Reported iteration indices.
    pub fn iterations(&self) -> Vec<u64> {
        self.snapshots().into_iter().map(|s| s.iteration).collect()
    }

    pub fn best_change_count(&self) -> u64 {
        self.best_changes.load(Ordering::SeqCst)
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<IterationSnapshot>> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl GraspEventListener for RecordingEventListener {
    fn on_iteration_ended(
        &self,
        _cities: &CityRegistry,
        best_tour: &Tour,
        best_length: f64,
        iteration: u64,
    ) {
        self.recorded().push(IterationSnapshot {
            iteration,
            tour: best_tour.clone(),
            length: best_length,
        });
    }

    fn on_best_tour_changed(&self, _: &CityRegistry, _: &Tour, _: f64, _: u64) {
        self.best_changes.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
