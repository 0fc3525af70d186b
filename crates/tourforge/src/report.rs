//! Plain-text reporting of tours.
//!
//! [`RouteReportListener`] writes one line per GRASP iteration, and
//! [`format_route`] renders the final result.

use std::fmt::{self, Write as _};
use std::io::Write;
use std::sync::Mutex;

use tourforge_core::{CityRegistry, Tour};
use tourforge_solver::{GraspEventListener, GraspResult};

/// One-line summary of the incumbent after `iteration` (0-based).
///
/// ```
/// use tourforge::report::format_iteration_title;
/// use tourforge::{CityRegistry, Tour};
///
/// let cities = CityRegistry::from_points([(0.0, 0.0), (3.0, 4.0)]);
/// let title = format_iteration_title(&cities, &Tour::identity(2), 10.0, 0);
/// assert_eq!(title, "Iteration: 1 | Distance: 10.00 km | Start: City 1");
/// ```
pub fn format_iteration_title(
    cities: &CityRegistry,
    tour: &Tour,
    length: f64,
    iteration: u64,
) -> String {
    let start = match tour.start() {
        Some(index) => cities[index].id().to_string(),
        None => "-".to_string(),
    };
    format!(
        "Iteration: {} | Distance: {:.2} km | Start: City {}",
        iteration + 1,
        length,
        start
    )
}

/// Cities in visiting order, e.g. `City 1 -> City 3 -> City 4 -> City 2`.
pub fn format_city_sequence(cities: &CityRegistry, tour: &Tour) -> String {
    tour.city_ids(cities)
        .iter()
        .map(|id| format!("City {id}"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// One labeled point per line, in visiting order.
pub fn format_tour_points(cities: &CityRegistry, tour: &Tour) -> String {
    let mut out = String::new();
    for &index in tour.order() {
        let _ = writeln!(out, "{}", cities[index]);
    }
    out
}

/// Final report: best route and total distance.
///
/// ```
/// use tourforge::report::format_route;
/// use tourforge::{CityRegistry, FixedStartSelector, GraspSolver};
///
/// let cities = CityRegistry::from_points([(0.0, 0.0), (5.0, 1.0), (2.0, 7.0), (3.0, 4.0)]);
/// let result = GraspSolver::with_selector(5, FixedStartSelector::always(0))
///     .solve(&cities)
///     .unwrap();
///
/// assert_eq!(
///     format_route(&result, &cities),
///     "Best route: City 1 -> City 3 -> City 4 -> City 2\nTotal distance: 19.15 km"
/// );
/// ```
pub fn format_route(result: &GraspResult, cities: &CityRegistry) -> String {
    format!(
        "Best route: {}\nTotal distance: {:.2} km",
        format_city_sequence(cities, &result.best_tour),
        result.best_length
    )
}

/// Writes an iteration title line to a sink after every iteration.
pub struct RouteReportListener<W> {
    sink: Mutex<W>,
    with_points: bool,
}

impl<W: Write + Send> RouteReportListener<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
            with_points: false,
        }
    }

    /// Also lists every city of the incumbent under each title.
    pub fn with_points(mut self) -> Self {
        self.with_points = true;
        self
    }

    /// Returns the sink, e.g. to inspect a `Vec<u8>` buffer.
    pub fn into_inner(self) -> W {
        match self.sink.into_inner() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W> fmt::Debug for RouteReportListener<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteReportListener")
            .field("with_points", &self.with_points)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send> GraspEventListener for RouteReportListener<W> {
    fn on_iteration_ended(
        &self,
        cities: &CityRegistry,
        best_tour: &Tour,
        best_length: f64,
        iteration: u64,
    ) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        // Reporting failures never affect the run.
        let _ = writeln!(
            sink,
            "{}",
            format_iteration_title(cities, best_tour, best_length, iteration)
        );
        if self.with_points {
            let _ = write!(sink, "{}", format_tour_points(cities, best_tour));
        }
    }
}
