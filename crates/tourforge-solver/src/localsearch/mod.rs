//! 2-opt local search.
//!
//! A 2-opt move reverses a contiguous segment of the tour, replacing two
//! edges of the cycle with two others. The search is a first-improvement
//! hill climber: it accepts the first shortening move found while scanning
//! `start` ascending then `end` ascending, and restarts the scan after every
//! accepted move. It stops once a full scan accepts nothing.
//!
//! Position 0 never moves. Segments are `start..end` with `1 <= start`,
//! `start + 2 <= end <= n`; allowing `end == n` lets the closing edge back to
//! the start city take part in an exchange, so every pair of non-adjacent
//! edges of the cycle is covered.
//!
//! Candidates are evaluated by reversing in place, measuring the whole tour
//! and reversing back when rejected. Reversal is an exact involution, so a
//! rejected candidate leaves the working tour unchanged.

use std::fmt;

use tourforge_core::{DistanceMeter, Result, Tour, TourForgeError};
use tracing::trace;

/// Reversal of tour positions `start..end` (`end` exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TwoOptMove {
    start: usize,
    end: usize,
}

impl TwoOptMove {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns true if the move keeps position 0 fixed and reverses at
    /// least two positions of a tour with `len` cities.
    pub fn is_doable(&self, len: usize) -> bool {
        self.start >= 1 && self.start + 2 <= self.end && self.end <= len
    }

    /// Applies the reversal. Applying the same move twice restores the tour.
    pub fn apply(&self, tour: &mut Tour) {
        tour.reverse_segment(self.start, self.end);
    }
}

impl fmt::Display for TwoOptMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "2-opt [{}..{})", self.start, self.end)
    }
}

/// Counters collected while refining one tour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalSearchStats {
    /// Candidate reversals measured.
    pub moves_evaluated: u64,
    /// Reversals kept.
    pub moves_accepted: u64,
    /// Full or partial passes over the neighborhood.
    pub scans: u64,
}

impl LocalSearchStats {
    /// Adds another run's counters to these.
    pub fn merge(&mut self, other: &LocalSearchStats) {
        self.moves_evaluated += other.moves_evaluated;
        self.moves_accepted += other.moves_accepted;
        self.scans += other.scans;
    }
}

/// Result of [`TwoOptLocalSearch::refine`].
#[derive(Debug, Clone)]
pub struct LocalSearchOutcome {
    pub tour: Tour,
    pub stats: LocalSearchStats,
}

/// First-improvement 2-opt hill climber.
///
/// # Example
///
/// ```
/// use tourforge_core::{CityRegistry, Tour};
/// use tourforge_solver::localsearch::TwoOptLocalSearch;
///
/// // Corners of a unit square visited in a crossing order.
/// let cities = CityRegistry::from_points([(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]);
/// let tour = Tour::identity(cities.len());
///
/// let outcome = TwoOptLocalSearch::new().refine(tour, &cities).unwrap();
/// assert!((outcome.tour.total_distance(&cities).unwrap() - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOptLocalSearch {
    improvement_epsilon: f64,
}

impl TwoOptLocalSearch {
    /// Strict improvement: a move is kept if it shortens the tour at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A move is kept only if it shortens the tour by more than `epsilon`.
    ///
    /// # Errors
    ///
    /// Returns [`TourForgeError::InvalidInput`] if `epsilon` is negative or
    /// not finite; a negative tolerance would accept lengthening moves and
    /// the search would never settle.
    pub fn with_epsilon(epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(TourForgeError::invalid_input(format!(
                "improvement epsilon must be a finite non-negative number, got {epsilon}"
            )));
        }
        Ok(Self {
            improvement_epsilon: epsilon,
        })
    }

    pub fn improvement_epsilon(&self) -> f64 {
        self.improvement_epsilon
    }

    /// Refines `tour` until no single move improves it.
    ///
    /// Tours with fewer than 4 cities have no non-trivial move and are
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`tourforge_core::TourForgeError::InvalidInput`] from the
    /// length evaluator.
    pub fn refine<M>(&self, tour: Tour, meter: &M) -> Result<LocalSearchOutcome>
    where
        M: DistanceMeter + ?Sized,
    {
        let mut tour = tour;
        let mut stats = LocalSearchStats::default();
        if tour.len() < 4 {
            return Ok(LocalSearchOutcome { tour, stats });
        }

        let mut current = tour.total_distance(meter)?;
        loop {
            stats.scans += 1;
            let accepted = scan(
                &mut tour,
                meter,
                current,
                self.improvement_epsilon,
                &mut stats,
            )?;
            let Some((mv, length)) = accepted else {
                break;
            };
            stats.moves_accepted += 1;
            trace!(
                event = "two_opt_move",
                start = mv.start,
                end = mv.end,
                from = current,
                to = length,
            );
            current = length;
        }

        Ok(LocalSearchOutcome { tour, stats })
    }
}

/// Finds the first improving move of one scan without changing `tour`.
///
/// Returns the move and the tour length after applying it, or `None` if the
/// tour is a local optimum for the given `epsilon`.
///
/// # Errors
///
/// Returns [`tourforge_core::TourForgeError::InvalidInput`] for an empty tour.
pub fn find_improving_move<M>(
    tour: &Tour,
    meter: &M,
    epsilon: f64,
) -> Result<Option<(TwoOptMove, f64)>>
where
    M: DistanceMeter + ?Sized,
{
    if tour.len() < 4 {
        // Still reject the empty tour.
        tour.total_distance(meter)?;
        return Ok(None);
    }
    let mut working = tour.clone();
    let current = working.total_distance(meter)?;
    let mut stats = LocalSearchStats::default();
    let found = scan(&mut working, meter, current, epsilon, &mut stats)?;
    Ok(found)
}

/// One first-improvement pass. On success the move is left applied.
fn scan<M>(
    tour: &mut Tour,
    meter: &M,
    current: f64,
    epsilon: f64,
    stats: &mut LocalSearchStats,
) -> Result<Option<(TwoOptMove, f64)>>
where
    M: DistanceMeter + ?Sized,
{
    let n = tour.len();
    for start in 1..n - 1 {
        for end in start + 2..=n {
            let mv = TwoOptMove::new(start, end);
            mv.apply(tour);
            stats.moves_evaluated += 1;

            let length = tour.total_distance(meter)?;
            if length < current - epsilon {
                return Ok(Some((mv, length)));
            }
            mv.apply(tour);
        }
    }
    Ok(None)
}
