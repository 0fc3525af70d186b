//! Closed tours over the cities of a registry.

use std::fmt;

use crate::city::{CityId, CityRegistry};
use crate::distance::DistanceMeter;
use crate::error::{Result, TourForgeError};

/// A closed visiting order: registry indices, each city exactly once.
///
/// Position 0 is the tour's start city. The closing edge from the last
/// position back to position 0 is implicit.
///
/// # Examples
///
/// ```
/// use tourforge_core::{CityRegistry, Tour};
///
/// let registry = CityRegistry::from_points([(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
/// let tour = Tour::new(vec![0, 1, 2], registry.len()).unwrap();
///
/// assert_eq!(tour.total_distance(&registry).unwrap(), 12.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// Creates a tour, checking that `order` is a permutation of `0..city_count`.
    ///
    /// # Errors
    ///
    /// Returns [`TourForgeError::InvalidInput`] if an index is out of range,
    /// repeated, or missing.
    pub fn new(order: Vec<usize>, city_count: usize) -> Result<Self> {
        let tour = Self { order };
        if !tour.is_permutation_of(city_count) {
            return Err(TourForgeError::invalid_input(format!(
                "tour {:?} is not a permutation of {} cities",
                tour.order, city_count
            )));
        }
        Ok(tour)
    }

    /// Creates a tour without checking the permutation invariant.
    ///
    /// Callers are responsible for passing a permutation; constructors in the
    /// solver build their order by visiting every city once.
    pub fn from_order_unchecked(order: Vec<usize>) -> Self {
        Self { order }
    }

    /// The identity tour `0, 1, ..., city_count - 1`.
    pub fn identity(city_count: usize) -> Self {
        Self {
            order: (0..city_count).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registry indices in visiting order.
    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Registry index of the start city, if any.
    #[inline]
    pub fn start(&self) -> Option<usize> {
        self.order.first().copied()
    }

    /// Consumes the tour, returning its visiting order.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Returns true if every index `0..city_count` appears exactly once.
    pub fn is_permutation_of(&self, city_count: usize) -> bool {
        if self.order.len() != city_count {
            return false;
        }
        let mut seen = vec![false; city_count];
        for &index in &self.order {
            match seen.get_mut(index) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        true
    }

    /// Reverses positions `start..end` in place (`end` exclusive).
    ///
    /// Reversal is its own inverse: applying the same call twice restores the
    /// original order exactly.
    #[inline]
    pub fn reverse_segment(&mut self, start: usize, end: usize) {
        self.order[start..end].reverse();
    }

    /// Returns a copy of this tour with positions `start..end` reversed.
    pub fn with_reversed_segment(&self, start: usize, end: usize) -> Self {
        let mut candidate = self.clone();
        candidate.reverse_segment(start, end);
        candidate
    }

    /// Iterates the closed tour's edges as `(from, to)` registry indices,
    /// including the closing edge back to the start.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.order.len();
        (0..n).map(move |i| (self.order[i], self.order[(i + 1) % n]))
    }

    /// Total length of the closed tour, see [`total_distance`].
    pub fn total_distance<M: DistanceMeter + ?Sized>(&self, meter: &M) -> Result<f64> {
        total_distance(self, meter)
    }

    /// City ids in visiting order.
    pub fn city_ids(&self, registry: &CityRegistry) -> Vec<CityId> {
        self.order.iter().map(|&i| registry[i].id()).collect()
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "]")
    }
}

/// Sum of consecutive edge lengths plus the closing edge back to the start.
///
/// A single-city tour has length 0.
///
/// # Errors
///
/// Returns [`TourForgeError::InvalidInput`] for an empty tour or one that
/// names a city index the meter does not know.
pub fn total_distance<M: DistanceMeter + ?Sized>(tour: &Tour, meter: &M) -> Result<f64> {
    let order = tour.order();
    let (first, last) = match (order.first(), order.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => {
            return Err(TourForgeError::invalid_input(
                "total distance is undefined for an empty tour",
            ))
        }
    };
    let city_count = meter.city_count();
    if let Some(&index) = order.iter().find(|&&index| index >= city_count) {
        return Err(TourForgeError::invalid_input(format!(
            "tour references city index {index} but only {city_count} cities are known"
        )));
    }

    let mut total = 0.0;
    for pair in order.windows(2) {
        total += meter.distance(pair[0], pair[1]);
    }
    total += meter.distance(last, first);
    Ok(total)
}
