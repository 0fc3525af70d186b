//! Greedy nearest-neighbor tour construction.
//!
//! Starting from a city chosen by a [`StartCitySelector`], the constructor
//! repeatedly appends the closest city not yet placed. Each placement is
//! final. Ties go to the lowest registry index, so a given start always
//! yields the same tour.

mod start;

pub use start::{FixedStartSelector, RandomStartSelector, StartCitySelector};

use tourforge_core::{DistanceMeter, Result, Tour, TourForgeError};

/// Nearest-neighbor constructor, O(n^2) per tour.
///
/// # Example
///
/// ```
/// use tourforge_core::CityRegistry;
/// use tourforge_solver::construction::{FixedStartSelector, NearestNeighborConstructor};
///
/// let cities = CityRegistry::from_points([(0.0, 0.0), (5.0, 1.0), (2.0, 7.0), (3.0, 4.0)]);
/// let mut selector = FixedStartSelector::always(0);
///
/// let tour = NearestNeighborConstructor::new()
///     .construct(&cities, &mut selector)
///     .unwrap();
/// assert_eq!(tour.order(), &[0, 3, 2, 1]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighborConstructor;

impl NearestNeighborConstructor {
    pub fn new() -> Self {
        Self
    }

    /// Builds a tour from a start city picked by `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`TourForgeError::InvalidInput`] if there are no cities or the
    /// selector returns an index outside the registry.
    pub fn construct<M, Sel>(&self, meter: &M, selector: &mut Sel) -> Result<Tour>
    where
        M: DistanceMeter + ?Sized,
        Sel: StartCitySelector + ?Sized,
    {
        let city_count = meter.city_count();
        if city_count == 0 {
            return Err(TourForgeError::invalid_input(
                "cannot construct a tour over an empty city set",
            ));
        }
        let start = selector.select_start(city_count);
        self.construct_from(meter, start)
    }

    /// Builds a tour starting at registry index `start`.
    ///
    /// # Errors
    ///
    /// Returns [`TourForgeError::InvalidInput`] if there are no cities or
    /// `start` is out of range.
    pub fn construct_from<M>(&self, meter: &M, start: usize) -> Result<Tour>
    where
        M: DistanceMeter + ?Sized,
    {
        let city_count = meter.city_count();
        if city_count == 0 {
            return Err(TourForgeError::invalid_input(
                "cannot construct a tour over an empty city set",
            ));
        }
        if start >= city_count {
            return Err(TourForgeError::invalid_input(format!(
                "start city index {start} is out of range for {city_count} cities"
            )));
        }

        let mut placed = vec![false; city_count];
        let mut order = Vec::with_capacity(city_count);
        placed[start] = true;
        order.push(start);

        let mut current = start;
        while order.len() < city_count {
            let mut nearest: Option<(usize, f64)> = None;
            for (candidate, &is_placed) in placed.iter().enumerate() {
                if is_placed {
                    continue;
                }
                let d = meter.distance(current, candidate);
                // Strict comparison keeps the lowest index on ties.
                if nearest.map_or(true, |(_, best)| d < best) {
                    nearest = Some((candidate, d));
                }
            }

            let Some((next, _)) = nearest else {
                break;
            };
            placed[next] = true;
            order.push(next);
            current = next;
        }

        Ok(Tour::from_order_unchecked(order))
    }
}
