//! Euclidean distances between cities.
//!
//! Distances are derived, never stored with the cities. The engine asks a
//! [`DistanceMeter`] for the distance between two registry indices; the
//! registry itself computes it on the fly, while [`DistanceMatrix`] memoizes
//! every pair up front. Both return bit-identical values.

use std::fmt::Debug;

use crate::city::{City, CityRegistry};

/// Euclidean distance `sqrt((ax-bx)^2 + (ay-by)^2)`.
///
/// # Examples
///
/// ```
/// use tourforge_core::{distance, City, CityId};
///
/// let a = City::new(CityId(1), 0.0, 0.0);
/// assert_eq!(distance(&a, &a), 0.0);
/// ```
#[inline]
pub fn distance(a: &City, b: &City) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    (dx * dx + dy * dy).sqrt()
}

/// Measures the distance between two cities given by registry index.
pub trait DistanceMeter: Send + Sync + Debug {
    /// Distance between the cities at registry indices `from` and `to`.
    fn distance(&self, from: usize, to: usize) -> f64;

    /// Number of cities this meter knows about.
    fn city_count(&self) -> usize;
}

impl DistanceMeter for CityRegistry {
    #[inline]
    fn distance(&self, from: usize, to: usize) -> f64 {
        distance(&self[from], &self[to])
    }

    #[inline]
    fn city_count(&self) -> usize {
        self.len()
    }
}

impl<M: DistanceMeter + ?Sized> DistanceMeter for &M {
    #[inline]
    fn distance(&self, from: usize, to: usize) -> f64 {
        (**self).distance(from, to)
    }

    #[inline]
    fn city_count(&self) -> usize {
        (**self).city_count()
    }
}

/// Precomputed symmetric distance matrix, stored row-major.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Computes every pairwise distance of the registry.
    pub fn from_registry(registry: &CityRegistry) -> Self {
        let size = registry.len();
        let mut values = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = distance(&registry[i], &registry[j]);
                values[i * size + j] = d;
                values[j * size + i] = d;
            }
        }
        Self { size, values }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl DistanceMeter for DistanceMatrix {
    #[inline]
    fn distance(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.size + to]
    }

    #[inline]
    fn city_count(&self) -> usize {
        self.size
    }
}
