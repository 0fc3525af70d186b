//! Brute-force assertions on tours.

use tourforge_core::{DistanceMeter, Tour};

/// Panics unless `tour` visits every index in `0..city_count` exactly once.
pub fn assert_permutation(tour: &Tour, city_count: usize) {
    let mut sorted = tour.order().to_vec();
    sorted.sort_unstable();
    let expected: Vec<usize> = (0..city_count).collect();
    assert_eq!(
        sorted, expected,
        "tour {tour} is not a permutation of {city_count} cities"
    );
}

/// Returns the first segment reversal `start..end` (with `1 <= start`,
/// `start + 2 <= end <= len`) that makes the tour shorter by more than
/// `epsilon`, recomputing the full length for every candidate.
pub fn has_improving_reversal<M>(tour: &Tour, meter: &M, epsilon: f64) -> Option<(usize, usize)>
where
    M: DistanceMeter + ?Sized,
{
    let n = tour.len();
    if n < 4 {
        return None;
    }
    let current = tour.total_distance(meter).ok()?;
    for start in 1..n - 1 {
        for end in start + 2..=n {
            let candidate = tour.with_reversed_segment(start, end);
            let length = candidate.total_distance(meter).ok()?;
            if length < current - epsilon {
                return Some((start, end));
            }
        }
    }
    None
}
