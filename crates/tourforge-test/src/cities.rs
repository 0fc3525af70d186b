//! City set fixtures.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tourforge_core::CityRegistry;

/// Nearest-neighbor tour from index 0 visited in this order.
pub const FOUR_CITIES_GREEDY_ORDER: [usize; 4] = [0, 3, 2, 1];

/// The 2-opt local optimum reached from [`FOUR_CITIES_GREEDY_ORDER`].
pub const FOUR_CITIES_OPTIMAL_ORDER: [usize; 4] = [0, 2, 3, 1];

/// Cities (0,0), (5,1), (2,7), (3,4) with ids 1 to 4.
pub fn four_cities() -> CityRegistry {
    CityRegistry::from_points([(0.0, 0.0), (5.0, 1.0), (2.0, 7.0), (3.0, 4.0)])
}

/// Length of [`FOUR_CITIES_GREEDY_ORDER`]: 5 + sqrt(10) + sqrt(45) + sqrt(26).
pub fn four_cities_greedy_length() -> f64 {
    5.0 + 10f64.sqrt() + 45f64.sqrt() + 26f64.sqrt()
}

/// Length of [`FOUR_CITIES_OPTIMAL_ORDER`]: sqrt(53) + sqrt(10) + sqrt(13) + sqrt(26).
pub fn four_cities_optimal_length() -> f64 {
    53f64.sqrt() + 10f64.sqrt() + 13f64.sqrt() + 26f64.sqrt()
}

/// Corners of a `side` x `side` square, listed in a crossing order.
///
/// The optimal tour is the perimeter, `4 * side`.
pub fn square_cities(side: f64) -> CityRegistry {
    CityRegistry::from_points([(0.0, 0.0), (side, side), (side, 0.0), (0.0, side)])
}

/// `count` cities uniformly placed in a 100 x 100 square, reproducible by seed.
pub fn random_cities(count: usize, seed: u64) -> CityRegistry {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    CityRegistry::from_points(
        (0..count).map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0))),
    )
}
