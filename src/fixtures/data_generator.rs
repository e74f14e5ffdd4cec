use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::types::{CoordinateSet, Point};
use crate::error::Result;

/// `count` points drawn uniformly from the unit square, reproducible per seed.
pub fn generate_random_points(count: usize, seed: u64) -> Result<CoordinateSet> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<Point> = (0..count)
        .map(|_| Point::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect();

    info!("Generated {} random points (seed {})", count, seed);
    CoordinateSet::new(points)
}

/// Same draws as [`generate_random_points`], as raw `(x, y)` pairs.
pub fn generate_random_pairs(count: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| (rng.gen::<f64>(), rng.gen::<f64>()))
        .collect()
}
