use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::AppError;

type Result<T> = std::result::Result<T, AppError>;

pub fn fastest_sort(values: &mut [i32]) {
    values.sort_unstable();
}

/// Generates `size` values drawn uniformly from `0..max_value`.
/// A seed makes the sequence reproducible.
pub fn random_values(size: usize, max_value: i32, seed: Option<u64>) -> Result<Vec<i32>> {
    if max_value <= 0 {
        return Err(AppError::invalid_argument(
            "upper bound of random values must be positive",
        ));
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let values = (0..size).map(|_| rng.gen_range(0..max_value)).collect();
    return Ok(values);
}

pub fn timed_sort(values: &mut [i32]) -> Duration {
    let start = Instant::now();
    fastest_sort(values);
    let elapsed = start.elapsed();
    log::debug!("sorted {} values in {:?}", values.len(), elapsed);
    elapsed
}
