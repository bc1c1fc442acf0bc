//! Marker streams for benchmarks

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Reproducible random markers drawn from `alphabet` values
pub fn generate_random_stream(len: usize, alphabet: u32, seed: u64) -> Vec<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(0..alphabet.max(1))).collect()
}

/// Loop of `period` distinct markers
pub fn generate_periodic_stream(len: usize, period: usize) -> Vec<u32> {
    let period = period.max(1) as u32;
    (0..len as u32).map(|i| 1_000 + i % period).collect()
}

/// Outer loop of two inner loops (`abc` x4, `defg` x4)
///
/// The outer period is 28 markers, so windows below that only find it
/// through promotion.
pub fn generate_nested_stream(len: usize) -> Vec<u32> {
    let mut cycle = Vec::with_capacity(28);
    for _ in 0..4 {
        cycle.extend_from_slice(&[1, 2, 3]);
    }
    for _ in 0..4 {
        cycle.extend_from_slice(&[4, 5, 6, 7]);
    }
    cycle.iter().copied().cycle().take(len).collect()
}

/// Markers fed per benchmark iteration
pub const STREAM_LEN: usize = 4_096;

/// Window sizes covering the runtime's usual settings
pub const WINDOW_SIZES: &[usize] = &[16, 64, 200, 512, 2_048];

/// Level counts
pub const LEVEL_COUNTS: &[usize] = &[1, 4, 10];
