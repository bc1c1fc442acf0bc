//! Marker-stream generators
//!
//! Streams are sequences of 64-bit execution markers. Periodic and nested
//! shapes mimic the call sequences of iterative applications; random ones
//! should never settle into a loop for long.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Shape of a generated stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamShape {
    /// Independent random markers
    Random,
    /// One body repeated
    Periodic,
    /// Two bodies, each repeated, alternating as an outer loop
    Nested,
    /// Periodic phases separated by random bursts
    Phased,
}

impl StreamShape {
    pub const ALL: [StreamShape; 4] = [
        StreamShape::Random,
        StreamShape::Periodic,
        StreamShape::Nested,
        StreamShape::Phased,
    ];
}

/// One fuzz input for an engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamCase {
    pub window: usize,
    pub levels: usize,
    pub shape: StreamShape,
    pub markers: Vec<u64>,
}

/// Input generator for fuzzing
pub struct StreamGenerator {
    rng: ChaCha8Rng,
    include_boundaries: bool,
    alphabet: u64,
}

impl StreamGenerator {
    /// Create a new generator with optional seed
    pub fn new(seed: Option<u64>, alphabet: u64) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };

        Self {
            rng,
            include_boundaries: true,
            alphabet: alphabet.max(2),
        }
    }

    /// Set whether to include boundary values
    pub fn with_boundaries(mut self, include: bool) -> Self {
        self.include_boundaries = include;
        self
    }

    /// Random usize in `1..=max`
    pub fn usize(&mut self, max: usize) -> usize {
        self.rng.random_range(1..=max.max(1))
    }

    /// Window in `1..=max`, biased towards the edges
    pub fn window(&mut self, max: usize) -> usize {
        if self.include_boundaries && self.rng.random_bool(0.2) {
            let edges = [1, 2, 15, 16, 17, max];
            return edges[self.rng.random_range(0..edges.len())].min(max).max(1);
        }
        self.usize(max)
    }

    /// Level count in `1..=max`
    pub fn levels(&mut self, max: usize) -> usize {
        if self.include_boundaries && self.rng.random_bool(0.2) {
            return if self.rng.random_bool(0.5) { 1 } else { max.max(1) };
        }
        self.usize(max)
    }

    /// One marker from the alphabet
    pub fn marker(&mut self) -> u64 {
        self.rng.random_range(0..self.alphabet)
    }

    /// Body of distinct markers, used as a loop body
    pub fn body(&mut self, len: usize) -> Vec<u64> {
        let len = len.clamp(1, self.alphabet as usize);
        let mut body: Vec<u64> = (0..self.alphabet).collect();
        body.shuffle(&mut self.rng);
        body.truncate(len);
        body
    }

    /// Independent random markers
    pub fn random_stream(&mut self, len: usize) -> Vec<u64> {
        (0..len).map(|_| self.marker()).collect()
    }

    /// `body` repeated until `len` markers
    pub fn periodic_stream(&mut self, period: usize, len: usize) -> Vec<u64> {
        let body = self.body(period);
        body.iter().copied().cycle().take(len).collect()
    }

    /// Inner loops `a^reps_a b^reps_b` repeated as an outer loop
    pub fn nested_stream(&mut self, len: usize) -> Vec<u64> {
        let len_a = self.rng.random_range(1..=4);
        let len_b = self.rng.random_range(1..=4);
        let a = self.body(len_a);
        let b = self.body(len_b);
        let reps_a = self.rng.random_range(2..=6);
        let reps_b = self.rng.random_range(2..=6);

        let mut outer = Vec::with_capacity(a.len() * reps_a + b.len() * reps_b);
        for _ in 0..reps_a {
            outer.extend_from_slice(&a);
        }
        for _ in 0..reps_b {
            outer.extend_from_slice(&b);
        }
        outer.iter().copied().cycle().take(len).collect()
    }

    /// Periodic phases of changing period with random bursts in between
    pub fn phased_stream(&mut self, len: usize) -> Vec<u64> {
        let mut stream = Vec::with_capacity(len);
        while stream.len() < len {
            let period = self.rng.random_range(1..=8);
            let phase = self.rng.random_range(period * 3..=period * 12);
            stream.extend(self.periodic_stream(period, phase));

            let burst = self.rng.random_range(0..=8);
            stream.extend(self.random_stream(burst));
        }
        stream.truncate(len);
        stream
    }

    /// Stream of the given shape
    pub fn stream(&mut self, shape: StreamShape, len: usize) -> Vec<u64> {
        match shape {
            StreamShape::Random => self.random_stream(len),
            StreamShape::Periodic => {
                let period = self.rng.random_range(1..=8);
                self.periodic_stream(period, len)
            }
            StreamShape::Nested => self.nested_stream(len),
            StreamShape::Phased => self.phased_stream(len),
        }
    }

    /// Complete engine input with random parameters and shape
    pub fn case(&mut self, max_window: usize, max_levels: usize, max_len: usize) -> StreamCase {
        let shape = StreamShape::ALL[self.rng.random_range(0..StreamShape::ALL.len())];
        let len = self.rng.random_range(0..=max_len);
        StreamCase {
            window: self.window(max_window),
            levels: self.levels(max_levels),
            shape,
            markers: self.stream(shape, len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_reproducibility() {
        let mut a = StreamGenerator::new(Some(42), 16);
        let mut b = StreamGenerator::new(Some(42), 16);

        for _ in 0..20 {
            let case_a = a.case(64, 10, 200);
            let case_b = b.case(64, 10, 200);
            assert_eq!(case_a.markers, case_b.markers);
            assert_eq!(case_a.window, case_b.window);
            assert_eq!(case_a.levels, case_b.levels);
        }
    }

    #[test]
    fn test_periodic_stream_repeats() {
        let mut generator = StreamGenerator::new(Some(7), 16);
        let stream = generator.periodic_stream(5, 40);
        assert_eq!(stream.len(), 40);
        for i in 5..40 {
            assert_eq!(stream[i], stream[i - 5]);
        }
    }

    #[test]
    fn test_body_is_distinct() {
        let mut generator = StreamGenerator::new(Some(3), 8);
        let mut body = generator.body(6);
        body.sort_unstable();
        body.dedup();
        assert_eq!(body.len(), 6);
        assert_eq!(generator.body(100).len(), 8);
    }

    #[test]
    fn test_ranges() {
        let mut generator = StreamGenerator::new(Some(1), 4);
        for _ in 0..200 {
            assert!((1..=32).contains(&generator.window(32)));
            assert!((1..=10).contains(&generator.levels(10)));
            assert!(generator.marker() < 4);
        }
        assert_eq!(generator.phased_stream(300).len(), 300);
        assert_eq!(generator.nested_stream(123).len(), 123);
    }
}
