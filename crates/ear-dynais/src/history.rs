//! Per-level observation history
//!
//! Fixed-capacity ring of `(sample, width)` pairs addressed by age: age 1 is
//! the most recent observation, age `capacity` the oldest one, which is the
//! next to be overwritten.
//!
//! # Invariants
//! - `cursor < capacity`; the slot at `cursor` holds the oldest entry.
//! - The entry of age `a` lives in slot `(cursor + a) % capacity`.
//! - Slots never written hold width 0, which no observation carries.
//!
//! # Layout
//! `segments()` exposes ages `1..capacity` as two contiguous slice pairs so
//! the per-level scan runs over plain slices instead of wrapping indices.

use crate::sample::Sample;
use std::collections::TryReserveError;

/// Allocate a boxed slice filled with `value`, reporting allocation failure
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Box<[T]>, TryReserveError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, value);
    Ok(buffer.into_boxed_slice())
}

/// Entries of consecutive ages, oldest last
pub(crate) struct Segment<'a, S> {
    /// Age of the first entry
    pub first_age: usize,
    pub samples: &'a [S],
    pub widths: &'a [u32],
}

/// Ring buffer of past observations
#[derive(Debug, Clone)]
pub(crate) struct History<S> {
    samples: Box<[S]>,
    widths: Box<[u32]>,
    cursor: usize,
}

impl<S: Sample> History<S> {
    pub fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        debug_assert!(capacity > 0, "history capacity must be > 0");
        Ok(Self {
            samples: try_filled(capacity, S::default())?,
            widths: try_filled(capacity, 0)?,
            cursor: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Entry of the given age (`1..=capacity`)
    #[cfg(test)]
    pub fn get(&self, age: usize) -> (S, u32) {
        debug_assert!(age >= 1 && age <= self.capacity());
        let slot = (self.cursor + age) % self.capacity();
        (self.samples[slot], self.widths[slot])
    }

    /// Ages `1..capacity` as two contiguous runs
    pub fn segments(&self) -> [Segment<'_, S>; 2] {
        let split = self.cursor + 1;
        [
            Segment {
                first_age: 1,
                samples: &self.samples[split..],
                widths: &self.widths[split..],
            },
            Segment {
                first_age: self.capacity() - self.cursor,
                samples: &self.samples[..self.cursor],
                widths: &self.widths[..self.cursor],
            },
        ]
    }

    /// Overwrite the oldest entry; it becomes age 1
    #[inline]
    pub fn push(&mut self, sample: S, width: u32) {
        self.samples[self.cursor] = sample;
        self.widths[self.cursor] = width;
        self.cursor = match self.cursor {
            0 => self.capacity() - 1,
            cursor => cursor - 1,
        };
    }

    pub fn clear(&mut self) {
        self.samples.fill(S::default());
        self.widths.fill(0);
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ages(history: &History<u32>) -> Vec<(usize, u32)> {
        history
            .segments()
            .iter()
            .flat_map(|segment| {
                segment
                    .samples
                    .iter()
                    .enumerate()
                    .map(move |(i, &s)| (segment.first_age + i, s))
            })
            .collect()
    }

    #[test]
    fn test_push_and_get_by_age() {
        let mut history = History::<u32>::with_capacity(4).unwrap();
        for sample in 1..=3 {
            history.push(sample, 1);
        }
        assert_eq!(history.get(1), (3, 1));
        assert_eq!(history.get(2), (2, 1));
        assert_eq!(history.get(3), (1, 1));
        assert_eq!(history.get(4), (0, 0));
    }

    #[test]
    fn test_oldest_is_overwritten() {
        let mut history = History::<u32>::with_capacity(3).unwrap();
        for sample in 1..=5 {
            history.push(sample, 1);
        }
        assert_eq!(history.get(1), (5, 1));
        assert_eq!(history.get(3), (3, 1));
    }

    #[test]
    fn test_segments_cover_ages_in_order() {
        let mut history = History::<u32>::with_capacity(5).unwrap();
        for round in 0..12 {
            let expected: Vec<usize> = (1..5).collect();
            let listed: Vec<usize> = ages(&history).into_iter().map(|(age, _)| age).collect();
            assert_eq!(listed, expected, "round {round}");

            for (age, sample) in ages(&history) {
                assert_eq!(history.get(age).0, sample);
            }
            history.push(round + 100, 1);
        }
    }

    #[test]
    fn test_clear() {
        let mut history = History::<u16>::with_capacity(2).unwrap();
        history.push(7, 2);
        history.clear();
        assert_eq!(history.get(1), (0, 0));
        assert_eq!(history.get(2), (0, 0));
    }
}
