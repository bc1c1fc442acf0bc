//! Per-level matching
//!
//! Each level keeps a window of past `(sample, width)` observations and, for
//! every distance `d` into that window, the number of consecutive observations
//! that matched the one `d` positions earlier (the streak). A streak longer
//! than its distance means more than one full period of `d` has repeated.
//!
//! Streaks and accumulators are indexed by distance, so the distance of a run
//! is simply its index; index 0 is never used.

use crate::history::{History, Segment, try_filled};
use crate::sample::Sample;
use crate::state::LoopState;
use std::collections::TryReserveError;

/// Best matching run found by a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Candidate {
    streak: u32,
    distance: u32,
    accumulated: u32,
}

impl Candidate {
    /// Longest streak wins, ties go to the longest distance
    #[inline]
    fn beats(&self, other: &Candidate) -> bool {
        self.streak > other.streak || (self.streak == other.streak && self.distance > other.distance)
    }
}

/// State of one hierarchy level
#[derive(Debug, Clone)]
pub(crate) struct Level<S> {
    history: History<S>,
    /// Repeat streak per distance
    streaks: Box<[u32]>,
    /// Widths summed along each streak
    accumulated: Box<[u32]>,
    /// Receives promoted loops rather than raw markers
    promoted: bool,
    current_width: u32,
    fight: u32,
    previous_width: u32,
    previous_size: u32,
    result: LoopState,
}

impl<S: Sample> Level<S> {
    pub fn new(window: usize, promoted: bool) -> Result<Self, TryReserveError> {
        Ok(Self {
            history: History::with_capacity(window)?,
            streaks: try_filled(window, 0)?,
            accumulated: try_filled(window, 0)?,
            promoted,
            current_width: 0,
            fight: 0,
            previous_width: 0,
            previous_size: 0,
            result: LoopState::NoLoop,
        })
    }

    /// Last computed state
    #[inline]
    pub fn result(&self) -> LoopState {
        self.result
    }

    /// Size of the last loop confirmed at this level
    #[inline]
    pub fn previous_size(&self) -> u32 {
        self.previous_size
    }

    /// Clamp a one-shot result left over from an earlier sample
    #[inline]
    pub fn settle(&mut self) {
        self.result = self.result.settle();
    }

    /// Observe one `(sample, width)` pair and compute this level's state
    pub fn observe(&mut self, sample: S, width: u32) -> LoopState {
        let window = self.streaks.len() as u32;
        let best = self.scan(sample, width);

        let in_loop = if best.streak >= window {
            // The whole window repeats; keep the current period
            true
        } else {
            self.current_width = best.distance;
            self.current_width > 0 && best.streak > self.current_width
        };

        let width_changed = self.previous_width != self.current_width;

        if width_changed || self.fight == self.current_width {
            self.fight = 0;
        }

        let new_iteration = in_loop && (self.current_width == 1 || self.fight == 0);
        self.fight += in_loop as u32;

        let new_loop = new_iteration && width_changed;
        let end_loop = width_changed && self.previous_width != 0;

        if new_loop {
            self.previous_size = if self.promoted {
                best.accumulated.saturating_sub(width)
            } else {
                self.current_width
            };
            self.previous_width = self.current_width;
        }

        if !in_loop {
            self.fight = 0;
            self.previous_width = 0;
        }

        self.result = match (in_loop, new_iteration, new_loop, end_loop) {
            (false, _, _, true) => LoopState::EndLoop,
            (false, _, _, false) => LoopState::NoLoop,
            (true, false, _, _) => LoopState::InLoop,
            (true, true, false, _) => LoopState::NewIteration,
            (true, true, true, false) => LoopState::NewLoop,
            (true, true, true, true) => LoopState::EndNewLoop,
        };

        self.history.push(sample, width);
        self.result
    }

    /// Update every streak against the new observation and pick the best run
    fn scan(&mut self, sample: S, width: u32) -> Candidate {
        let cap = self.streaks.len() as u32;
        let mut best = Candidate::default();

        for segment in self.history.segments() {
            let Segment {
                first_age,
                samples,
                widths,
            } = segment;
            let end = first_age + samples.len();
            let streaks = &mut self.streaks[first_age..end];
            let accumulated = &mut self.accumulated[first_age..end];

            let runs = samples
                .iter()
                .zip(widths)
                .zip(streaks.iter_mut().zip(accumulated.iter_mut()));

            for (offset, ((&stored, &stored_width), (streak, total))) in runs.enumerate() {
                if stored == sample && stored_width == width {
                    *streak = (*streak + 1).min(cap);
                    *total = total.saturating_add(stored_width);
                } else {
                    *streak = 0;
                    *total = 0;
                }

                let distance = (first_age + offset) as u32;
                if distance >= *streak {
                    continue;
                }
                let candidate = Candidate {
                    streak: *streak,
                    distance,
                    accumulated: *total,
                };
                if candidate.beats(&best) {
                    best = candidate;
                }
            }
        }

        best
    }

    /// Back to the freshly allocated state
    pub fn reset(&mut self) {
        self.history.clear();
        self.streaks.fill(0);
        self.accumulated.fill(0);
        self.current_width = 0;
        self.fight = 0;
        self.previous_width = 0;
        self.previous_size = 0;
        self.result = LoopState::NoLoop;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(level: &mut Level<u32>, samples: &[u32]) -> Vec<LoopState> {
        samples.iter().map(|&s| level.observe(s, 1)).collect()
    }

    #[test]
    fn test_period_three() {
        let mut level = Level::<u32>::new(16, false).unwrap();
        let states = feed(&mut level, &[1, 2, 3, 1, 2, 3, 1, 2, 3, 1]);

        assert!(states[..6].iter().all(|&s| s == LoopState::NoLoop));
        assert_eq!(states[6], LoopState::NewLoop);
        assert_eq!(states[7], LoopState::InLoop);
        assert_eq!(states[8], LoopState::InLoop);
        assert_eq!(states[9], LoopState::NewIteration);
        assert_eq!(level.previous_size(), 3);
    }

    #[test]
    fn test_constant_input_iterates_every_sample() {
        let mut level = Level::<u32>::new(16, false).unwrap();
        let states = feed(&mut level, &[9; 40]);

        assert_eq!(states[0], LoopState::NoLoop);
        assert_eq!(states[1], LoopState::NoLoop);
        assert_eq!(states[2], LoopState::NewLoop);
        assert!(states[3..].iter().all(|&s| s == LoopState::NewIteration));
        assert_eq!(level.previous_size(), 1);
    }

    #[test]
    fn test_break_reports_end_loop() {
        let mut level = Level::<u32>::new(16, false).unwrap();
        feed(&mut level, &[1, 2, 1, 2, 1, 2]);
        assert_eq!(level.observe(7, 1), LoopState::EndLoop);
        assert_eq!(level.observe(8, 1), LoopState::NoLoop);
    }

    #[test]
    fn test_width_is_part_of_the_match() {
        let mut level = Level::<u32>::new(16, true).unwrap();
        for width in [1, 2, 3, 4, 5, 6, 7, 8] {
            assert_eq!(level.observe(5, width), LoopState::NoLoop);
        }
    }

    #[test]
    fn test_promoted_size_is_accumulated_extent() {
        let mut level = Level::<u32>::new(16, true).unwrap();
        let pattern = [(10, 3), (20, 4), (10, 3), (20, 4)];
        for (sample, width) in pattern {
            assert_eq!(level.observe(sample, width), LoopState::NoLoop);
        }
        assert_eq!(level.observe(10, 3), LoopState::NewLoop);
        assert_eq!(level.previous_size(), 7);
    }

    #[test]
    fn test_reset() {
        let mut level = Level::<u32>::new(16, false).unwrap();
        feed(&mut level, &[1, 2, 1, 2, 1, 2]);
        level.reset();
        assert_eq!(level.result(), LoopState::NoLoop);
        assert_eq!(level.previous_size(), 0);
        assert_eq!(level.observe(1, 1), LoopState::NoLoop);
    }
}
