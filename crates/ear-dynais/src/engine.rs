//! DynAIS Engine
//!
//! Owns one [`Level`] per hierarchy level, drives promotion of closed loops
//! from level to level and resolves the per-level states into the single
//! [`Detection`] handed back to the caller.
//!
//! One engine observes one execution stream. Engines share nothing, so one
//! per monitored thread or process can run in parallel.

use crate::config::DynaisConfig;
use crate::level::Level;
use crate::sample::{Sample, round_window};
use crate::state::{Detection, LoopState};
use crate::{DynaisError, DynaisResult, MAX_LEVELS, MAX_WINDOW};

/// Hierarchical loop detector
#[derive(Debug, Clone)]
pub struct Engine<S: Sample = u32> {
    /// Level 0 observes raw markers, level L+1 the loops closed at level L
    levels: Vec<Level<S>>,
    /// Effective window after rounding and clamping
    window: usize,
    /// Highest level ever reached by promotion
    topmost: usize,
}

impl<S: Sample> Engine<S> {
    /// Create an engine (`init`)
    ///
    /// `window` is rounded up to a multiple of `S::LANES` and clamped to
    /// [`MAX_WINDOW`]; `levels` is clamped to [`MAX_LEVELS`].
    pub fn new(window: usize, levels: usize) -> DynaisResult<Self> {
        debug_assert!(window > 0, "DynAIS window must be > 0");
        debug_assert!(levels > 0, "DynAIS levels must be > 0");

        let requested = window;
        let window = round_window::<S>(window.max(1)).min(MAX_WINDOW);
        let depth = levels.clamp(1, MAX_LEVELS);
        let allocation = DynaisError::Allocation {
            window,
            levels: depth,
        };

        let mut stack = Vec::new();
        if stack.try_reserve_exact(depth).is_err() {
            return Err(allocation);
        }
        for level in 0..depth {
            match Level::new(window, level > 0) {
                Ok(state) => stack.push(state),
                Err(_) => return Err(allocation),
            }
        }

        log::debug!(
            "DynAIS init: window {} ({} requested), levels {} ({} requested), {}-bit samples",
            window,
            requested,
            depth,
            levels,
            std::mem::size_of::<S>() * 8
        );

        Ok(Self {
            levels: stack,
            window,
            topmost: 0,
        })
    }

    /// Create an engine from a configuration
    pub fn from_config(config: &DynaisConfig) -> DynaisResult<Self> {
        Self::new(config.window, config.levels)
    }

    /// Effective window per level
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of hierarchy levels
    #[inline]
    pub fn levels(&self) -> usize {
        self.levels.len()
    }

    /// Highest level reached so far
    #[inline]
    pub fn topmost(&self) -> usize {
        self.topmost
    }

    /// Stored state of one level
    pub fn level_state(&self, level: usize) -> Option<LoopState> {
        self.levels.get(level).map(Level::result)
    }

    /// Size of the last loop confirmed at one level
    pub fn level_size(&self, level: usize) -> Option<u32> {
        self.levels.get(level).map(Level::previous_size)
    }

    /// Feed one raw marker
    #[inline]
    pub fn feed(&mut self, sample: S) -> Detection {
        self.feed_sized(sample, 1)
    }

    /// Feed a 64-bit marker folded to the sample width
    #[inline]
    pub fn feed_event(&mut self, event: u64) -> Detection {
        self.feed(S::fold(event))
    }

    /// Feed one marker with an explicit width
    ///
    /// External callers always use width 1; larger widths are what promotion
    /// injects into upper levels.
    pub fn feed_sized(&mut self, sample: S, width: u32) -> Detection {
        debug_assert!(width > 0, "DynAIS width must be > 0");

        let reach = self.promote(sample, width.max(1), 0);
        self.topmost = self.topmost.max(reach);

        for level in &mut self.levels[reach + 1..=self.topmost] {
            level.settle();
        }

        self.resolve()
    }

    /// Run `level` and hand closed loops upwards; returns the last level run
    fn promote(&mut self, sample: S, width: u32, level: usize) -> usize {
        let mut level = level;
        let mut width = width;

        loop {
            if level >= self.levels.len() {
                return level - 1;
            }

            let state = self.levels[level].observe(sample, width);
            if state < LoopState::NewLoop {
                return level;
            }

            width = self.levels[level].previous_size();
            log::trace!("DynAIS level {} closed a loop of size {}", level, width);
            level += 1;
        }
    }

    /// Reduce the per-level states to one detection
    fn resolve(&self) -> Detection {
        let mut end_seen = false;

        for l in (0..=self.topmost).rev() {
            let state = self.levels[l].result();
            end_seen |= state == LoopState::EndLoop;

            if !state.is_looping() {
                continue;
            }

            let size = self.levels[l].previous_size();
            if end_seen {
                return Detection::new(LoopState::EndNewLoop, size, l);
            }

            if state == LoopState::NewLoop {
                // A new loop only stands if every level below closed one too
                for below in self.levels[..l].iter().rev() {
                    end_seen |= below.result() == LoopState::EndNewLoop;
                    if below.result() < LoopState::NewLoop {
                        return Detection::new(LoopState::InLoop, size, l);
                    }
                }
            }

            let state = if end_seen {
                LoopState::EndNewLoop
            } else {
                state
            };
            return Detection::new(state, size, l);
        }

        Detection::none(if end_seen {
            LoopState::EndLoop
        } else {
            LoopState::NoLoop
        })
    }

    /// Forget everything observed so far, keeping the buffers
    pub fn reset(&mut self) {
        for level in &mut self.levels {
            level.reset();
        }
        self.topmost = 0;
        log::debug!("DynAIS reset: window {}, levels {}", self.window, self.levels.len());
    }

    /// Release the engine (`dispose`)
    pub fn dispose(self) {
        log::debug!(
            "DynAIS dispose: window {}, levels {}, topmost {}",
            self.window,
            self.levels.len(),
            self.topmost
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rounding_and_clamping() {
        assert_eq!(Engine::<u32>::new(32, 2).unwrap().window(), 32);
        assert_eq!(Engine::<u32>::new(33, 2).unwrap().window(), 48);
        assert_eq!(Engine::<u16>::new(200, 2).unwrap().window(), 224);
        assert_eq!(Engine::<u32>::new(1_000_000, 1).unwrap().window(), MAX_WINDOW);
    }

    #[test]
    fn test_levels_clamped() {
        assert_eq!(Engine::<u32>::new(16, 64).unwrap().levels(), MAX_LEVELS);
        assert_eq!(Engine::<u32>::new(16, 3).unwrap().levels(), 3);
    }

    #[test]
    fn test_single_level_reports_loops() {
        let mut engine = Engine::<u32>::new(16, 1).unwrap();
        let detections: Vec<_> = [1, 2, 1, 2, 1].iter().map(|&s| engine.feed(s)).collect();

        assert_eq!(detections[3].state, LoopState::NoLoop);
        assert_eq!(detections[4], Detection::new(LoopState::NewLoop, 2, 0));
        assert_eq!(engine.topmost(), 0);
    }

    #[test]
    fn test_promotion_reaches_next_level() {
        let mut engine = Engine::<u32>::new(16, 3).unwrap();
        for &s in &[1, 2, 1, 2, 1] {
            engine.feed(s);
        }
        assert_eq!(engine.topmost(), 1);
        assert_eq!(engine.level_state(0), Some(LoopState::NewLoop));
        assert_eq!(engine.level_state(1), Some(LoopState::NoLoop));
        assert_eq!(engine.level_state(3), None);
    }

    #[test]
    fn test_end_loop_without_other_loops() {
        let mut engine = Engine::<u32>::new(16, 1).unwrap();
        for &s in &[1, 2, 1, 2, 1, 2] {
            engine.feed(s);
        }
        assert_eq!(engine.feed(99), Detection::none(LoopState::EndLoop));
        assert_eq!(engine.feed(98), Detection::none(LoopState::NoLoop));
    }

    #[test]
    fn test_reset_matches_fresh_engine() {
        let stream: Vec<u32> = (0..200).map(|i| [4, 5, 6, 4, 7][i % 5]).collect();

        let mut used = Engine::<u32>::new(32, 3).unwrap();
        for &s in &stream {
            used.feed(s);
        }
        used.reset();
        assert_eq!(used.topmost(), 0);

        let mut fresh = Engine::<u32>::new(32, 3).unwrap();
        for &s in &stream {
            assert_eq!(used.feed(s), fresh.feed(s));
        }
    }

    #[test]
    fn test_from_config() {
        let config = DynaisConfig::default().with_window(20).with_levels(4);
        let engine = Engine::<u64>::from_config(&config).unwrap();
        assert_eq!(engine.window(), 24);
        assert_eq!(engine.levels(), 4);
        engine.dispose();
    }
}
