//! Period bookkeeping
//!
//! Consumes the detection stream of one engine and turns it into period
//! events: a loop begins, completes an iteration, is replaced by another loop
//! or ends. The tracker only counts; what to do at each boundary is up to the
//! caller.

use crate::state::{Detection, LoopState};
use serde::{Deserialize, Serialize};

/// Period boundary reported by [`LoopTracker::record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodEvent {
    /// A loop was confirmed
    Begin { size: u32, level: usize },
    /// The tracked loop completed another iteration
    Iteration {
        /// Iterations completed since the loop began
        iteration: u32,
        size: u32,
        level: usize,
        /// Calls observed during the finished iteration
        calls: u32,
    },
    /// The tracked loop ended and a new one began on the same call
    Restart {
        ended_iterations: u32,
        size: u32,
        level: usize,
    },
    /// The tracked loop ended
    End { iterations: u32 },
}

/// Loop currently being tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackedLoop {
    pub size: u32,
    pub level: usize,
}

/// Tracks iterations and call counts across detections
#[derive(Debug, Clone, Default)]
pub struct LoopTracker {
    in_loop: bool,
    iterations: u32,
    calls: u32,
    current: Option<TrackedLoop>,
}

impl LoopTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inside a confirmed loop
    #[inline]
    pub fn in_loop(&self) -> bool {
        self.in_loop
    }

    /// Iterations completed by the tracked loop
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Size and level of the tracked loop
    #[inline]
    pub fn current(&self) -> Option<TrackedLoop> {
        self.current
    }

    /// Calls seen since the last period boundary
    #[inline]
    pub fn calls_per_iteration(&self) -> u32 {
        self.calls
    }

    /// Account one call and its detection
    pub fn record(&mut self, detection: Detection) -> Option<PeriodEvent> {
        let Detection { state, size, level } = detection;

        let event = match state {
            LoopState::NoLoop | LoopState::InLoop => {
                self.calls = self.calls.saturating_add(1);
                return None;
            }
            LoopState::NewLoop => {
                self.begin(size, level);
                PeriodEvent::Begin { size, level }
            }
            LoopState::EndNewLoop => {
                let ended_iterations = self.iterations;
                self.begin(size, level);
                PeriodEvent::Restart {
                    ended_iterations,
                    size,
                    level,
                }
            }
            LoopState::NewIteration => {
                self.iterations = self.iterations.saturating_add(1);
                let calls = self.calls;
                self.calls = 1;
                let tracked = self.current.unwrap_or(TrackedLoop { size, level });
                PeriodEvent::Iteration {
                    iteration: self.iterations,
                    size: tracked.size,
                    level: tracked.level,
                    calls,
                }
            }
            LoopState::EndLoop => {
                let iterations = self.iterations;
                self.in_loop = false;
                self.iterations = 0;
                self.calls = 0;
                self.current = None;
                PeriodEvent::End { iterations }
            }
        };

        log::trace!("DynAIS period event {:?}", event);
        Some(event)
    }

    /// Back to the initial state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn begin(&mut self, size: u32, level: usize) {
        self.in_loop = true;
        self.iterations = 0;
        self.calls = 1;
        self.current = Some(TrackedLoop { size, level });
    }
}
