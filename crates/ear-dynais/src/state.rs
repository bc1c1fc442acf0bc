//! Loop states and detection results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Loop state reported per level and for the whole engine
///
/// Variants are declared in code order, so comparisons follow the numeric
/// codes (`EndLoop < NoLoop < InLoop < ...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum LoopState {
    /// The loop that was being observed stopped repeating
    EndLoop = -1,
    /// No repetition observed
    NoLoop = 0,
    /// Inside a loop, mid iteration
    InLoop = 1,
    /// Inside a loop, at an iteration boundary
    NewIteration = 2,
    /// A loop with a new period was just confirmed
    NewLoop = 3,
    /// A loop ended and a different one was confirmed on the same sample
    EndNewLoop = 4,
}

impl LoopState {
    /// Numeric state code
    #[inline]
    pub fn code(self) -> i8 {
        self as i8
    }

    /// State for a numeric code
    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(Self::EndLoop),
            0 => Some(Self::NoLoop),
            1 => Some(Self::InLoop),
            2 => Some(Self::NewIteration),
            3 => Some(Self::NewLoop),
            4 => Some(Self::EndNewLoop),
            _ => None,
        }
    }

    /// Upper-case name used in traces
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EndLoop => "END_LOOP",
            Self::NoLoop => "NO_LOOP",
            Self::InLoop => "IN_LOOP",
            Self::NewIteration => "NEW_ITERATION",
            Self::NewLoop => "NEW_LOOP",
            Self::EndNewLoop => "END_NEW_LOOP",
        }
    }

    /// In a loop (any state from `InLoop` upwards)
    #[inline]
    pub fn is_looping(self) -> bool {
        self >= Self::InLoop
    }

    /// Signals the end of a loop (`EndLoop` or `EndNewLoop`)
    #[inline]
    pub fn is_end(self) -> bool {
        matches!(self, Self::EndLoop | Self::EndNewLoop)
    }

    /// Demote a one-shot signal to its steady counterpart
    ///
    /// Applied to levels that were not recomputed on the current sample.
    #[inline]
    pub(crate) fn settle(self) -> Self {
        self.clamp(Self::NoLoop, Self::InLoop)
    }
}

impl Default for LoopState {
    fn default() -> Self {
        Self::NoLoop
    }
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of feeding one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Detection {
    /// Composite state
    pub state: LoopState,
    /// Loop size at the governing level (0 when not in a loop)
    pub size: u32,
    /// Governing level (0 when not in a loop)
    pub level: usize,
}

impl Detection {
    /// Create a detection result
    pub fn new(state: LoopState, size: u32, level: usize) -> Self {
        Self { state, size, level }
    }

    /// No loop anywhere
    pub fn none(state: LoopState) -> Self {
        Self::new(state, 0, 0)
    }

    /// Whether the result should trigger a signature recomputation
    pub fn triggers_signature(&self) -> bool {
        matches!(
            self.state,
            LoopState::NewLoop | LoopState::NewIteration | LoopState::EndNewLoop
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for code in -1..=4 {
            let state = LoopState::from_code(code).unwrap();
            assert_eq!(state.code(), code);
        }
        assert_eq!(LoopState::from_code(5), None);
        assert_eq!(LoopState::from_code(-2), None);
    }

    #[test]
    fn test_ordering_follows_codes() {
        assert!(LoopState::EndLoop < LoopState::NoLoop);
        assert!(LoopState::NewLoop < LoopState::EndNewLoop);
        assert!(LoopState::NewIteration.is_looping());
        assert!(!LoopState::NoLoop.is_looping());
    }

    #[test]
    fn test_settle() {
        assert_eq!(LoopState::EndLoop.settle(), LoopState::NoLoop);
        assert_eq!(LoopState::NoLoop.settle(), LoopState::NoLoop);
        assert_eq!(LoopState::InLoop.settle(), LoopState::InLoop);
        assert_eq!(LoopState::NewIteration.settle(), LoopState::InLoop);
        assert_eq!(LoopState::NewLoop.settle(), LoopState::InLoop);
        assert_eq!(LoopState::EndNewLoop.settle(), LoopState::InLoop);
    }

    #[test]
    fn test_triggers() {
        assert!(Detection::new(LoopState::NewLoop, 3, 0).triggers_signature());
        assert!(Detection::new(LoopState::EndNewLoop, 3, 0).triggers_signature());
        assert!(!Detection::none(LoopState::EndLoop).triggers_signature());
        assert!(!Detection::new(LoopState::InLoop, 3, 0).triggers_signature());
    }

    #[test]
    fn test_display() {
        assert_eq!(LoopState::EndNewLoop.to_string(), "END_NEW_LOOP");
    }
}
