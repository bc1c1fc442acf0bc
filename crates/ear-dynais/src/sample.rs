//! Sample element width
//!
//! The engine stores one sample per history slot. Narrow samples keep the
//! per-level buffers small and let the scan cover more slots per vector
//! register; wide samples reduce aliasing between unrelated markers.

use std::fmt::Debug;

/// Element type stored in the per-level history
pub trait Sample: Copy + Eq + Default + Debug + Send + Sync + 'static {
    /// Lanes of one 512-bit register; the window is rounded up to a multiple
    const LANES: usize;

    /// Reduce a 64-bit execution marker to this width
    fn fold(event: u64) -> Self;
}

impl Sample for u16 {
    const LANES: usize = 32;

    #[inline]
    fn fold(event: u64) -> Self {
        let half = (event >> 32) ^ (event & 0xFFFF_FFFF);
        ((half >> 16) ^ (half & 0xFFFF)) as u16
    }
}

impl Sample for u32 {
    const LANES: usize = 16;

    #[inline]
    fn fold(event: u64) -> Self {
        ((event >> 32) ^ (event & 0xFFFF_FFFF)) as u32
    }
}

impl Sample for u64 {
    const LANES: usize = 8;

    #[inline]
    fn fold(event: u64) -> Self {
        event
    }
}

/// Round `window` up to the next multiple of `S::LANES`
#[inline]
pub(crate) fn round_window<S: Sample>(window: usize) -> usize {
    window.div_ceil(S::LANES) * S::LANES
}
