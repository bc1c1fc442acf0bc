//! # DynAIS - Dynamic Application Iterative Structure detection
//!
//! Online loop detector for the EAR energy-management runtime. The engine is
//! fed one execution marker per observed event (an intercepted call, a sampled
//! code address) and answers, for every marker, whether the application is
//! inside a loop, has just started a new iteration, or has just entered or
//! left a loop.
//!
//! ## Architecture
//!
//! ```text
//! marker ──▶ level 0 ──NEW_LOOP──▶ level 1 ──NEW_LOOP──▶ ... level N-1
//!              │                     │                        │
//!              └──────── per-level results (stale ones clamped) ┘
//!                                    │
//!                               resolver ──▶ (state, size, governing level)
//! ```
//!
//! - **Level**: a fixed window of past observations plus per-distance repeat
//!   streaks. A level is in a loop once a streak covers more than one period.
//! - **Promotion**: a loop closed at level L is fed to level L+1 as a single
//!   observation whose width is the loop extent, so loops of loops are found.
//! - **Resolver**: reduces all level results to a single state.
//!
//! ## Usage
//!
//! ```rust
//! use ear_dynais::{Engine, LoopState};
//!
//! let mut engine = Engine::<u32>::new(32, 2).unwrap();
//! let mut states = Vec::new();
//! for _ in 0..10 {
//!     for marker in [0xA, 0xB, 0xC] {
//!         states.push(engine.feed(marker));
//!     }
//! }
//! let first = states.iter().find(|d| d.state == LoopState::NewLoop).unwrap();
//! assert_eq!(first.size, 3);
//! assert_eq!(first.level, 0);
//! ```
//!
//! ## Real-Time Safety
//!
//! All buffers are allocated by [`Engine::new`]. [`Engine::feed`] performs
//! `O(window × levels)` work, never allocates and never blocks.

pub mod config;
pub mod engine;
pub mod sample;
pub mod state;
pub mod tracker;

mod error;
mod history;
mod level;

pub use config::DynaisConfig;
pub use engine::Engine;
pub use error::{DynaisError, DynaisResult};
pub use sample::Sample;
pub use state::{Detection, LoopState};
pub use tracker::{LoopTracker, PeriodEvent, TrackedLoop};

/// Upper bound for the number of hierarchy levels
pub const MAX_LEVELS: usize = 10;

/// Upper bound for the per-level window (observations kept per level)
pub const MAX_WINDOW: usize = 40_000;

/// Default per-level window
pub const DEFAULT_WINDOW: usize = 200;

/// Default number of hierarchy levels
pub const DEFAULT_LEVELS: usize = 10;
