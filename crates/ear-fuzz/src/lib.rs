//! # ear-fuzz
//!
//! Seeded fuzzing harness for the DynAIS engine.
//!
//! ## Features
//!
//! - **Stream Generation**: random, periodic, nested and phased marker streams
//! - **Reproducible Fuzzing**: every run is replayable from its seed
//! - **Crash Detection**: panics in the target are caught and reported
//! - **Property Testing**: outputs are checked by a validator
//!
//! ## Example
//!
//! ```rust
//! use ear_fuzz::{FuzzConfig, FuzzRunner};
//!
//! let runner = FuzzRunner::new(FuzzConfig::minimal().with_seed(7));
//! let result = runner.fuzz_streams(|case| case.markers.len());
//! assert!(result.is_pass(), "{}", result.summary());
//! ```

pub mod config;
pub mod generators;
pub mod harness;
pub mod report;

pub use config::FuzzConfig;
pub use generators::{StreamCase, StreamGenerator, StreamShape};
pub use harness::{FailureType, FuzzFailure, FuzzResult, FuzzRunner};
pub use report::{FuzzReport, ReportFormat};

use thiserror::Error;

/// Errors that can occur while fuzzing
#[derive(Error, Debug)]
pub enum FuzzError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FuzzError>;

/// Quick stream fuzz with CI settings
pub fn quick_fuzz<F, R>(iterations: usize, seed: u64, target: F) -> FuzzResult
where
    F: Fn(StreamCase) -> R + std::panic::RefUnwindSafe,
{
    let config = FuzzConfig::ci().with_iterations(iterations).with_seed(seed);
    FuzzRunner::new(config).fuzz_streams(target)
}
