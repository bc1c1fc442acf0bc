//! # ear-bench
//!
//! Performance benchmarks for the DynAIS loop detector.
//!
//! ## Benchmark Categories
//!
//! - **Feed**: per-marker cost across window sizes and level counts
//! - **Streams**: random, periodic and nested marker streams
//! - **Sample width**: u16 vs u32 vs u64 history elements
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p ear-bench
//!
//! # Run specific benchmark
//! cargo bench -p ear-bench -- feed_window
//!
//! # With baseline comparison
//! cargo bench -p ear-bench -- --save-baseline main
//! cargo bench -p ear-bench -- --baseline main
//! ```

pub mod generators;
pub mod utils;

pub use generators::*;
pub use utils::*;
