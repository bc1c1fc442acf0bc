//! Fuzzing configuration

use serde::{Deserialize, Serialize};

/// Configuration for fuzzing runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzConfig {
    /// Number of fuzzing iterations
    pub iterations: usize,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Maximum markers per generated stream
    pub max_stream_len: usize,

    /// Largest window handed to an engine
    pub max_window: usize,

    /// Largest level count handed to an engine
    pub max_levels: usize,

    /// Distinct markers a generated stream draws from
    pub alphabet: u64,

    /// Whether to continue after first failure
    pub continue_on_failure: bool,

    /// Maximum failures before stopping
    pub max_failures: usize,

    /// Include boundary windows and level counts
    pub include_boundaries: bool,

    /// Verbosity level (0-3)
    pub verbosity: u8,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            iterations: 1_000,
            seed: None,
            max_stream_len: 2_048,
            max_window: 256,
            max_levels: 10,
            alphabet: 64,
            continue_on_failure: true,
            max_failures: 100,
            include_boundaries: true,
            verbosity: 1,
        }
    }
}

impl FuzzConfig {
    /// Quick config for CI
    pub fn ci() -> Self {
        Self {
            iterations: 200,
            max_stream_len: 1_024,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Exhaustive config for local runs
    pub fn exhaustive() -> Self {
        Self {
            iterations: 100_000,
            max_stream_len: 20_000,
            max_window: 2_048,
            verbosity: 2,
            ..Default::default()
        }
    }

    /// Minimal config for quick sanity checks
    pub fn minimal() -> Self {
        Self {
            iterations: 50,
            max_stream_len: 512,
            max_window: 64,
            ..Default::default()
        }
    }

    /// Builder: set iterations
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Builder: set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: set max stream length
    pub fn with_max_stream_len(mut self, len: usize) -> Self {
        self.max_stream_len = len;
        self
    }

    /// Builder: set max window
    pub fn with_max_window(mut self, window: usize) -> Self {
        self.max_window = window;
        self
    }

    /// Builder: set marker alphabet size
    pub fn with_alphabet(mut self, alphabet: u64) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Builder: set verbosity
    pub fn with_verbosity(mut self, level: u8) -> Self {
        self.verbosity = level;
        self
    }

    /// Builder: continue on failure
    pub fn continue_after_failures(mut self, cont: bool) -> Self {
        self.continue_on_failure = cont;
        self
    }
}
