//! Fuzzing harness and runner

use crate::config::FuzzConfig;
use crate::generators::{StreamCase, StreamGenerator};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

/// Result of a fuzzing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzResult {
    /// Total iterations run
    pub iterations: usize,

    /// Number of successful iterations
    pub successes: usize,

    /// Number of failures
    pub failures: usize,

    /// Number of panics caught
    pub panics: usize,

    /// Total duration
    pub duration_ms: u64,

    /// Seed used (for reproducibility)
    pub seed: Option<u64>,

    /// List of failures with details
    pub failure_details: Vec<FuzzFailure>,

    /// Whether all iterations passed
    pub passed: bool,
}

/// Details of a fuzzing failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzFailure {
    /// Iteration number when failure occurred
    pub iteration: usize,

    /// Type of failure
    pub failure_type: FailureType,

    /// Description of the failure
    pub description: String,

    /// Input that caused the failure (debug-formatted)
    pub input: String,
}

/// Type of fuzzing failure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum FailureType {
    Panic,
    InvalidOutput,
}

/// Main fuzzing runner
pub struct FuzzRunner {
    config: FuzzConfig,
}

impl FuzzRunner {
    /// Create a new fuzzing runner
    pub fn new(config: FuzzConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FuzzConfig {
        &self.config
    }

    fn generator(&self) -> StreamGenerator {
        StreamGenerator::new(self.config.seed, self.config.alphabet)
            .with_boundaries(self.config.include_boundaries)
    }

    /// Fuzz with engine inputs drawn from the configured limits
    pub fn fuzz_streams<F, R>(&self, target: F) -> FuzzResult
    where
        F: Fn(StreamCase) -> R + panic::RefUnwindSafe,
    {
        let (max_window, max_levels, max_len) = (
            self.config.max_window,
            self.config.max_levels,
            self.config.max_stream_len,
        );
        self.fuzz_with_validation(
            |generator| generator.case(max_window, max_levels, max_len),
            target,
            |_, _| Ok(()),
        )
    }

    /// Fuzz with custom input generator
    pub fn fuzz_custom<I, F, G, R>(&self, input_gen: G, target: F) -> FuzzResult
    where
        I: std::fmt::Debug + Clone,
        G: Fn(&mut StreamGenerator) -> I,
        F: Fn(I) -> R + panic::RefUnwindSafe,
    {
        self.fuzz_with_validation(input_gen, target, |_, _| Ok(()))
    }

    /// Fuzz with output validation
    pub fn fuzz_with_validation<I, O, F, G, V>(
        &self,
        input_gen: G,
        target: F,
        validator: V,
    ) -> FuzzResult
    where
        I: std::fmt::Debug + Clone,
        G: Fn(&mut StreamGenerator) -> I,
        F: Fn(I) -> O + panic::RefUnwindSafe,
        V: Fn(&I, &O) -> Result<(), String>,
    {
        let mut generator = self.generator();

        let mut successes = 0;
        let mut failures = 0;
        let mut panics = 0;
        let mut failure_details = Vec::new();

        let start = Instant::now();

        for iteration in 0..self.config.iterations {
            if !self.config.continue_on_failure && failures > 0 {
                break;
            }
            if failure_details.len() >= self.config.max_failures {
                break;
            }

            let input = input_gen(&mut generator);
            let input_clone = input.clone();

            let result = panic::catch_unwind(AssertUnwindSafe(|| target(input)));

            let failure = match result {
                Ok(output) => match validator(&input_clone, &output) {
                    Ok(()) => None,
                    Err(description) => Some((FailureType::InvalidOutput, description)),
                },
                Err(payload) => {
                    panics += 1;
                    Some((FailureType::Panic, panic_message(payload.as_ref())))
                }
            };

            match failure {
                None => successes += 1,
                Some((failure_type, description)) => {
                    failures += 1;
                    if self.config.verbosity >= 1 {
                        log::warn!(
                            "{:?} at iteration {}: {}",
                            failure_type,
                            iteration,
                            description
                        );
                    }
                    failure_details.push(FuzzFailure {
                        iteration,
                        failure_type,
                        description,
                        input: format!("{:?}", input_clone),
                    });
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        FuzzResult {
            iterations: successes + failures,
            successes,
            failures,
            panics,
            duration_ms,
            seed: self.config.seed,
            failure_details,
            passed: failures == 0,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl FuzzResult {
    /// Check if the fuzzing run passed
    pub fn is_pass(&self) -> bool {
        self.passed
    }

    /// Get pass rate
    pub fn pass_rate(&self) -> f64 {
        if self.iterations == 0 {
            1.0
        } else {
            self.successes as f64 / self.iterations as f64
        }
    }

    /// Get iterations per second
    pub fn iterations_per_sec(&self) -> f64 {
        if self.duration_ms == 0 {
            0.0
        } else {
            self.iterations as f64 * 1000.0 / self.duration_ms as f64
        }
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        format!(
            "{} - {} iterations, {} failures ({:.2}% pass rate) in {}ms ({:.0} iter/s)",
            if self.passed { "PASS" } else { "FAIL" },
            self.iterations,
            self.failures,
            self.pass_rate() * 100.0,
            self.duration_ms,
            self.iterations_per_sec()
        )
    }
}
