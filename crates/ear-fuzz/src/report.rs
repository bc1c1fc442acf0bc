//! Report generation for fuzzing results

use crate::harness::FuzzResult;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Fuzzing report for multiple targets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FuzzReport {
    /// Report title
    pub title: String,

    /// Individual target results
    pub results: Vec<TargetResult>,

    /// Total statistics
    pub summary: FuzzSummary,
}

/// Result for a single fuzz target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetResult {
    pub name: String,
    pub result: FuzzResult,
}

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FuzzSummary {
    pub total_targets: usize,
    pub passed_targets: usize,
    pub failed_targets: usize,
    pub total_iterations: usize,
    pub total_failures: usize,
    pub total_panics: usize,
    pub total_duration_ms: u64,
}

/// Report output format
#[derive(Debug, Clone, Copy)]
pub enum ReportFormat {
    Text,
    Json,
}

impl FuzzReport {
    /// Create a new report
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Add a target result
    pub fn add_result(&mut self, name: impl Into<String>, result: FuzzResult) {
        self.summary.total_targets += 1;
        if result.passed {
            self.summary.passed_targets += 1;
        } else {
            self.summary.failed_targets += 1;
        }
        self.summary.total_iterations += result.iterations;
        self.summary.total_failures += result.failures;
        self.summary.total_panics += result.panics;
        self.summary.total_duration_ms += result.duration_ms;

        self.results.push(TargetResult {
            name: name.into(),
            result,
        });
    }

    /// Check if all targets passed
    pub fn all_passed(&self) -> bool {
        self.summary.failed_targets == 0
    }

    /// Generate text report
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "{}", self.title);
        let _ = writeln!(output, "{}\n", "=".repeat(self.title.len()));
        let _ = writeln!(
            output,
            "Targets: {} total, {} passed, {} failed",
            self.summary.total_targets, self.summary.passed_targets, self.summary.failed_targets
        );
        let _ = writeln!(
            output,
            "Iterations: {} total, {} failures, {} panics in {} ms\n",
            self.summary.total_iterations,
            self.summary.total_failures,
            self.summary.total_panics,
            self.summary.total_duration_ms
        );

        for target in &self.results {
            let status = if target.result.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(output, "[{}] {}", status, target.name);
            let _ = writeln!(output, "    {}", target.result.summary());

            for (i, failure) in target.result.failure_details.iter().take(5).enumerate() {
                let _ = writeln!(
                    output,
                    "      {}. {:?} at iteration {}: {}",
                    i + 1,
                    failure.failure_type,
                    failure.iteration,
                    failure.description
                );
            }
            if target.result.failure_details.len() > 5 {
                let _ = writeln!(
                    output,
                    "      ... and {} more failures",
                    target.result.failure_details.len() - 5
                );
            }
        }

        output
    }

    /// Generate JSON report
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".into())
    }

    /// Save report to file
    pub fn save<P: AsRef<Path>>(&self, path: P, format: ReportFormat) -> crate::Result<()> {
        let content = match format {
            ReportFormat::Text => self.to_text(),
            ReportFormat::Json => self.to_json(),
        };
        fs::write(path, content)?;
        Ok(())
    }
}
