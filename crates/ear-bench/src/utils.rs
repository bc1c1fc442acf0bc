//! Benchmark utilities

use ear_dynais::{Engine, Sample};
use std::time::{Duration, Instant};

/// Throughput metrics for marker processing
#[derive(Debug, Clone)]
pub struct ThroughputMetrics {
    /// Markers processed per second
    pub markers_per_sec: f64,
    /// Time per marker in nanoseconds
    pub ns_per_marker: f64,
    /// Share of the per-call budget spent in `feed` (<1.0 fits the budget)
    pub budget_ratio: f64,
}

impl ThroughputMetrics {
    /// Calculate metrics from benchmark results
    ///
    /// `budget_ns` is the time an instrumented call may spend in detection.
    pub fn from_benchmark(markers: usize, duration: Duration, budget_ns: f64) -> Self {
        let markers = markers.max(1) as f64;
        let secs = duration.as_secs_f64();
        let ns_per_marker = duration.as_nanos() as f64 / markers;
        let markers_per_sec = if secs > 0.0 { markers / secs } else { f64::INFINITY };

        Self {
            markers_per_sec,
            ns_per_marker,
            budget_ratio: ns_per_marker / budget_ns,
        }
    }

    /// Check if `feed` fits the per-call budget
    pub fn within_budget(&self) -> bool {
        self.budget_ratio < 1.0
    }

    /// Print summary
    pub fn summary(&self) -> String {
        format!(
            "{:.2} M markers/s ({:.1}ns/marker), {:.2}x budget",
            self.markers_per_sec / 1_000_000.0,
            self.ns_per_marker,
            self.budget_ratio
        )
    }
}

/// Simple benchmark runner for quick measurements
pub struct QuickBench {
    iterations: usize,
}

impl QuickBench {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    /// Run benchmark and return average duration
    pub fn run<F>(&self, mut f: F) -> Duration
    where
        F: FnMut(),
    {
        // Warmup
        for _ in 0..10 {
            f();
        }

        let start = Instant::now();
        for _ in 0..self.iterations {
            f();
        }
        start.elapsed() / self.iterations as u32
    }

    /// Average cost of feeding `stream` to a fresh engine
    pub fn feed_metrics<S: Sample>(
        &self,
        window: usize,
        levels: usize,
        stream: &[S],
        budget_ns: f64,
    ) -> ear_dynais::DynaisResult<ThroughputMetrics> {
        let mut engine = Engine::<S>::new(window, levels)?;
        let duration = self.run(|| {
            engine.reset();
            for &sample in stream {
                black_box(engine.feed(sample));
            }
        });
        Ok(ThroughputMetrics::from_benchmark(stream.len(), duration, budget_ns))
    }
}

/// Black box to prevent compiler optimizations
#[inline(never)]
pub fn black_box<T>(x: T) -> T {
    std::hint::black_box(x)
}

/// Calculate overhead percentage
pub fn overhead_percent(baseline: Duration, measured: Duration) -> f64 {
    ((measured.as_nanos() as f64 / baseline.as_nanos().max(1) as f64) - 1.0) * 100.0
}
