//! Comparison Benchmark Framework
//!
//! Times mean implementations over fixed operands. Each sample covers a
//! batch of calls so that per-call costs below the clock resolution still
//! register.

use native_mean_core::MeanImpl;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Relative tolerance used when checking that expressions agree
pub const CHECK_TOLERANCE: f64 = 1.5e-8;

/// Upper bound on the sample buffer reserved up front; it grows past this on demand
const MAX_PREALLOCATED_SAMPLES: u32 = 100_000;

/// Duration as a humantime string, e.g. `"500ms"`
mod humantime_serde {
    use super::*;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}

/// Duration as whole nanoseconds
mod nanos_serde {
    use super::*;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}

/// Configuration for benchmark execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Maximum number of timed samples
    pub iterations: u32,
    /// Untimed calls before measurement
    pub warmup_iterations: u32,
    /// Calls per timed sample
    pub batch_size: u32,
    /// Time budget for the timed phase
    #[serde(with = "humantime_serde")]
    pub max_duration: Duration,
    /// Require every compared expression to return the same value
    pub check: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            warmup_iterations: 100,
            batch_size: 64,
            max_duration: Duration::from_millis(500),
            check: true,
        }
    }
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), BenchmarkError> {
        if self.iterations == 0 {
            return Err(BenchmarkError::Configuration(
                "iterations must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(BenchmarkError::Configuration(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of benchmarking one expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Host expression, e.g. `cpp_mean(1, 2)`
    pub expression: String,
    /// Implementation behind the expression, when it is a mean implementation
    pub implementation: Option<MeanImpl>,
    /// Value the expression returned (NaN is stored as absent)
    pub value: Option<f64>,
    /// Execution statistics
    pub stats: ExecutionStats,
    /// Calls per second at the median; absent when the median is zero
    pub iterations_per_second: Option<f64>,
    /// Timestamp when benchmark was executed
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Execution statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStats {
    /// Number of timed samples
    pub samples: u32,
    /// Calls per sample
    pub batch_size: u32,
    /// Wall time of the timed phase
    #[serde(with = "nanos_serde")]
    pub total_duration: Duration,
    /// Per-call time of every sample in nanoseconds, sorted ascending
    pub sample_nanos: Vec<f64>,
    /// Calculated percentiles
    pub percentiles: Percentiles,
}

impl ExecutionStats {
    /// Total number of calls made during the timed phase
    pub fn total_calls(&self) -> u64 {
        u64::from(self.samples) * u64::from(self.batch_size)
    }
}

/// Per-call percentile values in nanoseconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    pub min: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub max: f64,
    pub mean: f64,
}

/// Main benchmark framework
#[derive(Debug, Clone)]
pub struct BenchmarkFramework {
    config: BenchmarkConfig,
}

impl BenchmarkFramework {
    /// Create a framework, rejecting unusable configurations
    pub fn new(config: BenchmarkConfig) -> Result<Self, BenchmarkError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Time `benchmark_fn` under the framework configuration
    pub fn execute_benchmark<F, R>(
        &self,
        expression: impl Into<String>,
        mut benchmark_fn: F,
    ) -> Result<BenchmarkResult, BenchmarkError>
    where
        F: FnMut() -> R,
    {
        let config = &self.config;
        let expression = expression.into();

        tracing::debug!(
            expression = %expression,
            iterations = config.iterations,
            batch_size = config.batch_size,
            "Starting benchmark"
        );

        for _ in 0..config.warmup_iterations {
            black_box(benchmark_fn());
        }

        let start_time = Instant::now();
        let mut sample_nanos =
            Vec::with_capacity(config.iterations.min(MAX_PREALLOCATED_SAMPLES) as usize);
        let batch = f64::from(config.batch_size);

        for i in 0..config.iterations {
            let sample_start = Instant::now();
            for _ in 0..config.batch_size {
                black_box(benchmark_fn());
            }
            sample_nanos.push(sample_start.elapsed().as_nanos() as f64 / batch);

            if start_time.elapsed() > config.max_duration {
                tracing::warn!(
                    "Benchmark '{}' exceeded max duration, stopping at sample {}/{}",
                    expression,
                    i + 1,
                    config.iterations
                );
                break;
            }
        }

        let total_duration = start_time.elapsed();
        let stats = calculate_stats(sample_nanos, config.batch_size, total_duration);
        let iterations_per_second =
            (stats.percentiles.p50 > 0.0).then_some(1_000_000_000.0 / stats.percentiles.p50);

        tracing::info!(
            expression = %expression,
            samples = stats.samples,
            median_ns = stats.percentiles.p50,
            "Benchmark finished"
        );

        Ok(BenchmarkResult {
            expression,
            implementation: None,
            value: None,
            stats,
            iterations_per_second,
            timestamp: chrono::Utc::now(),
        })
    }

    /// Benchmark each implementation on `(a, b)`, results in input order
    pub fn compare(
        &self,
        a: f64,
        b: f64,
        implementations: &[MeanImpl],
    ) -> Result<Vec<BenchmarkResult>, BenchmarkError> {
        let Some((&first, rest)) = implementations.split_first() else {
            return Err(BenchmarkError::Configuration(
                "no implementations to compare".to_string(),
            ));
        };

        if self.config.check {
            let expected = first.evaluate(a, b);
            for &implementation in rest {
                let actual = implementation.evaluate(a, b);
                if !values_agree(expected, actual) {
                    return Err(BenchmarkError::ResultMismatch {
                        expression: implementation.expression(a, b),
                        expected,
                        actual,
                    });
                }
            }
        }

        implementations
            .iter()
            .map(|&implementation| {
                let mut result = self.execute_benchmark(implementation.expression(a, b), || {
                    implementation.evaluate(black_box(a), black_box(b))
                })?;
                let value = implementation.evaluate(a, b);
                result.implementation = Some(implementation);
                result.value = (!value.is_nan()).then_some(value);
                Ok(result)
            })
            .collect()
    }
}

/// Whether two results count as the same value.
///
/// NaN matches NaN, infinities must be identical, and finite values may
/// differ by `CHECK_TOLERANCE` relative to the expected magnitude.
pub fn values_agree(expected: f64, actual: f64) -> bool {
    if expected.is_nan() || actual.is_nan() {
        return expected.is_nan() && actual.is_nan();
    }
    if expected == actual {
        return true;
    }
    if !expected.is_finite() || !actual.is_finite() {
        return false;
    }

    let scale = expected.abs();
    let difference = (expected - actual).abs();
    if scale > 0.0 {
        difference / scale <= CHECK_TOLERANCE
    } else {
        difference <= CHECK_TOLERANCE
    }
}

/// Calculate execution statistics from raw per-call samples
fn calculate_stats(
    mut sample_nanos: Vec<f64>,
    batch_size: u32,
    total_duration: Duration,
) -> ExecutionStats {
    sample_nanos.sort_by(f64::total_cmp);

    let len = sample_nanos.len();
    let percentiles = if len > 0 {
        Percentiles {
            min: sample_nanos[0],
            p50: sample_nanos[len * 50 / 100],
            p95: sample_nanos[len * 95 / 100],
            p99: sample_nanos[len * 99 / 100],
            max: sample_nanos[len - 1],
            mean: sample_nanos.iter().sum::<f64>() / len as f64,
        }
    } else {
        Percentiles::default()
    };

    ExecutionStats {
        samples: len as u32,
        batch_size,
        total_duration,
        sample_nanos,
        percentiles,
    }
}

/// Benchmark execution errors
#[derive(Debug, thiserror::Error)]
pub enum BenchmarkError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Result mismatch in '{expression}': expected {expected}, got {actual}")]
    ResultMismatch {
        expression: String,
        expected: f64,
        actual: f64,
    },
}
