//! Native vs Reference Mean Benchmarks
//!
//! Reproduces the host benchmark script in Rust: evaluate `cpp_mean(1, 2)`
//! and `mean(c(1, 2))`, check that they agree, time both and report how
//! their medians compare.
//!
//! ## Key Components
//! - **Framework**: batched sampling with percentile statistics
//! - **Reporting**: table, JSON and Markdown output

pub mod framework;
pub mod reporting;

pub use framework::{
    BenchmarkConfig, BenchmarkError, BenchmarkFramework, BenchmarkResult, ExecutionStats,
    Percentiles, values_agree,
};
pub use reporting::{BenchmarkReport, RelativeTiming, ReportError, ReportFormat, ReportSummary};
