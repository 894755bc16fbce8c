//! Error types and utilities.
//!
//! Re-exports the error of every layer and unifies them for the CLI.

pub use crate::benchmarks::{BenchmarkError, ReportError};
pub use crate::config::ConfigError;
pub use native_mean_core::OperandError;

/// Any failure surfaced by the harness or the CLI
#[derive(Debug, thiserror::Error)]
pub enum NativeMeanError {
    #[error(transparent)]
    Operand(#[from] OperandError),
    #[error(transparent)]
    Benchmark(#[from] BenchmarkError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type NativeMeanResult<T> = Result<T, NativeMeanError>;
