pub mod benchmarks;
pub mod config;
pub mod error;

pub use benchmarks::{BenchmarkConfig, BenchmarkFramework, BenchmarkReport, ReportFormat};
pub use error::{NativeMeanError, NativeMeanResult};
pub use native_mean_core::{Average, MeanImpl, OperandError, mean, parse_operand, reference_mean};
