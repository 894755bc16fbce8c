//! Harness configuration.
//!
//! Values come from an optional JSON file, then `NATIVE_MEAN_*` environment
//! variables override individual fields.

use crate::benchmarks::BenchmarkConfig;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const ENV_ITERATIONS: &str = "NATIVE_MEAN_ITERATIONS";
pub const ENV_WARMUP_ITERATIONS: &str = "NATIVE_MEAN_WARMUP_ITERATIONS";
pub const ENV_BATCH_SIZE: &str = "NATIVE_MEAN_BATCH_SIZE";
pub const ENV_MAX_DURATION: &str = "NATIVE_MEAN_MAX_DURATION";
pub const ENV_CHECK: &str = "NATIVE_MEAN_CHECK";

/// Every environment variable the harness reads
pub const ENV_VARS: [&str; 5] = [
    ENV_ITERATIONS,
    ENV_WARMUP_ITERATIONS,
    ENV_BATCH_SIZE,
    ENV_MAX_DURATION,
    ENV_CHECK,
];

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },
    #[error("Failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

/// Defaults, then the file at `path` if given, then environment overrides
pub fn load_config(path: Option<&Path>) -> Result<BenchmarkConfig, ConfigError> {
    let config = match path {
        Some(path) => config_from_file(path)?,
        None => BenchmarkConfig::default(),
    };
    apply_env_overrides(config)
}

/// Read a JSON config file; missing fields keep their defaults
pub fn config_from_file(path: &Path) -> Result<BenchmarkConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let config = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "Loaded benchmark config file");
    Ok(config)
}

/// Override fields from `NATIVE_MEAN_*` environment variables
pub fn apply_env_overrides(mut config: BenchmarkConfig) -> Result<BenchmarkConfig, ConfigError> {
    if let Some(iterations) = parse_env::<u32>(ENV_ITERATIONS)? {
        config.iterations = iterations;
    }
    if let Some(warmup) = parse_env::<u32>(ENV_WARMUP_ITERATIONS)? {
        config.warmup_iterations = warmup;
    }
    if let Some(batch_size) = parse_env::<u32>(ENV_BATCH_SIZE)? {
        config.batch_size = batch_size;
    }
    if let Some(max_duration) = env_value(ENV_MAX_DURATION) {
        config.max_duration = parse_duration(ENV_MAX_DURATION, &max_duration)?;
    }
    if let Some(check) = env_value(ENV_CHECK) {
        config.check = parse_bool(ENV_CHECK, &check)?;
    }
    Ok(config)
}

/// Parse a humantime duration such as `500ms` or `2s`
pub fn parse_duration(key: &str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|_| invalid(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    env_value(key)
        .map(|value| value.trim().parse::<T>().map_err(|_| invalid(key, &value)))
        .transpose()
}

fn env_value(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
