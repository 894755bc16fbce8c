//! Integration tests for file and environment based configuration

use native_mean::BenchmarkConfig;
use native_mean::config::{ConfigError, ENV_VARS, load_config};
use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

/// Helper to set environment variable for test
fn set_env(key: &str, value: &str) {
    unsafe {
        env::set_var(key, value);
    }
}

fn clear_all_native_mean_env_vars() {
    for key in ENV_VARS {
        unsafe {
            env::remove_var(key);
        }
    }
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("bench.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_defaults_when_nothing_set() {
    clear_all_native_mean_env_vars();

    let config = load_config(None).expect("defaults load");

    assert_eq!(config, BenchmarkConfig::default());
    assert_eq!(config.iterations, 10_000);
    assert_eq!(config.warmup_iterations, 100);
    assert_eq!(config.batch_size, 64);
    assert_eq!(config.max_duration, Duration::from_millis(500));
    assert!(config.check);
}

#[test]
#[serial]
fn test_partial_file_keeps_defaults() {
    clear_all_native_mean_env_vars();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "iterations": 42, "max_duration": "2s" }"#);

    let config = load_config(Some(&path)).unwrap();

    assert_eq!(config.iterations, 42);
    assert_eq!(config.max_duration, Duration::from_secs(2));
    assert_eq!(config.batch_size, 64);
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_all_native_mean_env_vars();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "iterations": 42, "check": true }"#);
    set_env("NATIVE_MEAN_ITERATIONS", "7");
    set_env("NATIVE_MEAN_CHECK", "false");
    set_env("NATIVE_MEAN_MAX_DURATION", "150ms");

    let config = load_config(Some(&path)).unwrap();

    assert_eq!(config.iterations, 7);
    assert!(!config.check);
    assert_eq!(config.max_duration, Duration::from_millis(150));

    clear_all_native_mean_env_vars();
}

#[test]
#[serial]
fn test_invalid_env_value_is_rejected() {
    clear_all_native_mean_env_vars();
    set_env("NATIVE_MEAN_BATCH_SIZE", "lots");

    let err = load_config(None).unwrap_err();
    match err {
        ConfigError::InvalidValue { key, value } => {
            assert_eq!(key, "NATIVE_MEAN_BATCH_SIZE");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other}"),
    }

    clear_all_native_mean_env_vars();
}

#[test]
#[serial]
fn test_missing_file_is_io_error() {
    clear_all_native_mean_env_vars();
    let dir = TempDir::new().unwrap();

    let err = load_config(Some(&dir.path().join("absent.json"))).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
#[serial]
fn test_malformed_file_is_parse_error() {
    clear_all_native_mean_env_vars();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "{ iterations: ");

    let err = load_config(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
