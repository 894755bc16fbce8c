//! `native-mean bench`: CLI flags layered over the harness configuration.

use native_mean::config::{load_config, parse_duration};
use native_mean::{
    BenchmarkConfig, BenchmarkFramework, BenchmarkReport, MeanImpl, NativeMeanResult,
    ReportFormat, parse_operand,
};
use std::path::PathBuf;

#[derive(Debug)]
pub struct BenchArgs {
    pub x: String,
    pub y: String,
    pub iterations: Option<u32>,
    pub warmup: Option<u32>,
    pub batch_size: Option<u32>,
    pub max_duration: Option<String>,
    pub no_check: bool,
    pub only: Option<MeanImpl>,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Resolve the effective configuration: file, environment, then flags
fn resolve_config(args: &BenchArgs) -> NativeMeanResult<BenchmarkConfig> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(warmup) = args.warmup {
        config.warmup_iterations = warmup;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(ref max_duration) = args.max_duration {
        config.max_duration = parse_duration("--max-duration", max_duration)?;
    }
    if args.no_check {
        config.check = false;
    }

    Ok(config)
}

/// Run the comparison and return the rendered report
pub fn build_report(args: &BenchArgs) -> NativeMeanResult<BenchmarkReport> {
    let x = parse_operand(&args.x)?;
    let y = parse_operand(&args.y)?;
    let config = resolve_config(args)?;

    let implementations: Vec<MeanImpl> = match args.only {
        Some(implementation) => vec![implementation],
        None => MeanImpl::ALL.to_vec(),
    };

    tracing::info!(
        x,
        y,
        iterations = config.iterations,
        batch_size = config.batch_size,
        check = config.check,
        "Running mean comparison"
    );

    let framework = BenchmarkFramework::new(config)?;
    let results = framework.compare(x, y, &implementations)?;
    Ok(BenchmarkReport::new(results))
}

pub fn run_bench_command(args: BenchArgs) -> NativeMeanResult<()> {
    let report = build_report(&args)?;

    match args.output {
        Some(ref path) => {
            report.save_to_file(path, args.format)?;
            tracing::info!(path = %path.display(), "Report written");
        }
        None => print!("{}", report.render(args.format)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use native_mean::config::{ENV_CHECK, ENV_ITERATIONS, ENV_VARS};
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn clear_all_native_mean_env_vars() {
        for key in ENV_VARS {
            unsafe {
                env::remove_var(key);
            }
        }
    }

    fn quick_args() -> BenchArgs {
        BenchArgs {
            x: "1".to_string(),
            y: "2".to_string(),
            iterations: Some(20),
            warmup: Some(2),
            batch_size: Some(4),
            max_duration: Some("5s".to_string()),
            no_check: false,
            only: None,
            format: ReportFormat::Json,
            output: None,
            config: None,
        }
    }

    #[test]
    #[serial]
    fn test_flags_override_config() {
        clear_all_native_mean_env_vars();
        let config = resolve_config(&quick_args()).unwrap();
        assert_eq!(config.iterations, 20);
        assert_eq!(config.warmup_iterations, 2);
        assert_eq!(config.batch_size, 4);
        assert!(config.check);
    }

    #[test]
    #[serial]
    fn test_flags_win_over_environment() {
        clear_all_native_mean_env_vars();
        unsafe {
            env::set_var(ENV_ITERATIONS, "3");
            env::set_var(ENV_CHECK, "false");
        }

        let config = resolve_config(&quick_args());

        clear_all_native_mean_env_vars();
        let config = config.unwrap();
        assert_eq!(config.iterations, 20);
        // No flag for check, so the environment value stands.
        assert!(!config.check);
    }

    #[test]
    #[serial]
    fn test_invalid_max_duration_flag() {
        clear_all_native_mean_env_vars();
        let args = BenchArgs {
            max_duration: Some("forever".to_string()),
            ..quick_args()
        };
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    #[serial]
    fn test_report_covers_both_expressions() {
        clear_all_native_mean_env_vars();
        let report = build_report(&quick_args()).unwrap();
        let expressions: Vec<&str> = report
            .results
            .iter()
            .map(|r| r.expression.as_str())
            .collect();
        assert_eq!(expressions, ["cpp_mean(1, 2)", "mean(c(1, 2))"]);
    }

    #[test]
    #[serial]
    fn test_only_runs_one_implementation() {
        clear_all_native_mean_env_vars();
        let args = BenchArgs {
            only: Some(MeanImpl::Native),
            ..quick_args()
        };
        let report = build_report(&args).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].implementation, Some(MeanImpl::Native));
    }

    #[test]
    #[serial]
    fn test_writes_report_file() {
        clear_all_native_mean_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let args = BenchArgs {
            output: Some(path.clone()),
            ..quick_args()
        };

        run_bench_command(args).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["summary"]["total_benchmarks"], 2);
    }
}
