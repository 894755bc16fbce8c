use clap::{Parser, Subcommand};
use native_mean::{MeanImpl, NativeMeanResult, ReportFormat, mean, parse_operand};
use std::path::PathBuf;

mod bench;

use bench::{BenchArgs, run_bench_command};

#[derive(Parser, Debug)]
#[command(name = "native-mean", version)]
#[command(about = "Mean of two doubles, and a benchmark against the built-in style mean")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the arithmetic mean of two numbers
    Mean {
        /// First operand (accepts Inf, -Inf and NaN)
        #[arg(allow_hyphen_values = true)]
        x: String,
        /// Second operand
        #[arg(allow_hyphen_values = true)]
        y: String,
    },
    /// Compare cpp_mean(x, y) with mean(c(x, y))
    Bench {
        /// First operand
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        x: String,
        /// Second operand
        #[arg(long, default_value = "2", allow_hyphen_values = true)]
        y: String,
        /// Maximum number of timed samples
        #[arg(long)]
        iterations: Option<u32>,
        /// Untimed calls before measurement
        #[arg(long)]
        warmup: Option<u32>,
        /// Calls per timed sample
        #[arg(long)]
        batch_size: Option<u32>,
        /// Time budget, e.g. 500ms or 2s
        #[arg(long)]
        max_duration: Option<String>,
        /// Skip the check that all expressions return the same value
        #[arg(long)]
        no_check: bool,
        /// Benchmark a single implementation (native or reference)
        #[arg(long)]
        only: Option<MeanImpl>,
        /// Output format (table, json, markdown)
        #[arg(long, default_value = "table")]
        format: ReportFormat,
        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// JSON config file with benchmark settings
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    // Initialize JSON logging once.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .try_init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        tracing::error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> NativeMeanResult<()> {
    match command {
        Commands::Mean { x, y } => {
            let x = parse_operand(&x)?;
            let y = parse_operand(&y)?;
            println!("{}", mean(x, y));
            Ok(())
        }
        Commands::Bench {
            x,
            y,
            iterations,
            warmup,
            batch_size,
            max_duration,
            no_check,
            only,
            format,
            output,
            config,
        } => run_bench_command(BenchArgs {
            x,
            y,
            iterations,
            warmup,
            batch_size,
            max_duration,
            no_check,
            only,
            format,
            output,
            config,
        }),
    }
}
