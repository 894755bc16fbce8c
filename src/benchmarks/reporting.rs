//! Benchmark Reporting
//!
//! Renders comparison results as a console table, JSON or Markdown.

use super::framework::BenchmarkResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Individual benchmark results
    pub results: Vec<BenchmarkResult>,
    /// Overall summary
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: chrono::DateTime<chrono::Utc>,
    /// native-mean version
    pub version: String,
    /// Environment information
    pub environment: HashMap<String, String>,
}

/// Report summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total number of expressions benchmarked
    pub total_benchmarks: u32,
    /// Expression with the lowest median
    pub fastest: Option<String>,
    /// Median of each expression relative to the fastest, in result order
    pub relative: Vec<RelativeTiming>,
}

/// One expression's median against the fastest one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeTiming {
    pub expression: String,
    pub median_ns: f64,
    /// `median_ns / fastest median`; absent when the fastest median is zero
    pub relative: Option<f64>,
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Console table in the layout of the host's benchmark output
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Markdown for reports and PRs
    Markdown,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(ReportFormat::Table),
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            other => Err(format!(
                "unknown report format '{other}', expected table, json or markdown"
            )),
        }
    }
}

impl BenchmarkReport {
    /// Create a new benchmark report
    pub fn new(results: Vec<BenchmarkResult>) -> Self {
        let summary = Self::calculate_summary(&results);

        Self {
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                environment: collect_environment_info(),
            },
            results,
            summary,
        }
    }

    /// Render in the requested format
    pub fn render(&self, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::Table => Ok(self.to_table()),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Markdown => Ok(self.to_markdown()),
        }
    }

    /// Save report to file in the specified format
    pub fn save_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        format: ReportFormat,
    ) -> Result<(), ReportError> {
        let content = self.render(format)?;

        fs::write(path, content)
            .map_err(|e| ReportError::Io(format!("Failed to write report file: {}", e)))?;

        Ok(())
    }

    /// Convert to JSON format
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::Serialization(format!("JSON serialization failed: {}", e)))
    }

    /// Console table with one row per expression
    pub fn to_table(&self) -> String {
        let rows: Vec<[String; 7]> = self
            .results
            .iter()
            .zip(&self.summary.relative)
            .map(|(result, relative)| {
                [
                    result.expression.clone(),
                    format_nanos(result.stats.percentiles.min),
                    format_nanos(result.stats.percentiles.p50),
                    format_rate(result.iterations_per_second),
                    result.stats.total_calls().to_string(),
                    format_nanos(result.stats.total_duration.as_nanos() as f64),
                    format_relative(relative.relative),
                ]
            })
            .collect();

        let header = [
            "expression",
            "min",
            "median",
            "itr/sec",
            "n_itr",
            "total_time",
            "relative",
        ];
        let mut widths = header.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut table = String::new();
        push_row(&mut table, &header.map(String::from), &widths);
        for row in &rows {
            push_row(&mut table, row, &widths);
        }
        table
    }

    /// Convert to Markdown format
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Native Mean Benchmark Report\n\n");
        let _ = writeln!(
            md,
            "**Generated:** {}",
            self.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(md, "**Version:** {}\n", self.metadata.version);

        md.push_str("## Summary\n\n");
        let _ = writeln!(
            md,
            "- **Expressions:** {}",
            self.summary.total_benchmarks
        );
        if let Some(ref fastest) = self.summary.fastest {
            let _ = writeln!(md, "- **Fastest:** `{}`", fastest);
        }
        md.push('\n');

        md.push_str("## Detailed Results\n\n");
        md.push_str("| Expression | min | median | p95 | itr/sec | n_itr | relative |\n");
        md.push_str("|------------|-----|--------|-----|---------|-------|----------|\n");

        for (result, relative) in self.results.iter().zip(&self.summary.relative) {
            let _ = writeln!(
                md,
                "| `{}` | {} | {} | {} | {} | {} | {} |",
                result.expression,
                format_nanos(result.stats.percentiles.min),
                format_nanos(result.stats.percentiles.p50),
                format_nanos(result.stats.percentiles.p95),
                format_rate(result.iterations_per_second),
                result.stats.total_calls(),
                format_relative(relative.relative),
            );
        }

        md
    }

    /// Calculate report summary from results
    fn calculate_summary(results: &[BenchmarkResult]) -> ReportSummary {
        let fastest = results
            .iter()
            .min_by(|a, b| {
                a.stats
                    .percentiles
                    .p50
                    .total_cmp(&b.stats.percentiles.p50)
            });

        let fastest_median = fastest.map(|r| r.stats.percentiles.p50).unwrap_or(0.0);

        let relative = results
            .iter()
            .map(|r| RelativeTiming {
                expression: r.expression.clone(),
                median_ns: r.stats.percentiles.p50,
                relative: (fastest_median > 0.0)
                    .then_some(r.stats.percentiles.p50 / fastest_median),
            })
            .collect();

        ReportSummary {
            total_benchmarks: results.len() as u32,
            fastest: fastest.map(|r| r.expression.clone()),
            relative,
        }
    }
}

fn push_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == 0 {
            let _ = write!(line, "{:<width$}", cell, width = width);
        } else {
            let _ = write!(line, "  {:>width$}", cell, width = width);
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Human-readable time for a nanosecond count
pub fn format_nanos(nanos: f64) -> String {
    if nanos < 1_000.0 {
        format!("{:.2}ns", nanos)
    } else if nanos < 1_000_000.0 {
        format!("{:.2}µs", nanos / 1_000.0)
    } else if nanos < 1_000_000_000.0 {
        format!("{:.2}ms", nanos / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos / 1_000_000_000.0)
    }
}

fn format_rate(rate: Option<f64>) -> String {
    match rate {
        None => "N/A".to_string(),
        Some(r) if r >= 1e9 => format!("{:.2}G", r / 1e9),
        Some(r) if r >= 1e6 => format!("{:.2}M", r / 1e6),
        Some(r) if r >= 1e3 => format!("{:.2}K", r / 1e3),
        Some(r) => format!("{:.0}", r),
    }
}

fn format_relative(relative: Option<f64>) -> String {
    relative
        .map(|r| format!("{:.2}", r))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Collect relevant environment information
fn collect_environment_info() -> HashMap<String, String> {
    let mut env = HashMap::new();

    env.insert("os".to_string(), std::env::consts::OS.to_string());
    env.insert("arch".to_string(), std::env::consts::ARCH.to_string());
    env.insert(
        "profile".to_string(),
        if cfg!(debug_assertions) { "debug" } else { "release" }.to_string(),
    );

    for var in &["CI", "GITHUB_ACTIONS", "RUNNER_OS"] {
        if let Ok(value) = std::env::var(var) {
            env.insert(var.to_lowercase(), value);
        }
    }

    env
}

/// Report generation errors
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}
