//! Command-line interface.
//!
//! `pingport file1.csv [file2.csv ...]` reads host/port rows from every
//! file, probes each expanded target in order, and exits 0 (all open),
//! 1 (nothing to probe or a fatal input error), or 2 (at least one probe
//! did not resolve open).

use crate::error::{CliError, CliResult};
use crate::input::read_rows;
use crate::output;
use crate::probe::{run_probes, HttpProber, RunPolicy, RunResult};
use crate::types::{expand_rows, Target};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// pingport - batch TCP/HTTP reachability prober.
///
/// Reads rows of `host,port[,port...]` from one or more files; port fields
/// may be literals or inclusive ranges like `8000-8010`. Each target gets a
/// single `GET /` (TLS on port 443, plain HTTP elsewhere) and one result
/// line, in input order.
#[derive(Parser, Debug)]
#[command(name = "pingport")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Probe host/port lists for TCP/HTTP reachability", long_about = None)]
pub struct Cli {
    /// Input files of host,port[,port...] rows
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Per-probe timeout in milliseconds
    #[arg(short = 't', long, default_value_t = 10_000, value_name = "MS")]
    pub timeout: u64,

    /// Delay between consecutive probes in milliseconds
    #[arg(short = 'i', long, default_value_t = 2_000, value_name = "MS")]
    pub interval: u64,

    /// Output format for results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential logging
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per probe, streamed
    Plain,
    /// Single JSON document emitted at run end
    Json,
    /// One CSV record per probe, streamed
    Csv,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Plain
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl Cli {
    /// Timing policy from the flags.
    pub fn policy(&self) -> RunPolicy {
        RunPolicy::new()
            .with_timeout(Duration::from_millis(self.timeout))
            .with_interval(Duration::from_millis(self.interval))
    }
}

/// Read and expand every input file into one flat target list.
///
/// A malformed row anywhere aborts the whole run before any probing; parse
/// failures propagate instead of being dropped silently.
fn load_targets(files: &[PathBuf]) -> CliResult<Vec<Target>> {
    let mut targets = Vec::new();

    for path in files {
        let rows = read_rows(path)?;
        let expanded =
            expand_rows(rows.iter().map(String::as_str)).map_err(|source| {
                CliError::InvalidRow {
                    path: path.clone(),
                    source,
                }
            })?;

        info!(path = %path.display(), targets = expanded.len(), "expanded input file");
        targets.extend(expanded);
    }

    Ok(targets)
}

/// Execute the full run. The returned result carries the process exit code.
pub async fn run(cli: &Cli) -> CliResult<RunResult> {
    if cli.files.is_empty() {
        return Err(CliError::MissingInput);
    }

    let targets = load_targets(&cli.files)?;

    if targets.is_empty() {
        warn!("input files contained no targets");
        return Ok(RunResult::new());
    }

    let policy = cli.policy();
    let prober = HttpProber::new(policy.timeout)?;
    let mut sink = output::stdout_sink(cli.output);

    let result = run_probes(&prober, &targets, &policy, sink.as_mut()).await?;

    info!(
        probed = result.outcomes.len(),
        open = result.open_count(),
        status = %result.status(),
        "run complete"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_timings() {
        let cli = Cli::parse_from(["pingport", "targets.csv"]);
        assert_eq!(cli.timeout, 10_000);
        assert_eq!(cli.interval, 2_000);
        assert_eq!(cli.output, OutputFormat::Plain);

        let policy = cli.policy();
        assert_eq!(policy.timeout, Duration::from_millis(10_000));
        assert_eq!(policy.interval, Duration::from_millis(2_000));
    }

    #[test]
    fn test_timing_overrides() {
        let cli = Cli::parse_from([
            "pingport", "-t", "500", "-i", "0", "targets.csv",
        ]);
        let policy = cli.policy();
        assert_eq!(policy.timeout, Duration::from_millis(500));
        assert_eq!(policy.interval, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_no_files_is_usage_error() {
        let cli = Cli::parse_from(["pingport"]);
        let err = run(&cli).await.unwrap_err();
        assert!(matches!(err, CliError::MissingInput));
    }

    #[tokio::test]
    async fn test_empty_input_exits_one_without_probing() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "\nhost-without-ports\n").unwrap();

        let mut cli = Cli::parse_from(["pingport"]);
        cli.files = vec![file.path().to_path_buf()];

        let result = run(&cli).await.unwrap();
        assert_eq!(result.exit_code(), 1);
        assert!(result.outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_row_aborts_before_probing() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "10.0.0.1,80\n10.0.0.2,not-a-port").unwrap();

        let mut cli = Cli::parse_from(["pingport"]);
        cli.files = vec![file.path().to_path_buf()];

        let err = run(&cli).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidRow { .. }));
    }

    #[test]
    fn test_targets_accumulate_across_files() {
        let mut a = NamedTempFile::new().unwrap();
        writeln!(a, "10.0.0.1,80").unwrap();
        let mut b = NamedTempFile::new().unwrap();
        writeln!(b, "10.0.0.1,80,443").unwrap();

        let targets =
            load_targets(&[a.path().to_path_buf(), b.path().to_path_buf()])
                .unwrap();
        // No cross-file dedup: 10.0.0.1:80 appears twice
        assert_eq!(targets.len(), 3);
    }
}
