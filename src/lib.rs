//! # pingport - batch TCP/HTTP reachability prober
//!
//! pingport takes lists of `host,port[,port...]` rows, expands them into
//! concrete (host, port) targets, and checks each one with a single HTTP
//! request - TLS on port 443, plain HTTP everywhere else. Probes run
//! strictly one at a time with a fixed delay in between, results stream as
//! they resolve, and the process exit code summarizes the run.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use pingport::probe::{run_probes, HttpProber, RunPolicy};
//! use pingport::types::expand_rows;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let targets = expand_rows(["example.com,80,443"]).unwrap();
//!     let policy = RunPolicy::default();
//!     let prober = HttpProber::new(policy.timeout).unwrap();
//!     let mut sink = pingport::output::stdout_sink(Default::default());
//!
//!     let result = run_probes(&prober, &targets, &policy, sink.as_mut()).await?;
//!     std::process::exit(result.exit_code());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Target and port-cell parsing/expansion
//! - [`probe`] - The `Prober` trait, the HTTP prober, and the sequential runner
//! - [`input`] - Input file reading
//! - [`output`] - Plain/JSON/CSV outcome sinks
//! - [`cli`] - Command-line entry point
//! - [`error`] - Process-level error types

pub mod cli;
pub mod error;
pub mod input;
pub mod output;
pub mod probe;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, CliResult};
pub use probe::{
    run_probes, ExitStatus, HttpProber, OutcomeSink, ProbeOutcome, ProbeStatus,
    Prober, RunPolicy, RunResult,
};
pub use types::{expand_rows, PortSpec, Target};
