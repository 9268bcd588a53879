//! Output formatting module.
//!
//! Provides outcome sinks for plain text, JSON, and CSV. Plain text is the
//! contract format: one line per probe, written the moment the probe
//! resolves. CSV also streams one record per outcome; JSON is batched into
//! a single document when the run finishes.

use crate::cli::OutputFormat;
use crate::probe::{OutcomeSink, ProbeOutcome, ProbeStatus, RunResult};
use console::{style, Style};
use serde::Serialize;
use std::io::{self, Write};

/// Build the sink for the selected output format, writing to stdout.
pub fn stdout_sink(format: OutputFormat) -> Box<dyn OutcomeSink> {
    match format {
        OutputFormat::Plain => Box::new(PlainSink::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonSink::new(io::stdout())),
        OutputFormat::Csv => Box::new(CsvSink::new(io::stdout())),
    }
}

/// Human-readable sink: one styled line per outcome.
pub struct PlainSink<W: Write> {
    out: W,
}

impl<W: Write> PlainSink<W> {
    /// Create a plain-text sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> OutcomeSink for PlainSink<W> {
    fn record(&mut self, outcome: &ProbeOutcome) -> io::Result<()> {
        let line_style = match outcome.status {
            ProbeStatus::Open(_) => Style::new().green(),
            ProbeStatus::TimedOut => Style::new().yellow(),
            ProbeStatus::ConnectionError(_) => Style::new().red(),
        };

        writeln!(self.out, "{}", line_style.apply_to(outcome))?;
        self.out.flush()
    }
}

/// Serialized shape of the JSON report.
#[derive(Serialize)]
struct JsonReport<'a> {
    exit_code: i32,
    probed: usize,
    open: usize,
    outcomes: &'a [ProbeOutcome],
}

/// JSON sink. Outcomes are buffered and emitted as one document at the end
/// of the run; use the plain format when streaming matters.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    /// Create a JSON sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> OutcomeSink for JsonSink<W> {
    fn record(&mut self, _outcome: &ProbeOutcome) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, result: &RunResult) -> io::Result<()> {
        let report = JsonReport {
            exit_code: result.exit_code(),
            probed: result.outcomes.len(),
            open: result.open_count(),
            outcomes: &result.outcomes,
        };

        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(self.out, "{}", json)
    }
}

/// CSV sink: one record per outcome, flushed as it arrives.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    wrote_header: bool,
}

impl<W: Write> CsvSink<W> {
    /// Create a CSV sink writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
            wrote_header: false,
        }
    }
}

impl<W: Write> OutcomeSink for CsvSink<W> {
    fn record(&mut self, outcome: &ProbeOutcome) -> io::Result<()> {
        if !self.wrote_header {
            self.writer
                .write_record(["host", "port", "status", "detail"])?;
            self.wrote_header = true;
        }

        let detail = match &outcome.status {
            ProbeStatus::Open(code) => code.to_string(),
            ProbeStatus::TimedOut => String::new(),
            ProbeStatus::ConnectionError(message) => message.clone(),
        };

        let port = outcome.target.port.to_string();
        self.writer.write_record([
            outcome.target.host.as_str(),
            port.as_str(),
            outcome.status.label(),
            detail.as_str(),
        ])?;
        self.writer.flush()
    }
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message to stderr.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}
