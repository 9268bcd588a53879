//! Prober trait and outcome types.
//!
//! The `Prober` trait abstracts the network check so the runner can be
//! exercised against a scripted implementation in tests.

use crate::types::Target;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Terminal status of one probe attempt.
///
/// A probe resolves to exactly one of these; there are no retries and no
/// re-entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ProbeStatus {
    /// A response arrived before the timeout. Carries whatever status code
    /// the server returned; any response counts as open, 2xx or not.
    Open(u16),
    /// No response within the timeout; the in-flight connection was
    /// aborted.
    TimedOut,
    /// The connection failed outright (refused, reset, DNS failure, ...).
    /// Carries the underlying transport error text verbatim.
    ConnectionError(String),
}

impl ProbeStatus {
    /// Short machine-friendly label, used by the CSV output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open(_) => "open",
            Self::TimedOut => "timeout",
            Self::ConnectionError(_) => "error",
        }
    }
}

/// Result of probing one target. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    /// The target that was probed.
    pub target: Target,
    /// How the probe resolved.
    #[serde(flatten)]
    pub status: ProbeStatus,
}

impl ProbeOutcome {
    /// Create a new outcome.
    pub fn new(target: Target, status: ProbeStatus) -> Self {
        Self { target, status }
    }

    /// True when the probe received any HTTP response.
    pub fn is_open(&self) -> bool {
        matches!(self.status, ProbeStatus::Open(_))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            ProbeStatus::Open(code) => {
                write!(f, "{} is open. Status Code: {}", self.target, code)
            }
            ProbeStatus::TimedOut => {
                write!(f, "{} is unreachable (timeout).", self.target)
            }
            ProbeStatus::ConnectionError(message) => write!(
                f,
                "{} is closed or unreachable. Error: {}",
                self.target, message
            ),
        }
    }
}

/// Trait for probe implementations.
///
/// A prober performs a single check against one target and classifies the
/// result. It never fails at the Rust level; transport failures are part of
/// the outcome.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe a single target.
    async fn probe(&self, target: &Target) -> ProbeOutcome;
}

/// Receives outcomes as they resolve, in target order.
///
/// Implementations live in the output module; the runner only needs the
/// seam so results stream instead of being batched.
pub trait OutcomeSink {
    /// Called once per outcome, immediately after the probe resolves.
    fn record(&mut self, outcome: &ProbeOutcome) -> std::io::Result<()>;

    /// Called once after the last probe, with the full run result. Sinks
    /// that batch (JSON) emit here; streaming sinks don't need it.
    fn finish(&mut self, result: &crate::probe::RunResult) -> std::io::Result<()> {
        let _ = result;
        Ok(())
    }
}
