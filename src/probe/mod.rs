//! Probe runner - drives probes against an ordered target list.
//!
//! Probes run strictly one at a time: the fixed inter-probe interval exists
//! to bound the outbound connection rate, so there is no fan-out across
//! targets. Outcomes are recorded and emitted in exact input order.

pub mod http;
pub mod traits;

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

pub use http::HttpProber;
pub use traits::{OutcomeSink, ProbeOutcome, ProbeStatus, Prober};

/// Default per-probe timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
/// Default delay between consecutive probes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2_000);

/// Timing policy for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPolicy {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Fixed delay after each probe, including the last one.
    pub interval: Duration,
}

impl RunPolicy {
    /// Create a policy with the default timings.
    pub const fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Set the per-request timeout.
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the inter-probe delay.
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate exit status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    /// At least one target was probed and every probe resolved open.
    AllOpen,
    /// There was nothing to probe.
    NoTargets,
    /// At least one probe did not resolve open.
    Degraded,
}

impl ExitStatus {
    /// Process exit code for this status.
    pub const fn code(self) -> i32 {
        match self {
            Self::AllOpen => 0,
            Self::NoTargets => 1,
            Self::Degraded => 2,
        }
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllOpen => write!(f, "all open"),
            Self::NoTargets => write!(f, "no targets"),
            Self::Degraded => write!(f, "degraded"),
        }
    }
}

/// Complete results of one run: every outcome in target order plus the
/// aggregate status.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Per-target outcomes, in input order.
    pub outcomes: Vec<ProbeOutcome>,
    status: ExitStatus,
}

impl RunResult {
    /// Create an empty result. Until an outcome is pushed, the aggregate
    /// status is `NoTargets`.
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            status: ExitStatus::NoTargets,
        }
    }

    /// Record one outcome and fold it into the aggregate status. The first
    /// non-open outcome downgrades the run to `Degraded`; it never
    /// escalates further.
    pub fn push(&mut self, outcome: ProbeOutcome) {
        if self.status == ExitStatus::NoTargets {
            self.status = ExitStatus::AllOpen;
        }
        if !outcome.is_open() {
            self.status = ExitStatus::Degraded;
        }
        self.outcomes.push(outcome);
    }

    /// The aggregate status.
    pub fn status(&self) -> ExitStatus {
        self.status
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        self.status.code()
    }

    /// Number of probes that resolved open.
    pub fn open_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_open()).count()
    }
}

impl Default for RunResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute a complete probe run.
///
/// Targets are probed strictly in sequence. Each outcome is handed to the
/// sink the moment it resolves, then the runner sleeps for the policy
/// interval before the next probe (and after the last one, matching the
/// throttle contract). Probe failures never abort the run; only a sink
/// write error does.
pub async fn run_probes(
    prober: &dyn Prober,
    targets: &[crate::types::Target],
    policy: &RunPolicy,
    sink: &mut dyn OutcomeSink,
) -> std::io::Result<RunResult> {
    let mut result = RunResult::new();

    if targets.is_empty() {
        debug!("no targets to probe");
        sink.finish(&result)?;
        return Ok(result);
    }

    for target in targets {
        debug!(host = %target.host, port = target.port, "probing");
        let outcome = prober.probe(target).await;
        sink.record(&outcome)?;
        result.push(outcome);

        tokio::time::sleep(policy.interval).await;
    }

    sink.finish(&result)?;
    Ok(result)
}
