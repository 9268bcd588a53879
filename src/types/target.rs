//! Target expansion from textual rows.
//!
//! Each input row looks like `host,port[,port...]` where a port field is a
//! literal or an inclusive range. Rows expand to concrete (host, port)
//! pairs with per-row deduplication; duplicates across rows are kept, since
//! a repeated declaration means a repeated probe.

use crate::types::port::{PortError, PortSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A concrete probe destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Hostname or IP address, taken verbatim from the input row.
    pub host: String,
    /// Destination port.
    pub port: u16,
}

impl Target {
    /// Create a new target.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Expand one row into targets.
///
/// The first comma-separated field is the host; every remaining field is a
/// port cell. Empty cells are skipped, ports are deduplicated within the
/// row preserving first-seen order. Blank rows and rows with a host but no
/// port fields yield nothing.
///
/// A cell that fails to parse is a fatal input-format error for the whole
/// run, so it propagates instead of being dropped.
pub fn expand_row(row: &str) -> Result<Vec<Target>, PortError> {
    if row.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut fields = row.split(',');
    // split() always yields at least one field
    let host = fields.next().unwrap_or_default().trim();

    let mut seen: HashSet<u16> = HashSet::new();
    let mut targets = Vec::new();

    for cell in fields {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }

        let spec: PortSpec = cell.parse()?;
        for port in spec.ports() {
            if seen.insert(port) {
                targets.push(Target::new(host, port));
            }
        }
    }

    Ok(targets)
}

/// Expand a sequence of rows, preserving row order then port-within-row
/// order. No deduplication is performed across rows.
pub fn expand_rows<'a, I>(rows: I) -> Result<Vec<Target>, PortError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut targets = Vec::new();
    for row in rows {
        targets.extend(expand_row(row)?);
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports(targets: &[Target]) -> Vec<u16> {
        targets.iter().map(|t| t.port).collect()
    }

    #[test]
    fn test_single_port_row() {
        let targets = expand_row("10.0.0.1,80").unwrap();
        assert_eq!(targets, vec![Target::new("10.0.0.1", 80)]);
    }

    #[test]
    fn test_row_dedup_preserves_first_seen_order() {
        let targets = expand_row("10.0.0.1,80,80,80-82").unwrap();
        assert_eq!(ports(&targets), vec![80, 81, 82]);
        assert!(targets.iter().all(|t| t.host == "10.0.0.1"));
    }

    #[test]
    fn test_empty_cells_skipped() {
        let targets = expand_row("10.0.0.1,,80,").unwrap();
        assert_eq!(ports(&targets), vec![80]);
    }

    #[test]
    fn test_blank_row_yields_nothing() {
        assert!(expand_row("").unwrap().is_empty());
        assert!(expand_row("   ").unwrap().is_empty());
    }

    #[test]
    fn test_host_only_row_yields_nothing() {
        assert!(expand_row("example.com").unwrap().is_empty());
    }

    #[test]
    fn test_inverted_range_expands_to_nothing() {
        let targets = expand_row("10.0.0.1,90-80,443").unwrap();
        assert_eq!(ports(&targets), vec![443]);
    }

    #[test]
    fn test_malformed_cell_is_fatal() {
        assert!(expand_row("10.0.0.1,80,oops").is_err());
        assert!(expand_row("10.0.0.1,80-x").is_err());
    }

    #[test]
    fn test_no_cross_row_dedup() {
        let targets = expand_rows(["10.0.0.1,80", "10.0.0.1,80"]).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0], targets[1]);
    }

    #[test]
    fn test_row_then_port_ordering() {
        let targets = expand_rows(["a,443,80", "b,22"]).unwrap();
        let pairs: Vec<(String, u16)> = targets
            .into_iter()
            .map(|t| (t.host, t.port))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), 443),
                ("a".to_string(), 80),
                ("b".to_string(), 22),
            ]
        );
    }

    #[test]
    fn test_same_port_different_hosts_both_kept() {
        let targets = expand_rows(["a,80", "b,80"]).unwrap();
        assert_eq!(targets.len(), 2);
        assert_ne!(targets[0].host, targets[1].host);
    }

    #[test]
    fn test_error_in_later_row_aborts_expansion() {
        assert!(expand_rows(["a,80", "b,nope"]).is_err());
    }
}
