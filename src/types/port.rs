//! Port cell parsing.
//!
//! A port cell is one comma-separated field from an input row: either a
//! single port number or an inclusive range like `8000-8010`. Ranges with
//! `start > end` are legal and expand to nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Error type for port cell parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("invalid port number: {0}")]
    InvalidNumber(String),
    #[error("invalid port range: {0}")]
    InvalidRange(String),
}

/// A single parsed port cell.
///
/// Supports:
/// - Literal port: "80"
/// - Inclusive range: "8000-8010"
///
/// Any `u16` is a valid port here, including 0 — validity of the value as a
/// probe destination is the network stack's problem, not the parser's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortSpec {
    /// A single port.
    Single(u16),
    /// An inclusive range of ports. May be inverted, in which case it is
    /// empty.
    Range(u16, u16),
}

impl PortSpec {
    /// All ports this cell expands to, in ascending order.
    ///
    /// An inverted range (`start > end`) yields an empty iterator rather
    /// than an error; that is the documented expansion policy.
    pub fn ports(&self) -> RangeInclusive<u16> {
        match *self {
            Self::Single(port) => port..=port,
            Self::Range(start, end) => start..=end,
        }
    }

    /// Number of ports this cell expands to.
    pub fn len(&self) -> usize {
        match *self {
            Self::Single(_) => 1,
            Self::Range(start, end) => {
                if start > end {
                    0
                } else {
                    (end - start) as usize + 1
                }
            }
        }
    }

    /// True when the cell expands to no ports (inverted range).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.contains('-') {
            let bounds: Vec<&str> = s.split('-').collect();
            if bounds.len() != 2 {
                return Err(PortError::InvalidRange(s.to_string()));
            }

            let start: u16 = bounds[0]
                .trim()
                .parse()
                .map_err(|_| PortError::InvalidNumber(bounds[0].to_string()))?;
            let end: u16 = bounds[1]
                .trim()
                .parse()
                .map_err(|_| PortError::InvalidNumber(bounds[1].to_string()))?;

            Ok(Self::Range(start, end))
        } else {
            let port: u16 = s
                .parse()
                .map_err(|_| PortError::InvalidNumber(s.to_string()))?;
            Ok(Self::Single(port))
        }
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Single(port) => write!(f, "{}", port),
            Self::Range(start, end) => write!(f, "{}-{}", start, end),
        }
    }
}
