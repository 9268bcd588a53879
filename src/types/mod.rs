//! Core type definitions.

pub mod port;
pub mod target;

pub use port::{PortError, PortSpec};
pub use target::{expand_row, expand_rows, Target};
