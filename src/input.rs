//! Input file reading.
//!
//! A thin wrapper over the filesystem: each input file is a plain text
//! list of `host,port[,port...]` rows, one per line, with both `\n` and
//! `\r\n` line endings accepted. No header row, no quoting.

use crate::error::{CliError, CliResult};
use std::fs;
use std::path::Path;

/// Read one input file into raw rows.
///
/// Blank lines are kept; the target expander is where "blank row yields no
/// targets" is decided, not here.
pub fn read_rows(path: &Path) -> CliResult<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| CliError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(content.lines().map(str::to_string).collect())
}
