//! CLI command implementations.

pub mod check;
pub mod collection;
pub mod expand;
pub mod list;
pub mod stage;
pub mod status;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::index::BlocklistIndex;
use tracing::warn;

/// Read candidate guid lines from a file, or stdin when the path is `-`.
///
/// Lines are passed through raw; trimming and comment filtering happen
/// during classification.
pub(crate) fn read_candidates(input: &Path) -> Result<Vec<String>> {
    let content = if input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read guids from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read guid file: {input:?}"))?
    };

    Ok(content.lines().map(str::to_string).collect())
}

/// Report snapshot entries whose regex pattern failed to compile.
pub(crate) fn report_malformed(index: &BlocklistIndex) {
    for malformed in index.invalid() {
        warn!("{malformed}");
    }
}
