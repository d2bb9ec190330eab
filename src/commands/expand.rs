//! Expand command implementation.

use anyhow::Result;

use crate::pattern;

/// Run the expand command
pub fn run(pattern_str: &str) -> Result<()> {
    let guids = pattern::expand(pattern_str);

    if guids.is_empty() {
        println!("Pattern is not a mechanically generated alternation block; cannot expand.");
        return Ok(());
    }

    for guid in guids {
        println!("{guid}");
    }
    Ok(())
}
