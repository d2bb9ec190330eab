//! List command implementation.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::fetcher::{RemoteSettings, RemoteStore};
use crate::pattern;
use crate::utils::{format_count, truncate};

const REASON_WIDTH: usize = 60;

/// Run the list command
pub async fn run(limit: usize, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let store = RemoteSettings::new(&config)?;

    let snapshot = store.fetch_snapshot().await?;

    println!();
    println!(
        "Blocklist entries ({} total):",
        format_count(snapshot.len())
    );
    println!();

    let display_count = std::cmp::min(limit, snapshot.len());
    for entry in snapshot.iter().take(display_count) {
        let marker = if entry.enabled { "[x]" } else { "[ ]" };
        let scope = if entry.is_regex() {
            let guids = pattern::expand(&entry.guid_pattern);
            if guids.is_empty() {
                "regex block (handwritten)".to_string()
            } else {
                format!("regex block ({} guids)", guids.len())
            }
        } else {
            "single guid".to_string()
        };

        println!(
            "  {} {} - {} ({}, {})",
            marker,
            truncate(&entry.guid_pattern, REASON_WIDTH),
            entry.name,
            scope,
            entry.severity()
        );
        if !entry.reason.is_empty() {
            println!("      {}", truncate(&entry.reason, REASON_WIDTH));
        }
    }

    if snapshot.len() > limit {
        println!();
        println!(
            "  ... and {} more (use --limit to show more)",
            snapshot.len() - limit
        );
    }
    println!();

    Ok(())
}
