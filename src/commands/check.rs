//! Check command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::warn;

use crate::config::Config;
use crate::fetcher::{RemoteSettings, RemoteStore};
use crate::index::BlocklistIndex;
use crate::utils::format_count;

use super::{read_candidates, report_malformed};

/// Run the check command
pub async fn run(input: &Path, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let store = RemoteSettings::new(&config)?;

    let candidates = read_candidates(input)?;
    let snapshot = store.fetch_snapshot().await?;
    let index = BlocklistIndex::build(snapshot);
    report_malformed(&index);

    let classification = index.classify(&candidates);
    for warning in &classification.warnings {
        warn!("{warning}");
    }

    println!();
    println!(
        "Already blocked ({}):",
        format_count(classification.existing.len())
    );
    for (guid, entry) in &classification.existing {
        let bug = match entry.bug_id() {
            Some(id) => format!("bug {id}"),
            None => entry
                .bug
                .clone()
                .unwrap_or_else(|| "no bug reference".to_string()),
        };
        let disabled = if entry.enabled { "" } else { " [DISABLED]" };
        let kind = if entry.is_regex() { "regex" } else { "exact" };
        println!(
            "  [x] {} ({}, {}, {}){}",
            guid,
            kind,
            entry.severity(),
            bug,
            disabled
        );
    }

    println!();
    println!("New ({}):", format_count(classification.new_guids.len()));
    for guid in &classification.new_guids {
        println!("  [ ] {guid}");
    }
    println!();

    Ok(())
}
