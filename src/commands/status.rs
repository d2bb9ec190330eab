//! Status command implementation.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::fetcher::{RemoteSettings, RemoteStore};
use crate::index::BlocklistIndex;
use crate::utils::format_count;
use crate::workflow::CollectionState;

use super::report_malformed;

/// Run the status command
pub async fn run(config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let store = RemoteSettings::new(&config)?;

    let state = store.collection_state().await?;
    let snapshot = store.fetch_snapshot().await?;
    let total = snapshot.len();
    let index = BlocklistIndex::build(snapshot);
    report_malformed(&index);

    println!();
    println!("Collection: {}/{}", config.bucket, config.collection);
    println!("State: {state}");
    match state {
        CollectionState::WorkInProgress => {
            println!("  (staged changes awaiting 'amoblock collection review')");
        }
        CollectionState::ToReview => {
            println!("  (awaiting 'amoblock collection sign' or 'amoblock collection reject')");
        }
        CollectionState::ToSign => {
            println!("  (signature in progress on the remote store)");
        }
        CollectionState::Signed => {
            println!("  (no unsigned changes)");
        }
    }
    println!();
    println!("Entries: {}", format_count(total));
    println!("  Exact guids: {}", format_count(index.exact_count()));
    println!("  Regex blocks: {}", format_count(index.regex_count()));
    if !index.invalid().is_empty() {
        println!("  Malformed patterns: {}", index.invalid().len());
    }
    println!();

    Ok(())
}
