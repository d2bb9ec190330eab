//! Stage command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::config::Config;
use crate::entry::Severity;
use crate::fetcher::{RemoteSettings, RemoteStore};
use crate::index::BlocklistIndex;
use crate::staging::{build_requests, BlockMetadata, CreationRequest};
use crate::workflow::{assert_state, creation_states};

use super::{read_candidates, report_malformed};

/// Options for the stage command beyond the entry metadata.
pub struct StageOptions {
    /// Also allow staging onto a collection with unsigned changes.
    pub include_unsigned: bool,
    /// Build the requests but don't submit them.
    pub dry_run: bool,
}

/// Run the stage command
#[allow(clippy::too_many_arguments)]
pub async fn run(
    input: &Path,
    name: String,
    reason: String,
    bug: Option<String>,
    severity: Severity,
    min_version: String,
    max_version: String,
    options: StageOptions,
    config_path: &Path,
) -> Result<()> {
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
    for (guid, entry) in &classification.existing {
        info!(
            "Skipping {} - already blocked by {}",
            guid, entry.guid_pattern
        );
    }

    if classification.new_guids.is_empty() {
        info!("All candidates are already blocked, nothing to stage");
        return Ok(());
    }

    let metadata = BlockMetadata {
        name,
        reason,
        bug,
        severity,
        min_version,
        max_version,
    };
    let requests = build_requests(&classification.new_guids, &metadata);

    if options.dry_run {
        println!();
        println!(
            "Would stage {} block entr{} for {} guid{}:",
            requests.len(),
            if requests.len() == 1 { "y" } else { "ies" },
            classification.new_guids.len(),
            if classification.new_guids.len() == 1 {
                ""
            } else {
                "s"
            }
        );
        for request in &requests {
            println!("{}", serde_json::to_string_pretty(request)?);
        }
        return Ok(());
    }

    submit(&store, &requests, options.include_unsigned).await?;

    info!(
        "Staged {} block entr{} covering {} guid{}",
        requests.len(),
        if requests.len() == 1 { "y" } else { "ies" },
        classification.new_guids.len(),
        if classification.new_guids.len() == 1 {
            ""
        } else {
            "s"
        }
    );
    println!("Run 'amoblock collection review' to request review of the staged changes");

    Ok(())
}

/// Submit creation requests, gated on the collection state.
///
/// The state is re-read immediately before the guard so a concurrent
/// operator moving the collection is always observed; nothing is written
/// when the guard fails.
pub(crate) async fn submit(
    store: &dyn RemoteStore,
    requests: &[CreationRequest],
    include_unsigned: bool,
) -> Result<()> {
    let current = store.collection_state().await?;
    assert_state(current, creation_states(include_unsigned))?;

    for request in requests {
        store.create_record(request).await?;
    }
    Ok(())
}
