//! Collection lifecycle command implementation.

use anyhow::Result;
use std::path::Path;

use crate::cli::CollectionAction;
use crate::config::Config;
use crate::fetcher::RemoteSettings;
use crate::workflow;

/// Run the collection command
pub async fn run(action: CollectionAction, config_path: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let store = RemoteSettings::new(&config)?;

    match action {
        CollectionAction::Review => workflow::request_review(&store).await,
        CollectionAction::Sign => workflow::sign(&store).await,
        CollectionAction::Reject => workflow::reject(&store).await,
    }
}
