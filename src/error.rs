//! Error types for amoblock.

use thiserror::Error;

use crate::workflow::CollectionState;

#[derive(Error, Debug)]
pub enum AmoblockError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(
        "collection is '{current}' but this operation requires one of: {}",
        join_states(.allowed)
    )]
    InvalidState {
        current: CollectionState,
        allowed: Vec<CollectionState>,
    },
}

fn join_states(states: &[CollectionState]) -> String {
    states
        .iter()
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
