//! Review lifecycle of the staged blocklist collection.
//!
//! The collection moves `work-in-progress -> to-review -> to-sign -> signed`,
//! with a reject transition back from `to-review` to `work-in-progress`.
//! This module is a guard, not a workflow engine: state lives in the remote
//! store, is re-read immediately before every assertion (another operator
//! can move the collection between invocations), and the only side effect of
//! a transition is asking the store to set the new label.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AmoblockError;
use crate::fetcher::RemoteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionState {
    #[serde(rename = "work-in-progress")]
    WorkInProgress,
    #[serde(rename = "to-review")]
    ToReview,
    #[serde(rename = "to-sign")]
    ToSign,
    #[serde(rename = "signed")]
    Signed,
}

impl CollectionState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorkInProgress => "work-in-progress",
            Self::ToReview => "to-review",
            Self::ToSign => "to-sign",
            Self::Signed => "signed",
        }
    }
}

impl fmt::Display for CollectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionState {
    type Err = AmoblockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work-in-progress" => Ok(Self::WorkInProgress),
            "to-review" => Ok(Self::ToReview),
            "to-sign" => Ok(Self::ToSign),
            "signed" => Ok(Self::Signed),
            other => Err(AmoblockError::Parse(format!(
                "Unknown collection state '{other}'"
            ))),
        }
    }
}

/// Fail with [`AmoblockError::InvalidState`] unless `current` is permitted.
///
/// Runs strictly before any write; the failure path mutates nothing.
pub fn assert_state(
    current: CollectionState,
    allowed: &[CollectionState],
) -> Result<(), AmoblockError> {
    if allowed.contains(&current) {
        Ok(())
    } else {
        Err(AmoblockError::InvalidState {
            current,
            allowed: allowed.to_vec(),
        })
    }
}

/// States from which new entries may be staged.
///
/// Normally only a fully signed collection accepts new work;
/// `include_unsigned` lets the caller pile onto a collection that already
/// has unsigned changes in flight.
pub fn creation_states(include_unsigned: bool) -> &'static [CollectionState] {
    if include_unsigned {
        &[
            CollectionState::Signed,
            CollectionState::WorkInProgress,
            CollectionState::ToReview,
        ]
    } else {
        &[CollectionState::Signed]
    }
}

/// Move a work-in-progress collection to review.
pub async fn request_review(store: &dyn RemoteStore) -> Result<()> {
    transition(
        store,
        &[CollectionState::WorkInProgress],
        CollectionState::ToReview,
    )
    .await
}

/// Sign off a collection that is under review.
pub async fn sign(store: &dyn RemoteStore) -> Result<()> {
    transition(store, &[CollectionState::ToReview], CollectionState::ToSign).await
}

/// Send a collection under review back to work-in-progress.
pub async fn reject(store: &dyn RemoteStore) -> Result<()> {
    transition(
        store,
        &[CollectionState::ToReview],
        CollectionState::WorkInProgress,
    )
    .await
}

async fn transition(
    store: &dyn RemoteStore,
    allowed: &[CollectionState],
    target: CollectionState,
) -> Result<()> {
    let current = store.collection_state().await?;
    assert_state(current, allowed)?;
    store.set_collection_state(target).await?;
    info!("Collection moved from '{current}' to '{target}'");
    Ok(())
}
