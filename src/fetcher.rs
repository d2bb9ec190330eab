//! HTTP client for the remote blocklist collection.
//!
//! Talks to a kinto-style remote-settings writer: block records live under
//! `buckets/{bucket}/collections/{collection}/records`, and the collection
//! metadata carries the review lifecycle label in its `status` field.
//! [`RemoteStore`] is the seam the rest of the tool programs against, so
//! workflow and staging logic can be tested without a server.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::entry::{BlockEntry, Severity, VersionRange};
use crate::staging::CreationRequest;
use crate::workflow::CollectionState;

#[cfg(test)]
use mockall::automock;

const TIMEOUT_SECS: u64 = 30;
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 2000;

/// Maximum snapshot payload size (10 MB).
/// The production addons collection is ~2 MB, so this provides ample margin.
const MAX_SNAPSHOT_SIZE: usize = 10 * 1024 * 1024;

/// Operations the core needs from the remote collection store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch every block record in the collection.
    async fn fetch_snapshot(&self) -> Result<Vec<BlockEntry>>;

    /// Read the current review lifecycle label.
    async fn collection_state(&self) -> Result<CollectionState>;

    /// Ask the store to set a new lifecycle label.
    async fn set_collection_state(&self, state: CollectionState) -> Result<()>;

    /// Submit one creation request into the staging collection.
    async fn create_record(&self, request: &CreationRequest) -> Result<()>;
}

/// Remote-settings client backed by reqwest.
pub struct RemoteSettings {
    client: Client,
    collection_url: String,
    records_url: String,
    auth_header: Option<String>,
}

impl RemoteSettings {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(format!("amoblock/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let collection_url = format!(
            "{}/buckets/{}/collections/{}",
            config.server.trim_end_matches('/'),
            config.bucket,
            config.collection
        );
        let records_url = format!("{collection_url}/records");
        let auth_header = if config.auth_token.is_empty() {
            None
        } else {
            Some(format!("Bearer {}", config.auth_token.as_str()))
        };

        Ok(Self {
            client,
            collection_url,
            records_url,
            auth_header,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_header {
            Some(header) => request.header(reqwest::header::AUTHORIZATION, header.as_str()),
            None => request,
        }
    }

    /// Fetch content with retry logic and size validation
    async fn get_with_retry(&self, url: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = RETRY_DELAY_MS * (1 << (attempt - 1));
                debug!("Retry {} after {}ms for {}", attempt, delay, url);
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            match self.authorize(self.client.get(url)).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        if let Some(content_length) = response.content_length() {
                            if content_length as usize > MAX_SNAPSHOT_SIZE {
                                return Err(anyhow::anyhow!(
                                    "Response too large: {} bytes (max: {} bytes)",
                                    content_length,
                                    MAX_SNAPSHOT_SIZE
                                ));
                            }
                        }

                        let body = response
                            .text()
                            .await
                            .context("Failed to read response body")?;

                        if body.len() > MAX_SNAPSHOT_SIZE {
                            return Err(anyhow::anyhow!(
                                "Downloaded content too large: {} bytes (max: {} bytes)",
                                body.len(),
                                MAX_SNAPSHOT_SIZE
                            ));
                        }

                        return Ok(body);
                    }
                    last_error = Some(anyhow::anyhow!("HTTP {}", response.status()));
                }
                Err(e) => {
                    last_error = Some(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("Unknown error")))
    }
}

#[async_trait]
impl RemoteStore for RemoteSettings {
    async fn fetch_snapshot(&self) -> Result<Vec<BlockEntry>> {
        let body = self
            .get_with_retry(&self.records_url)
            .await
            .context("Failed to fetch blocklist snapshot")?;
        let response: RecordsResponse =
            serde_json::from_str(&body).context("Malformed records response")?;

        let entries: Vec<BlockEntry> = response
            .data
            .into_iter()
            .map(RawRecord::into_entry)
            .collect();
        info!("Fetched {} blocklist entries", entries.len());
        Ok(entries)
    }

    async fn collection_state(&self) -> Result<CollectionState> {
        let body = self
            .get_with_retry(&self.collection_url)
            .await
            .context("Failed to fetch collection metadata")?;
        let response: CollectionResponse =
            serde_json::from_str(&body).context("Malformed collection response")?;
        Ok(response.data.status.parse()?)
    }

    async fn set_collection_state(&self, state: CollectionState) -> Result<()> {
        let response = self
            .authorize(self.client.patch(&self.collection_url))
            .json(&json!({ "data": { "status": state.as_str() } }))
            .send()
            .await
            .context("Failed to update collection state")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Collection state update rejected: HTTP {}",
                response.status()
            );
        }
        debug!("Collection state set to '{state}'");
        Ok(())
    }

    async fn create_record(&self, request: &CreationRequest) -> Result<()> {
        let response = self
            .authorize(self.client.post(&self.records_url))
            .json(&json!({ "data": request }))
            .send()
            .await
            .with_context(|| format!("Failed to create block entry for {}", request.guid))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Block entry for {} rejected: HTTP {}",
                request.guid,
                response.status()
            );
        }
        debug!("Created block entry for {}", request.guid);
        Ok(())
    }
}

#[derive(Deserialize)]
struct RecordsResponse {
    data: Vec<RawRecord>,
}

#[derive(Deserialize)]
struct CollectionResponse {
    data: CollectionData,
}

#[derive(Deserialize)]
struct CollectionData {
    status: String,
}

/// One block record as served by the remote store.
#[derive(Deserialize)]
struct RawRecord {
    guid: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(rename = "versionRange", default)]
    version_range: Vec<VersionRange>,
    #[serde(default)]
    details: RawDetails,
    #[serde(default)]
    last_modified: i64,
}

#[derive(Deserialize, Default)]
struct RawDetails {
    bug: Option<String>,
    name: Option<String>,
    why: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl RawRecord {
    fn into_entry(self) -> BlockEntry {
        let version_ranges = if self.version_range.is_empty() {
            vec![VersionRange::all_versions(Severity::Hard)]
        } else {
            self.version_range
        };

        BlockEntry {
            guid_pattern: self.guid,
            version_ranges,
            bug: self.details.bug,
            name: self.details.name.unwrap_or_default(),
            reason: self.details.why.unwrap_or_default(),
            enabled: self.enabled,
            // Creation time is not tracked separately on the wire.
            created_at: Utc
                .timestamp_millis_opt(self.last_modified)
                .single()
                .unwrap_or_default(),
        }
    }
}
