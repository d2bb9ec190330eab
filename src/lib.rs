//! # amoblock - Add-on Blocklist Staging Tool
//!
//! A command-line workflow assistant for Mozilla add-on blocklist curation.
//! It fetches the remote blocklist collection, works out which submitted
//! guids are already blocked, stages new block entries (a literal guid or a
//! generated alternation regex split across size-bounded blocks), and drives
//! the collection review lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       amoblock                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: check, stage, list, status, collection...  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Server, bucket/collection, zeroized auth token       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                 │
//! │    └── RemoteStore: records, collection status, creation    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Index (regex)                                              │
//! │    └── Exact/regex partition, candidate classification      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Pattern codec                                              │
//! │    └── Guid list <-> bounded alternation-regex blocks       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Workflow guard                                             │
//! │    └── work-in-progress -> to-review -> to-sign -> signed   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use amoblock::config::Config;
//! use amoblock::fetcher::{RemoteSettings, RemoteStore};
//! use amoblock::index::BlocklistIndex;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let config = Config::load("amoblock.yaml")?;
//!
//!     // Fetch the current blocklist snapshot
//!     let store = RemoteSettings::new(&config)?;
//!     let snapshot = store.fetch_snapshot().await?;
//!
//!     // Classify candidates against it
//!     let index = BlocklistIndex::build(snapshot);
//!     let candidates = vec!["suspect@ext.example".to_string()];
//!     let result = index.classify(&candidates);
//!     println!("{} new guids", result.new_guids.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`entry`] - Block entry model (severity, version ranges, bug refs)
//! - [`error`] - Error types
//! - [`fetcher`] - HTTP client for the remote collection store
//! - [`index`] - Snapshot index and guid classification
//! - [`pattern`] - Guid/alternation-regex codec
//! - [`staging`] - Creation-request assembly
//! - [`utils`] - Common utility functions (formatting, truncation)
//! - [`workflow`] - Collection review lifecycle guard

pub mod cli;
pub mod commands;
pub mod config;
pub mod entry;
pub mod error;
pub mod fetcher;
pub mod index;
pub mod pattern;
pub mod staging;
pub mod utils;
pub mod workflow;

pub use cli::{Cli, CollectionAction, Commands};
pub use config::Config;
pub use error::AmoblockError;
