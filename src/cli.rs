//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::entry::Severity;

#[derive(Parser)]
#[command(name = "amoblock")]
#[command(
    author,
    version,
    about = "Staging and review workflow for the Mozilla add-on blocklist"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "amoblock.yaml", global = true)]
    pub config: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check which guids are already blocked
    Check {
        /// File with one guid per line ("-" for stdin)
        input: PathBuf,
    },

    /// Stage new block entries for guids that are not yet blocked
    Stage {
        /// File with one guid per line ("-" for stdin)
        input: PathBuf,

        /// Short name for the block entry
        #[arg(long)]
        name: String,

        /// Why these add-ons are being blocked
        #[arg(long)]
        reason: String,

        /// Bug reference URL for the originating tracker issue
        #[arg(long)]
        bug: Option<String>,

        /// Block severity (soft, hard)
        #[arg(long, default_value = "hard")]
        severity: Severity,

        /// Minimum affected add-on version
        #[arg(long, default_value = "0")]
        min_version: String,

        /// Maximum affected add-on version
        #[arg(long, default_value = "*")]
        max_version: String,

        /// Also allow staging while earlier changes are still unsigned
        #[arg(long)]
        staged: bool,

        /// Build the creation requests but don't submit them
        #[arg(long)]
        dry_run: bool,
    },

    /// List blocklist entries
    List {
        /// Limit number of entries to show
        #[arg(long, short, default_value = "20")]
        limit: usize,
    },

    /// Show collection state and entry counts
    Status,

    /// Drive the review lifecycle of the staged collection
    Collection {
        #[command(subcommand)]
        action: CollectionAction,
    },

    /// Expand an alternation-regex guid pattern into its guids
    Expand {
        /// Guid pattern (literal or /^((..)|(..))$/ form)
        pattern: String,
    },

    /// Show version
    Version,
}

#[derive(Subcommand)]
pub enum CollectionAction {
    /// Move a work-in-progress collection to review
    Review,
    /// Sign off the collection under review
    Sign,
    /// Send the collection under review back to work-in-progress
    Reject,
}
