//! Blocklist entry model shared by the index, the staging builder and the
//! remote store client.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::AmoblockError;

/// Bug references carry their id as an `id=` query parameter.
static BUG_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id=(\d+)").expect("bug id pattern should compile"));

/// Block strength as encoded in the remote `versionRange.severity` field.
///
/// The remote data occasionally carries severity codes outside the two
/// documented values; those are preserved and rendered as `unknown(N)`
/// rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Severity {
    /// Warn the user but keep the add-on enabled (code 1).
    Soft,
    /// Disable the add-on outright (code 3).
    Hard,
    /// Any other code observed in remote data.
    Other(i64),
}

impl Severity {
    pub fn code(self) -> i64 {
        match self {
            Self::Soft => 1,
            Self::Hard => 3,
            Self::Other(code) => code,
        }
    }
}

impl From<i64> for Severity {
    fn from(code: i64) -> Self {
        match code {
            1 => Self::Soft,
            3 => Self::Hard,
            other => Self::Other(other),
        }
    }
}

impl From<Severity> for i64 {
    fn from(severity: Severity) -> Self {
        severity.code()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Soft => f.write_str("soft"),
            Self::Hard => f.write_str("hard"),
            Self::Other(code) => write!(f, "unknown({code})"),
        }
    }
}

impl FromStr for Severity {
    type Err = AmoblockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soft" | "1" => Ok(Self::Soft),
            "hard" | "3" => Ok(Self::Hard),
            other => Err(AmoblockError::Parse(format!(
                "Invalid severity '{other}'. Use 'soft' or 'hard'"
            ))),
        }
    }
}

/// One applicability range of a block entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRange {
    #[serde(rename = "minVersion", default = "default_min_version")]
    pub min_version: String,
    #[serde(rename = "maxVersion", default = "default_max_version")]
    pub max_version: String,
    pub severity: Severity,
}

fn default_min_version() -> String {
    "0".to_string()
}

fn default_max_version() -> String {
    "*".to_string()
}

impl VersionRange {
    /// The `{0, *}` range blocking every version of the add-on.
    pub fn all_versions(severity: Severity) -> Self {
        Self {
            min_version: default_min_version(),
            max_version: default_max_version(),
            severity,
        }
    }

    pub fn is_all_versions(&self) -> bool {
        self.min_version == "0" && self.max_version == "*"
    }
}

/// One existing or prospective blocklist record.
#[derive(Debug, Clone)]
pub struct BlockEntry {
    /// Literal guid, or a `/.../`-delimited alternation-regex source.
    pub guid_pattern: String,
    /// At least one range; missing ranges on the wire default to `{0, *}`.
    pub version_ranges: Vec<VersionRange>,
    /// URL-shaped pointer to the originating tracker issue.
    pub bug: Option<String>,
    pub name: String,
    pub reason: String,
    /// Disabled entries still match candidates; callers flag them instead.
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl BlockEntry {
    pub fn is_regex(&self) -> bool {
        self.guid_pattern.starts_with('/')
    }

    /// Bug id parsed from the reference URL, `None` when the reference does
    /// not carry an `id=` parameter.
    pub fn bug_id(&self) -> Option<u64> {
        self.bug.as_deref().and_then(extract_bug_id)
    }

    /// Severity of the first version range, the one shown in listings.
    pub fn severity(&self) -> Severity {
        self.version_ranges
            .first()
            .map(|range| range.severity)
            .unwrap_or(Severity::Hard)
    }
}

/// Extract a numeric bug id from a tracker reference URL.
pub fn extract_bug_id(reference: &str) -> Option<u64> {
    BUG_ID
        .captures(reference)
        .and_then(|captures| captures.get(1))
        .and_then(|id| id.as_str().parse().ok())
}
