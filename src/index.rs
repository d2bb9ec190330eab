//! In-memory index over a fetched blocklist snapshot.
//!
//! Built fresh from a snapshot at the start of each operation and discarded
//! at the end; there is no cross-operation persistence. Entries are
//! partitioned at construction into exact-guid and regex entries, so
//! classification never inspects pattern shape at match time.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;
use tracing::debug;

use crate::entry::BlockEntry;

/// A snapshot entry whose regex pattern failed to compile.
///
/// Recorded as a diagnostic and excluded from matching; never fatal to the
/// index build.
#[derive(Debug)]
pub struct MalformedPattern {
    pub guid_pattern: String,
    pub name: String,
    pub error: regex::Error,
}

impl fmt::Display for MalformedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry '{}' has a malformed guid pattern {}: {}",
            self.name, self.guid_pattern, self.error
        )
    }
}

/// Non-fatal anomaly observed while classifying a candidate.
#[derive(Debug, PartialEq, Eq)]
pub enum ClassifyWarning {
    /// More than one regex entry matched; the first one won.
    AmbiguousRegex {
        guid: String,
        patterns: Vec<String>,
    },
    /// The candidate matched an exact entry and regex entries; the exact
    /// entry won.
    ExactShadowsRegex {
        guid: String,
        patterns: Vec<String>,
    },
}

impl fmt::Display for ClassifyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousRegex { guid, patterns } => write!(
                f,
                "guid '{}' matches {} regex entries, keeping the first: {}",
                guid,
                patterns.len(),
                patterns.join(", ")
            ),
            Self::ExactShadowsRegex { guid, patterns } => write!(
                f,
                "guid '{}' has an exact entry that shadows regex entries: {}",
                guid,
                patterns.join(", ")
            ),
        }
    }
}

/// Result of classifying a candidate batch against the index.
///
/// Every candidate that survives trimming and comment filtering lands in
/// exactly one of `existing` or `new_guids`.
#[derive(Debug, Default)]
pub struct GuidClassification<'a> {
    /// Already-blocked guids with their matching entry, in input order.
    pub existing: Vec<(String, &'a BlockEntry)>,
    /// Guids with no matching entry, first-seen order, deduplicated.
    pub new_guids: Vec<String>,
    pub warnings: Vec<ClassifyWarning>,
}

/// Blocklist entries partitioned into exact-guid and regex matchers.
pub struct BlocklistIndex {
    exact: HashMap<String, BlockEntry>,
    /// Insertion order preserved; it decides which entry wins an ambiguous
    /// match and is reported as-is.
    regexes: Vec<(Regex, BlockEntry)>,
    invalid: Vec<MalformedPattern>,
}

impl BlocklistIndex {
    /// Partition a snapshot into matchers. Regex entries that fail to
    /// compile are moved to the invalid list instead of aborting the build.
    pub fn build(snapshot: Vec<BlockEntry>) -> Self {
        let mut exact = HashMap::new();
        let mut regexes = Vec::new();
        let mut invalid = Vec::new();

        for entry in snapshot {
            if entry.is_regex() {
                let source = strip_delimiters(&entry.guid_pattern);
                match Regex::new(source) {
                    Ok(regex) => regexes.push((regex, entry)),
                    Err(error) => invalid.push(MalformedPattern {
                        guid_pattern: entry.guid_pattern.clone(),
                        name: entry.name.clone(),
                        error,
                    }),
                }
            } else if let Some(previous) = exact.insert(entry.guid_pattern.clone(), entry) {
                // The remote store should prevent duplicate guids; keep the
                // later record, matching remote precedence.
                debug!("duplicate exact guid in snapshot: {}", previous.guid_pattern);
            }
        }

        Self {
            exact,
            regexes,
            invalid,
        }
    }

    pub fn exact_count(&self) -> usize {
        self.exact.len()
    }

    pub fn regex_count(&self) -> usize {
        self.regexes.len()
    }

    /// Entries excluded from matching because their pattern failed to
    /// compile.
    pub fn invalid(&self) -> &[MalformedPattern] {
        &self.invalid
    }

    /// Classify candidates into already-blocked and new guids.
    ///
    /// Candidates are trimmed; blank lines and `#` comments are skipped
    /// outright. An exact match takes precedence over regex matches, and
    /// among regex matches the first in snapshot order wins; both overlap
    /// cases are reported as warnings.
    pub fn classify(&self, candidates: &[String]) -> GuidClassification<'_> {
        let mut result = GuidClassification::default();

        for raw in candidates {
            let guid = raw.trim();
            if guid.is_empty() || guid.starts_with('#') {
                continue;
            }
            if result.existing.iter().any(|(g, _)| g == guid)
                || result.new_guids.iter().any(|g| g == guid)
            {
                continue;
            }

            let regex_hits: Vec<&(Regex, BlockEntry)> = self
                .regexes
                .iter()
                .filter(|(regex, _)| regex.is_match(guid))
                .collect();
            let hit_patterns = || -> Vec<String> {
                regex_hits
                    .iter()
                    .map(|(_, entry)| entry.guid_pattern.clone())
                    .collect()
            };

            if let Some(entry) = self.exact.get(guid) {
                if !regex_hits.is_empty() {
                    result.warnings.push(ClassifyWarning::ExactShadowsRegex {
                        guid: guid.to_string(),
                        patterns: hit_patterns(),
                    });
                }
                result.existing.push((guid.to_string(), entry));
            } else if let Some((_, entry)) = regex_hits.first() {
                if regex_hits.len() > 1 {
                    result.warnings.push(ClassifyWarning::AmbiguousRegex {
                        guid: guid.to_string(),
                        patterns: hit_patterns(),
                    });
                }
                result.existing.push((guid.to_string(), entry));
            } else {
                result.new_guids.push(guid.to_string());
            }
        }

        result
    }
}

/// Strip the `/.../` delimiters around a regex-form guid pattern.
fn strip_delimiters(pattern: &str) -> &str {
    let inner = pattern.strip_prefix('/').unwrap_or(pattern);
    inner.strip_suffix('/').unwrap_or(inner)
}
