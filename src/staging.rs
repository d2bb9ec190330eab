//! Assembling creation requests for new block entries.

use serde::Serialize;

use crate::entry::Severity;
use crate::pattern;

/// User-supplied metadata shared by every entry staged from one batch.
#[derive(Debug, Clone)]
pub struct BlockMetadata {
    pub name: String,
    pub reason: String,
    pub bug: Option<String>,
    pub severity: Severity,
    pub min_version: String,
    pub max_version: String,
}

/// One record to submit into the staging collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationRequest {
    pub guid: String,
    pub bug: Option<String>,
    pub name: String,
    pub reason: String,
    pub severity: i64,
    #[serde(rename = "minVersion")]
    pub min_version: String,
    #[serde(rename = "maxVersion")]
    pub max_version: String,
}

/// Build one creation request per compiled guid block.
///
/// All requests share the batch metadata. A version range only makes sense
/// for a literal single-guid entry; when several guids collapse into a
/// single alternation block, the range falls back to all versions `{0, *}`.
pub fn build_requests(new_guids: &[String], metadata: &BlockMetadata) -> Vec<CreationRequest> {
    let blocks = pattern::compile(new_guids);
    let force_all_versions = blocks.len() == 1 && new_guids.len() > 1;

    blocks
        .into_iter()
        .map(|guid| {
            let (min_version, max_version) = if force_all_versions {
                ("0".to_string(), "*".to_string())
            } else {
                (metadata.min_version.clone(), metadata.max_version.clone())
            };
            CreationRequest {
                guid,
                bug: metadata.bug.clone(),
                name: metadata.name.clone(),
                reason: metadata.reason.clone(),
                severity: metadata.severity.code(),
                min_version,
                max_version,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::MAX_PATTERN_LENGTH;

    fn metadata() -> BlockMetadata {
        BlockMetadata {
            name: "Malicious search hijacker".to_string(),
            reason: "Search hijacking and ad injection".to_string(),
            bug: Some("https://bugzilla.mozilla.org/show_bug.cgi?id=222".to_string()),
            severity: Severity::Hard,
            min_version: "1.0".to_string(),
            max_version: "2.5".to_string(),
        }
    }

    fn guids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_guid_keeps_custom_range() {
        let requests = build_requests(&guids(&["one@x.com"]), &metadata());
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].guid, "one@x.com");
        assert_eq!(requests[0].min_version, "1.0");
        assert_eq!(requests[0].max_version, "2.5");
        assert_eq!(requests[0].severity, 3);
    }

    #[test]
    fn test_single_block_from_many_guids_forces_all_versions() {
        let requests = build_requests(&guids(&["a@x.com", "b@x.com"]), &metadata());
        assert_eq!(requests.len(), 1);
        assert!(requests[0].guid.starts_with("/^(("));
        assert_eq!(requests[0].min_version, "0");
        assert_eq!(requests[0].max_version, "*");
        // Severity still comes from the metadata.
        assert_eq!(requests[0].severity, 3);
    }

    #[test]
    fn test_multi_block_keeps_metadata_range() {
        let input: Vec<String> = (0..300)
            .map(|i| format!("extension-{i:04}@long-publisher-domain.example"))
            .collect();
        let requests = build_requests(&input, &metadata());
        assert!(requests.len() > 1);
        for request in &requests {
            assert!(request.guid.len() <= MAX_PATTERN_LENGTH);
            assert_eq!(request.min_version, "1.0");
            assert_eq!(request.max_version, "2.5");
            assert_eq!(request.name, "Malicious search hijacker");
            assert_eq!(
                request.bug.as_deref(),
                Some("https://bugzilla.mozilla.org/show_bug.cgi?id=222")
            );
        }
    }

    #[test]
    fn test_request_count_equals_block_count() {
        let input = guids(&["a@x.com", "b@x.com", "c@x.com"]);
        let requests = build_requests(&input, &metadata());
        assert_eq!(requests.len(), pattern::compile(&input).len());
    }

    #[test]
    fn test_serializes_wire_field_names() {
        let requests = build_requests(&guids(&["one@x.com"]), &metadata());
        let json = serde_json::to_value(&requests[0]).unwrap();
        assert_eq!(json["minVersion"], "1.0");
        assert_eq!(json["maxVersion"], "2.5");
        assert_eq!(json["severity"], 3);
        assert_eq!(json["guid"], "one@x.com");
    }

    #[test]
    fn test_soft_severity_code() {
        let meta = BlockMetadata {
            severity: Severity::Soft,
            ..metadata()
        };
        let requests = build_requests(&guids(&["one@x.com"]), &meta);
        assert_eq!(requests[0].severity, 1);
    }
}
