//! Robustness tests for edge cases and error conditions.
//!
//! These exercise the library surface against hostile or degenerate input.

use amoblock::entry::{BlockEntry, Severity, VersionRange};
use amoblock::index::BlocklistIndex;
use amoblock::pattern::{compile, expand, MAX_PATTERN_LENGTH};

fn entry(pattern: &str) -> BlockEntry {
    BlockEntry {
        guid_pattern: pattern.to_string(),
        version_ranges: vec![VersionRange::all_versions(Severity::Hard)],
        bug: None,
        name: String::new(),
        reason: String::new(),
        enabled: true,
        created_at: Default::default(),
    }
}

#[test]
fn test_compile_thousands_of_guids() {
    let input: Vec<String> = (0..5000).map(|i| format!("ext-{i}@publisher.example")).collect();
    let blocks = compile(&input);

    assert!(blocks.len() > 1);
    for block in &blocks {
        assert!(block.len() <= MAX_PATTERN_LENGTH);
    }
    let total: usize = blocks.iter().map(|b| expand(b).len()).sum();
    assert_eq!(total, input.len());
}

#[test]
fn test_expand_pathological_nesting() {
    // Deeply nested parens must be declined, not expanded or panicked on.
    let hostile = format!("/^(({}a{}))$/", "(".repeat(100), ")".repeat(100));
    assert!(expand(&hostile).is_empty());
}

#[test]
fn test_expand_embedded_newline_declined() {
    assert!(expand("/^((a@x\\.com)|(b@x\n.com))$/").is_empty());
}

#[test]
fn test_classify_does_not_confuse_comment_like_guids() {
    let index = BlocklistIndex::build(vec![entry("#fake@x.com")]);
    // A candidate starting with '#' is a comment even if an entry exists.
    let result = index.classify(&["#fake@x.com".to_string()]);
    assert!(result.existing.is_empty());
    assert!(result.new_guids.is_empty());
}

#[test]
fn test_classify_unicode_candidates() {
    let index = BlocklistIndex::build(vec![entry("known@x.com")]);
    let result = index.classify(&[
        "\u{feff}known@x.com".to_string(), // BOM is not trimmed: unknown guid
        "caf\u{e9}@x.com".to_string(),
    ]);
    assert_eq!(result.existing.len(), 0);
    assert_eq!(result.new_guids.len(), 2);
}

#[test]
fn test_malformed_snapshot_patterns_do_not_poison_matching() {
    let snapshot = vec![
        entry("/^((ok@x\\.com))$/"),
        entry("/^((broken@x\\.com)$/"), // unbalanced
        entry("/[unterminated/"),
        entry("exact@x.com"),
    ];
    let index = BlocklistIndex::build(snapshot);

    assert_eq!(index.invalid().len(), 2);
    let result = index.classify(&[
        "ok@x.com".to_string(),
        "broken@x.com".to_string(),
        "exact@x.com".to_string(),
    ]);
    assert_eq!(result.existing.len(), 2);
    assert_eq!(result.new_guids, vec!["broken@x.com".to_string()]);
}

#[test]
fn test_regex_entry_anchoring_is_respected() {
    // The stored pattern anchors with ^...$; a guid merely containing a
    // blocked guid as substring must not match.
    let index = BlocklistIndex::build(vec![entry("/^((bad@x\\.com))$/")]);
    let result = index.classify(&["prefix-bad@x.com".to_string()]);
    assert_eq!(result.new_guids.len(), 1);
}

#[test]
fn test_state_labels_reject_underscore_variants() {
    use amoblock::workflow::CollectionState;
    assert!("work_in_progress".parse::<CollectionState>().is_err());
    assert!("WORK-IN-PROGRESS".parse::<CollectionState>().is_err());
}

#[test]
fn test_severity_extremes_render() {
    assert_eq!(Severity::from(i64::MAX).to_string(), format!("unknown({})", i64::MAX));
    assert_eq!(Severity::from(-1).to_string(), "unknown(-1)");
    assert_eq!(Severity::from(0).to_string(), "unknown(0)");
}
