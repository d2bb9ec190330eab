//! Compiling guid lists into alternation-regex blocks and expanding
//! mechanically generated blocks back into guid lists.
//!
//! A multi-guid block is stored remotely as a single regex of the shape
//! `/^((guid1)|(guid2)|...)$/`. The remote storage field caps the pattern
//! length, so large guid sets are split across several blocks. Expansion is
//! deliberately conservative: handwritten regex entries can be arbitrarily
//! complex, and only the shape produced by [`compile`] is reversed.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of one stored guid pattern, imposed by the remote field.
pub const MAX_PATTERN_LENGTH: usize = 4250;

/// Characters escaped when a guid is embedded into an alternation block.
const ESCAPED: &[char] = &[
    '\\', '$', '^', '*', '+', '.', '?', '(', ')', '{', '}', '|', '[', ']',
];

/// `/^((` + `))$/`
const WRAPPER_OVERHEAD: usize = 8;

/// `)|(` between adjacent guids.
const SEPARATOR_OVERHEAD: usize = 3;

/// A guid inside a generated block: plain guid characters, with `.`, `{`
/// and `}` as the only permitted escapes. Anything else means the pattern
/// was not produced by [`compile`].
static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\\[.{}]|[A-Za-z0-9_@.{}-])+$").expect("segment pattern should compile")
});

/// Compile a guid list into one or more block strings.
///
/// A single guid is returned verbatim. Multiple guids are regex-escaped and
/// packed greedily, in input order, into alternation blocks no longer than
/// [`MAX_PATTERN_LENGTH`]. A guid is never split across blocks and never
/// dropped: one long enough to exceed the bound on its own still becomes a
/// singleton block.
pub fn compile(guids: &[String]) -> Vec<String> {
    if let [only] = guids {
        return vec![only.clone()];
    }

    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = WRAPPER_OVERHEAD;

    for guid in guids {
        let escaped = escape_guid(guid);
        let added = escaped.len()
            + if current.is_empty() {
                0
            } else {
                SEPARATOR_OVERHEAD
            };
        if !current.is_empty() && current_len + added > MAX_PATTERN_LENGTH {
            blocks.push(wrap_block(&current));
            current.clear();
            current_len = WRAPPER_OVERHEAD + escaped.len();
        } else {
            current_len += added;
        }
        current.push(escaped);
    }
    if !current.is_empty() {
        blocks.push(wrap_block(&current));
    }
    blocks
}

/// Expand a guid pattern back into its constituent guids.
///
/// Literal patterns (no leading `/`) expand to themselves. Patterns of the
/// generated alternation shape expand to their de-duplicated guids in
/// first-seen order. Any other regex yields an empty list.
pub fn expand(pattern: &str) -> Vec<String> {
    if !pattern.starts_with('/') {
        return vec![pattern.to_string()];
    }

    // The outer paren pair is optional: both `/^((a)|(b))$/` and
    // `/^(a)|(b)$/` occur in historical data.
    let inner = pattern
        .strip_prefix("/^((")
        .and_then(|rest| rest.strip_suffix("))$/"))
        .or_else(|| {
            pattern
                .strip_prefix("/^(")
                .and_then(|rest| rest.strip_suffix(")$/"))
        });
    let Some(inner) = inner else {
        return Vec::new();
    };

    let mut guids: Vec<String> = Vec::new();
    for segment in inner.split(")|(") {
        if !SEGMENT.is_match(segment) {
            return Vec::new();
        }
        let guid = segment.replace('\\', "");
        if !guids.contains(&guid) {
            guids.push(guid);
        }
    }
    guids
}

fn escape_guid(guid: &str) -> String {
    let mut escaped = String::with_capacity(guid.len());
    for c in guid.chars() {
        if ESCAPED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn wrap_block(escaped_guids: &[String]) -> String {
    format!("/^(({}))$/", escaped_guids.join(")|("))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_compile_single_guid_verbatim() {
        assert_eq!(
            compile(&guids(&["foo@bar.com"])),
            vec!["foo@bar.com".to_string()]
        );
    }

    #[test]
    fn test_compile_empty() {
        assert!(compile(&[]).is_empty());
    }

    #[test]
    fn test_compile_two_guids_escapes_dots() {
        let blocks = compile(&guids(&["a@x.com", "b@x.com"]));
        assert_eq!(blocks, vec![r"/^((a@x\.com)|(b@x\.com))$/".to_string()]);
    }

    #[test]
    fn test_compile_escapes_braces() {
        let blocks = compile(&guids(&[
            "{8a9c8b3e-5f39-4c14-9d0a-77e156a29b0a}",
            "plain@ext.org",
        ]));
        assert!(blocks[0].contains(r"\{8a9c8b3e-5f39-4c14-9d0a-77e156a29b0a\}"));
    }

    #[test]
    fn test_compile_preserves_order() {
        let input = guids(&["c@x.com", "a@x.com", "b@x.com"]);
        let expanded = expand(&compile(&input)[0]);
        assert_eq!(expanded, input);
    }

    #[test]
    fn test_compile_splits_at_length_bound() {
        // Each guid escapes to 50 chars; well over one block's worth.
        let input: Vec<String> = (0..200)
            .map(|i| format!("extension-{i:04}@really-long-domain-name.example"))
            .collect();
        let blocks = compile(&input);
        assert!(blocks.len() > 1);
        for block in &blocks {
            assert!(block.len() <= MAX_PATTERN_LENGTH);
        }
        // No guid dropped and order preserved across blocks.
        let rejoined: Vec<String> = blocks.iter().flat_map(|b| expand(b)).collect();
        assert_eq!(rejoined, input);
    }

    #[test]
    fn test_compile_oversized_guid_gets_own_block() {
        let giant = "g".repeat(MAX_PATTERN_LENGTH + 100);
        let input = guids(&["small@x.com", &giant, "other@x.com"]);
        let blocks = compile(&input);
        let oversized: Vec<&String> = blocks
            .iter()
            .filter(|b| b.len() > MAX_PATTERN_LENGTH)
            .collect();
        assert_eq!(oversized.len(), 1);
        assert_eq!(expand(oversized[0]), vec![giant.clone()]);
        let rejoined: Vec<String> = blocks.iter().flat_map(|b| expand(b)).collect();
        assert_eq!(rejoined, input);
    }

    #[test]
    fn test_expand_literal() {
        assert_eq!(expand("foo@bar.com"), vec!["foo@bar.com".to_string()]);
    }

    #[test]
    fn test_expand_alternation() {
        assert_eq!(
            expand(r"/^((a@x\.com)|(b@x\.com))$/"),
            guids(&["a@x.com", "b@x.com"])
        );
    }

    #[test]
    fn test_expand_without_outer_parens() {
        assert_eq!(
            expand(r"/^(a@x\.com)|(b@x\.com)$/"),
            guids(&["a@x.com", "b@x.com"])
        );
    }

    #[test]
    fn test_expand_deduplicates_first_seen() {
        assert_eq!(
            expand(r"/^((a@x\.com)|(b@x\.com)|(a@x\.com))$/"),
            guids(&["a@x.com", "b@x.com"])
        );
    }

    #[test]
    fn test_expand_rejects_arbitrary_regex() {
        assert!(expand(r"/^mal.*ware@/").is_empty());
        assert!(expand(r"/^((a@x\.com)|(evil.+))$/").is_empty());
        assert!(expand(r"/^(([a-z]+@x\.com))$/").is_empty());
    }

    #[test]
    fn test_expand_rejects_foreign_escapes() {
        // `\d` is not one of the escapes compile emits for guid characters.
        assert!(expand(r"/^((a\d@x\.com))$/").is_empty());
        assert!(expand(r"/^((a\$@x\.com))$/").is_empty());
    }

    #[test]
    fn test_expand_rejects_malformed_wrapper() {
        assert!(expand("/^((a@x.com)$/").is_empty());
        assert!(expand("/no-anchor/").is_empty());
        assert!(expand("/^(())$/").is_empty());
    }

    #[test]
    fn test_round_trip_braces() {
        let input = guids(&["{aaaa}", "{bbbb}"]);
        assert_eq!(expand(&compile(&input)[0]), input);
    }
}
