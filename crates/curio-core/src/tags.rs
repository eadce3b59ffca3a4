//! Tag name normalization and provider-output parsing.
//!
//! Comparison is case-sensitive everywhere: "Biology" and "biology" are
//! distinct tags. Normalization is limited to whitespace trimming and
//! dropping empty entries.

use crate::defaults::TAG_MAX_LEN;

/// Normalize a desired tag list: trim whitespace, drop empties, dedupe
/// while preserving first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::new();
    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            result.push(trimmed.to_string());
        }
    }
    result
}

/// Parse the tag-generation provider's comma-delimited output.
///
/// Returns an empty vector for unparseable or blank output; the save flow
/// treats that as "no tags asserted", never as "remove all tags".
pub fn parse_generated_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

/// Validate a single tag name.
///
/// Rules:
/// - non-empty after trimming
/// - at most [`TAG_MAX_LEN`] characters
///
/// Returns Ok(()) if valid, Err with message if invalid.
pub fn validate_tag_name(tag: &str) -> std::result::Result<(), String> {
    if tag.trim().is_empty() {
        return Err("Tag name cannot be empty".to_string());
    }
    if tag.len() > TAG_MAX_LEN {
        return Err(format!(
            "Tag name must be {} characters or less",
            TAG_MAX_LEN
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_empties() {
        let tags = normalize_tags(vec![" Biology ", "", "  ", "Genetics"]);
        assert_eq!(tags, vec!["Biology", "Genetics"]);
    }

    #[test]
    fn test_normalize_preserves_case() {
        let tags = normalize_tags(vec!["Biology", "biology"]);
        assert_eq!(tags, vec!["Biology", "biology"]);
    }

    #[test]
    fn test_normalize_dedupes_preserving_order() {
        let tags = normalize_tags(vec!["B", "A", "B", "C", "A"]);
        assert_eq!(tags, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_parse_generated_tags_comma_delimited() {
        let tags = parse_generated_tags("Biology, Genetics");
        assert_eq!(tags, vec!["Biology", "Genetics"]);
    }

    #[test]
    fn test_parse_generated_tags_trailing_newline() {
        let tags = parse_generated_tags("Health & Wellness, Nutrition\n");
        assert_eq!(tags, vec!["Health & Wellness", "Nutrition"]);
    }

    #[test]
    fn test_parse_generated_tags_empty_output() {
        assert!(parse_generated_tags("").is_empty());
        assert!(parse_generated_tags("   ").is_empty());
        assert!(parse_generated_tags(",,,").is_empty());
    }

    #[test]
    fn test_validate_tag_name_rejects_empty() {
        assert!(validate_tag_name("").is_err());
        assert!(validate_tag_name("   ").is_err());
    }

    #[test]
    fn test_validate_tag_name_rejects_oversized() {
        let long = "x".repeat(TAG_MAX_LEN + 1);
        assert!(validate_tag_name(&long).is_err());
        let fits = "x".repeat(TAG_MAX_LEN);
        assert!(validate_tag_name(&fits).is_ok());
    }

    #[test]
    fn test_validate_tag_name_accepts_spaces_inside() {
        assert!(validate_tag_name("Molecular Biology").is_ok());
    }
}
