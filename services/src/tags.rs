//! Hashtag extraction from tweet text.
//!
//! A tag token is a `#` followed by zero or more word characters
//! (`[A-Za-z0-9_]`). The leading `#` is stripped; whatever remains, including
//! the empty string for a bare `#`, is the tag. Extraction is pure: the same
//! text always yields the same tags, in order of appearance, duplicates kept.

use regex::Regex;
use std::sync::OnceLock;

static TAG_FINDER: OnceLock<Regex> = OnceLock::new();

fn tag_finder() -> &'static Regex {
    TAG_FINDER.get_or_init(|| Regex::new(r"#[A-Za-z0-9_]*").expect("tag pattern is valid"))
}

/// Extract all hashtag tokens from `text`, left to right.
pub fn extract_tags(text: &str) -> Vec<String> {
    tag_finder()
        .find_iter(text)
        .map(|m| m.as_str()[1..].to_owned())
        .collect()
}
