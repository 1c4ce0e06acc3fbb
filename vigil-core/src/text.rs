//! Text normalization for keyword matching
//!
//! All keyword lookups are plain substring checks, so both the article text
//! and the keyword tables go through the same folding: NFKC normalization
//! followed by Unicode lower-casing. This lets Cyrillic and Latin keyword
//! lists match text regardless of composed/decomposed forms or case.

use unicode_normalization::UnicodeNormalization;

/// Normalize text for case-insensitive substring matching
pub fn normalize(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Collapse runs of whitespace into single spaces
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters, respecting char boundaries
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Normalize a static keyword list once
pub fn normalize_all(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| normalize(k)).collect()
}

/// True if any of the (already normalized) keywords occurs in `normalized_text`
pub fn contains_any(normalized_text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| normalized_text.contains(k.as_str()))
}
