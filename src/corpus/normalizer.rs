//! Text normalization for corpus assembly.

use regex::Regex;

/// Scrubs raw page text down to a configured allowed character set and
/// collapses whitespace.
///
/// Normalization is idempotent: applying it twice yields the same string.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    disallowed: Regex,
    whitespace: Regex,
}

impl TextNormalizer {
    /// Build a normalizer from a character-class pattern matching the
    /// characters to replace (everything outside the allowed set). Both
    /// regexes compile once here, never in the per-page path.
    pub fn new(disallowed_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            disallowed: Regex::new(disallowed_pattern)?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Replace disallowed characters with spaces, collapse whitespace runs
    /// to a single space and trim. Empty input yields empty output.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let scrubbed = self.disallowed.replace_all(text, " ");
        let collapsed = self.whitespace.replace_all(&scrubbed, " ");
        collapsed.trim().to_string()
    }
}
