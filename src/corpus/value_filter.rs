//! Word-count gate for merged documents.

/// Accepts normalized text only when it carries strictly more than
/// `min_words` whitespace-delimited words.
#[derive(Debug, Clone, Copy)]
pub struct ValueFilter {
    min_words: usize,
}

impl ValueFilter {
    #[must_use]
    pub fn new(min_words: usize) -> Self {
        Self { min_words }
    }

    #[must_use]
    pub fn is_valuable(&self, text: &str) -> bool {
        text.split_whitespace().count() > self.min_words
    }
}

impl Default for ValueFilter {
    fn default() -> Self {
        Self::new(30)
    }
}
