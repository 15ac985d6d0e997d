//! Text-level length gates.
use super::Filter;

/// Simple length filter.
/// Returns `false` if provided text is less than [Length::min_size] unicode codepoints.
///
/// [Length::min_size] is 10 by default.
#[derive(Debug, Clone)]
pub struct Length {
    min_size: usize,
}

impl Length {
    /// specify a minimum length
    pub fn with_min_size(min_size: usize) -> Self {
        Self { min_size }
    }

    /// Get a reference to the length's min size.
    pub fn min_size(&self) -> &usize {
        &self.min_size
    }
}

impl Filter<&str> for Length {
    fn detect(&self, text: &str) -> bool {
        // avoid a full count on long documents
        text.chars().nth(self.min_size.saturating_sub(1)).is_some() || self.min_size == 0
    }
}

impl Default for Length {
    /// Default minimum length is 10 Unicode Codepoints
    fn default() -> Self {
        Length { min_size: 10 }
    }
}

/// Word count filter, words being whitespace-delimited.
///
/// Returns `false` if provided text has less than [WordCount::min_words] words (3 by default).
#[derive(Debug, Clone)]
pub struct WordCount {
    min_words: usize,
}

impl WordCount {
    pub fn with_min_words(min_words: usize) -> Self {
        Self { min_words }
    }

    pub fn min_words(&self) -> &usize {
        &self.min_words
    }
}

impl Filter<&str> for WordCount {
    fn detect(&self, text: &str) -> bool {
        text.split_whitespace().nth(self.min_words.saturating_sub(1)).is_some()
            || self.min_words == 0
    }
}

impl Default for WordCount {
    fn default() -> Self {
        WordCount { min_words: 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::{Filter, Length, WordCount};

    #[test]
    fn length_default() {
        let valid: String = ['z'; 10].iter().collect();
        let invalid: String = ['z'; 9].iter().collect();

        let f = Length::default();
        assert!(f.detect(&valid));
        assert!(!f.detect(&invalid));
    }

    #[test]
    fn length_counts_codepoints() {
        // 9 codepoints, 27 bytes
        let text = "नमस्तेदोस";
        assert_eq!(text.chars().count(), 9);
        assert!(!Length::default().detect(text));
        assert!(Length::with_min_size(9).detect(text));
    }

    #[test]
    fn word_count() {
        let f = WordCount::default();
        assert!(f.detect("one two three"));
        assert!(f.detect("  one\ttwo\nthree  four"));
        assert!(!f.detect("one two"));
        assert!(!f.detect(""));
        assert!(WordCount::with_min_words(0).detect(""));
    }
}
