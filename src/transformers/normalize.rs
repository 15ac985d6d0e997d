/*! Text normalization

Cleans a candidate text for a given language. Each step is a gate, and a text failing any of them is rejected (`None`):

1. at least [Length::default] codepoints,
1. whitespace runs are collapsed into a single space, and the text is trimmed,
1. at least [WordCount::default] words,
1. characters outside the language allow-list are removed,
1. at least [WordCount::default] words remain,
1. the script of the remaining text is admissible for the language (see [ScriptPolicy]).

Whitespace is collapsed again after removing characters so that a cleaned text is a fixed point of [Normalizer::clean].
!*/
use itertools::Itertools;
use log::debug;
use unic_ucd::GeneralCategory;

use crate::{
    filtering::{Filter, Length, ScriptPolicy, WordCount},
    identifiers::ScriptClassifier,
    lang::Lang,
};

/// Punctuation kept in every language.
const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '-', '\'', '"', '(', ')', '&', '@', '#', '%',
];

/// Devanagari sentence delimiters (danda, double danda).
const DANDAS: &[char] = &['।', '॥'];

/// letters, numbers and underscore.
fn is_word(c: char) -> bool {
    let gc = GeneralCategory::of(c);
    gc.is_letter() || gc.is_number() || c == '_'
}

fn is_devanagari(c: char) -> bool {
    ('\u{0900}'..='\u{097F}').contains(&c)
}

/// Language-specific character allow-list.
/// Languages without an allow-list keep every character.
pub fn allowed(c: char, lang: &Lang) -> bool {
    match lang {
        Lang::English => is_word(c) || c.is_whitespace() || PUNCTUATION.contains(&c),
        lang if lang.is_devanagari() => {
            is_devanagari(c)
                || is_word(c)
                || c.is_whitespace()
                || PUNCTUATION.contains(&c)
                || DANDAS.contains(&c)
        }
        _ => true,
    }
}

/// collapse whitespace runs into single spaces, trimming both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Text cleaner.
///
/// Holds a [ScriptClassifier], so a [Normalizer] should be scoped to a single collection run.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    length: Length,
    words: WordCount,
    classifier: ScriptClassifier,
    policy: ScriptPolicy,
}

impl Normalizer {
    pub fn new(length: Length, words: WordCount, classifier: ScriptClassifier) -> Self {
        Self {
            length,
            words,
            classifier,
            policy: ScriptPolicy,
        }
    }

    /// Use a custom classifier with default length gates.
    pub fn with_classifier(classifier: ScriptClassifier) -> Self {
        Self {
            classifier,
            ..Default::default()
        }
    }

    /// Clean `text` for `lang`. Returns `None` when the text is rejected.
    pub fn clean(&mut self, text: &str, lang: &Lang) -> Option<String> {
        if !self.length.detect(text) {
            return None;
        }

        let text = collapse_whitespace(text);
        if !self.words.detect(text.as_str()) {
            return None;
        }

        let filtered: String = text.chars().filter(|c| allowed(*c, lang)).collect();
        let filtered = if filtered.len() == text.len() {
            filtered
        } else {
            collapse_whitespace(&filtered)
        };

        if !self.words.detect(filtered.as_str()) {
            return None;
        }

        let label = self.classifier.classify(&filtered);
        if !self.policy.detect((label, lang)) {
            debug!("[{lang}] rejected {label} text");
            return None;
        }

        Some(filtered)
    }

    pub fn classifier(&self) -> &ScriptClassifier {
        &self.classifier
    }

    pub fn classifier_mut(&mut self) -> &mut ScriptClassifier {
        &mut self.classifier
    }
}
