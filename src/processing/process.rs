/*! Processed corpus

Turns the raw batch files of a language into a single, sentence-per-line corpus file:

1. every raw `.txt` batch file is re-split into texts,
1. texts are segmented into sentences, keeping the ones that have at least 3 words,
1. sentences are deduplicated (whole-text hashing),
1. unique sentences are written to `processed/<lang>_corpus.txt`, and statistics to `metadata/processing_stats.json`.

English is segmented after `.`, `!` and `?` (punctuation is kept).
Other languages are split on runs of `।`, `॥`, `.`, `!` and `?` (delimiters are dropped).
!*/
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    filtering::{Filter, FilterMut, WordCount},
    io::{reader, Layout},
    lang::Lang,
    processing::{dedup::Deduplicator, tokens::TokenEstimator},
};

/// Number of sentences the token count is estimated on.
const TOKEN_SAMPLE: usize = 1000;

const ENGLISH_TERMINALS: &[char] = &['.', '!', '?'];
const TRAILING: &[char] = &['.', '!', '?', '"', '\'', ')'];
const DELIMITERS: &[char] = &['।', '॥', '.', '!', '?'];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingStats {
    pub language: Lang,
    /// Unique sentences written.
    pub total_texts: usize,
    /// Estimated on the first 1000 unique sentences.
    pub total_tokens: u64,
    pub duplicates_removed: usize,
    /// `duplicates_removed / sentences`. `0` when there is no sentence.
    pub deduplication_ratio: f64,
}

/// Split English text after terminal punctuation followed by whitespace.
fn split_english(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !ENGLISH_TERMINALS.contains(&c) {
            continue;
        }

        let mut end = idx + c.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if !TRAILING.contains(&next) {
                break;
            }
            end = next_idx + next.len_utf8();
            chars.next();
        }

        if chars.peek().map_or(true, |(_, next)| next.is_whitespace()) {
            sentences.push(&text[start..end]);
            start = end;
        }
    }
    sentences.push(&text[start..]);
    sentences
}

/// Segment `text` into trimmed sentences of at least 3 words.
pub fn segment<'a>(text: &'a str, lang: &Lang) -> Vec<&'a str> {
    let words = WordCount::default();
    let pieces = match lang {
        Lang::English => split_english(text),
        _ => text.split(DELIMITERS).collect(),
    };

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|s| words.detect(*s))
        .collect()
}

/// Build the processed corpus of `lang` in `dst`.
pub fn process_language(
    dst: &Path,
    lang: &Lang,
    estimator: &TokenEstimator,
) -> Result<ProcessingStats, Error> {
    let layout = Layout::new(dst);
    layout.create(lang)?;
    info!("[{lang}] processing raw files");

    let mut dedup = Deduplicator::full();
    let mut out = BufWriter::new(File::create(layout.corpus_file(lang))?);
    let mut sentences = 0;
    let mut unique = 0;
    let mut total_tokens = 0;

    for file in reader::batch_files(&layout.raw(lang))? {
        let content = std::fs::read_to_string(&file)?;
        for text in reader::split_batch(&content) {
            for sentence in segment(text, lang) {
                sentences += 1;
                if !dedup.detect_mut(sentence) {
                    continue;
                }

                if unique < TOKEN_SAMPLE {
                    total_tokens += estimator.count(sentence, lang) as u64;
                }
                unique += 1;
                out.write_all(sentence.as_bytes())?;
                out.write_all(b"\n")?;
            }
        }
    }
    out.flush()?;

    let duplicates_removed = sentences - unique;
    let stats = ProcessingStats {
        language: lang.clone(),
        total_texts: unique,
        total_tokens,
        duplicates_removed,
        deduplication_ratio: if sentences == 0 {
            0.0
        } else {
            duplicates_removed as f64 / sentences as f64
        },
    };

    let f = File::create(layout.stats_file(lang))?;
    serde_json::to_writer_pretty(f, &stats)?;
    info!(
        "[{lang}] processed: {unique} unique sentences ({duplicates_removed} duplicates removed)"
    );

    Ok(stats)
}

/// Process every language of `langs` concurrently.
///
/// Each language has its own deduplication set.
pub fn process_all(
    dst: &Path,
    langs: &[Lang],
    estimator: &TokenEstimator,
) -> Result<Vec<ProcessingStats>, Error> {
    langs
        .par_iter()
        .map(|lang| process_language(dst, lang, estimator))
        .collect()
}
