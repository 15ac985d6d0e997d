/*! Deduplication

Exact deduplication on truncated content digests.

Each text is hashed with SHA-256 and only the first 8 bytes (16 hex characters) are kept.
Texts longer than [Sampling::threshold] codepoints are only hashed on their first and last
[Sampling::edge] codepoints. Two long texts that only differ in their middle are thus considered duplicates:
this is a known false positive, traded for cost on very long documents.
!*/
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::filtering::FilterMut;

/// Head/tail sampling of long texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sampling {
    /// texts strictly longer than this (in codepoints) are sampled.
    pub threshold: usize,
    /// number of codepoints kept at each end.
    pub edge: usize,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            threshold: 5000,
            edge: 1000,
        }
    }
}

/// Content digest: the first 8 bytes of a SHA-256.
pub fn digest(text: &str) -> u64 {
    let hash = Sha256::digest(text.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash[..8]);
    u64::from_be_bytes(head)
}

/// 16-character, zero-padded hex form of a [digest].
pub fn digest_hex(digest: u64) -> String {
    format!("{digest:016x}")
}

/// Set of seen digests.
///
/// Grows monotonically, and is meant to be scoped to the processing of a single language.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    seen: HashSet<u64>,
    sampling: Option<Sampling>,
}

impl Default for Deduplicator {
    /// Head/tail sampling with default [Sampling].
    fn default() -> Self {
        Self::new(Sampling::default())
    }
}

impl Deduplicator {
    /// Deduplicator with head/tail sampling of long texts.
    pub fn new(sampling: Sampling) -> Self {
        Self {
            seen: HashSet::new(),
            sampling: Some(sampling),
        }
    }

    /// Deduplicator that always hashes whole texts.
    pub fn full() -> Self {
        Self {
            seen: HashSet::new(),
            sampling: None,
        }
    }

    /// Digest of the (possibly sampled) text.
    pub fn key(&self, text: &str) -> u64 {
        match self.sampling {
            Some(s) if text.chars().nth(s.threshold).is_some() => {
                let head_end = text
                    .char_indices()
                    .nth(s.edge)
                    .map_or(text.len(), |(i, _)| i);
                let tail_start = match s.edge {
                    0 => text.len(),
                    edge => text
                        .char_indices()
                        .rev()
                        .nth(edge - 1)
                        .map_or(0, |(i, _)| i),
                };

                let mut sample = String::with_capacity(head_end + text.len() - tail_start);
                sample.push_str(&text[..head_end]);
                sample.push_str(&text[tail_start..]);
                digest(&sample)
            }
            _ => digest(text),
        }
    }

    /// Check and insert: returns `true` if `text` has already been seen,
    /// registering it otherwise.
    pub fn is_duplicate(&mut self, text: &str) -> bool {
        !self.seen.insert(self.key(text))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

/// Keeps texts that have not been seen yet.
impl FilterMut<&str> for Deduplicator {
    fn detect_mut(&mut self, text: &str) -> bool {
        !self.is_duplicate(text)
    }
}
