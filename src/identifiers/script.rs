/*! Script identification

Coarse writing-system identification for code-switched Hindi/English/Sanskrit text.

A [ScriptProfile] is computed on the first [ScriptClassifier::sample_size] codepoints of a text
by counting letters that are in the Devanagari block, ASCII Latin letters and other letters.
The profile is then mapped to a [ScriptLabel] using [ScriptThresholds], checked in order:

| check                           | label                 |
|---------------------------------|-----------------------|
| devanagari ratio > 0.7          | `devanagari`          |
| devanagari ratio > 0.3          | `mixed_devanagari`    |
| latin ratio > 0.9               | `latin`               |
| latin ratio > 0.6               | `latin_dominant`      |
| otherwise                       | `mixed`               |

Texts without any letter are `unknown`.
!*/
use std::{collections::HashMap, fmt, hash::Hasher};

use log::debug;
use serde::{Deserialize, Serialize};
use twox_hash::XxHash64;
use unic_ucd::GeneralCategory;

/// Devanagari Unicode block.
const DEVANAGARI: std::ops::RangeInclusive<char> = '\u{0900}'..='\u{097F}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptLabel {
    Devanagari,
    MixedDevanagari,
    Latin,
    LatinDominant,
    Mixed,
    Unknown,
}

impl ScriptLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptLabel::Devanagari => "devanagari",
            ScriptLabel::MixedDevanagari => "mixed_devanagari",
            ScriptLabel::Latin => "latin",
            ScriptLabel::LatinDominant => "latin_dominant",
            ScriptLabel::Mixed => "mixed",
            ScriptLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ScriptLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ratio thresholds. Every comparison is strict (`ratio > threshold`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptThresholds {
    pub devanagari: f64,
    pub mixed_devanagari: f64,
    pub latin: f64,
    pub latin_dominant: f64,
}

impl Default for ScriptThresholds {
    fn default() -> Self {
        Self {
            devanagari: 0.7,
            mixed_devanagari: 0.3,
            latin: 0.9,
            latin_dominant: 0.6,
        }
    }
}

/// Letter counts of a text sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptProfile {
    alpha: usize,
    devanagari: usize,
    latin: usize,
}

impl ScriptProfile {
    /// Single pass over `sample`.
    pub fn new(sample: &str) -> Self {
        let mut profile = Self::default();
        for c in sample.chars().filter(|c| GeneralCategory::of(*c).is_letter()) {
            profile.alpha += 1;
            if DEVANAGARI.contains(&c) {
                profile.devanagari += 1;
            } else if c.is_ascii() {
                profile.latin += 1;
            }
        }
        profile
    }

    pub fn alpha(&self) -> usize {
        self.alpha
    }

    pub fn devanagari(&self) -> usize {
        self.devanagari
    }

    pub fn latin(&self) -> usize {
        self.latin
    }

    /// Letters that are neither Devanagari nor ASCII.
    pub fn other(&self) -> usize {
        self.alpha - self.devanagari - self.latin
    }

    /// `None` if there is no letter.
    pub fn devanagari_ratio(&self) -> Option<f64> {
        (self.alpha > 0).then(|| self.devanagari as f64 / self.alpha as f64)
    }

    /// `None` if there is no letter.
    pub fn latin_ratio(&self) -> Option<f64> {
        (self.alpha > 0).then(|| self.latin as f64 / self.alpha as f64)
    }

    /// derive the label. First matching threshold wins.
    pub fn label(&self, thresholds: &ScriptThresholds) -> ScriptLabel {
        let (dev, lat) = match (self.devanagari_ratio(), self.latin_ratio()) {
            (Some(dev), Some(lat)) => (dev, lat),
            _ => return ScriptLabel::Unknown,
        };

        if dev > thresholds.devanagari {
            ScriptLabel::Devanagari
        } else if dev > thresholds.mixed_devanagari {
            ScriptLabel::MixedDevanagari
        } else if lat > thresholds.latin {
            ScriptLabel::Latin
        } else if lat > thresholds.latin_dominant {
            ScriptLabel::LatinDominant
        } else {
            ScriptLabel::Mixed
        }
    }
}

/// Script classifier with a bounded result cache.
///
/// The cache is keyed by a hash of the sampled prefix. Once it holds
/// [ScriptClassifier::cache_capacity] entries, no new entries are inserted
/// (no eviction): it becomes read-only.
#[derive(Debug, Clone)]
pub struct ScriptClassifier {
    thresholds: ScriptThresholds,
    sample_size: usize,
    cache_capacity: usize,
    cache: HashMap<u64, ScriptLabel>,
}

impl ScriptClassifier {
    pub fn new(thresholds: ScriptThresholds, sample_size: usize, cache_capacity: usize) -> Self {
        Self {
            thresholds,
            sample_size,
            cache_capacity,
            cache: HashMap::new(),
        }
    }

    pub fn with_thresholds(thresholds: ScriptThresholds) -> Self {
        Self {
            thresholds,
            ..Default::default()
        }
    }

    /// Classify `text`, using only its first [Self::sample_size] codepoints.
    pub fn classify(&mut self, text: &str) -> ScriptLabel {
        let sample = self.sample(text);
        let key = Self::key(sample);

        if let Some(label) = self.cache.get(&key) {
            return *label;
        }

        let label = ScriptProfile::new(sample).label(&self.thresholds);
        if self.cache.len() < self.cache_capacity {
            self.cache.insert(key, label);
        } else {
            debug!("script cache saturated ({} entries)", self.cache.len());
        }

        label
    }

    /// Profile of the sampled prefix, without touching the cache.
    pub fn profile(&self, text: &str) -> ScriptProfile {
        ScriptProfile::new(self.sample(text))
    }

    /// Prefix of `text` that holds at most `sample_size` codepoints.
    fn sample<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.sample_size) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }

    fn key(sample: &str) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(sample.as_bytes());
        hasher.finish()
    }

    pub fn thresholds(&self) -> &ScriptThresholds {
        &self.thresholds
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    /// number of cached labels.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl Default for ScriptClassifier {
    /// 500 codepoints sample, 10 000 cached labels.
    fn default() -> Self {
        ClassifierConfig::default().build()
    }
}

/// Serializable [ScriptClassifier] settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    pub thresholds: ScriptThresholds,
    pub sample_size: usize,
    pub cache_capacity: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            thresholds: ScriptThresholds::default(),
            sample_size: 500,
            cache_capacity: 10_000,
        }
    }
}

impl ClassifierConfig {
    pub fn build(&self) -> ScriptClassifier {
        ScriptClassifier::new(self.thresholds, self.sample_size, self.cache_capacity)
    }
}
