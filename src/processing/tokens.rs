/*! Token estimation

Fast approximation of sub-word token counts from word counts and a per-language multiplier,
truncated to an integer.

An exact count for English can be obtained from a BPE tokenizer (`cl100k_base`) when the crate is built with the `bpe` feature
and [Counting::Precise] is requested. Without the feature, or if the tokenizer cannot be loaded, the fast path is used.
!*/
use std::fmt;
#[cfg(feature = "bpe")]
use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::lang::Lang;

#[cfg(feature = "bpe")]
lazy_static::lazy_static! {
    /// Loaded once, shared by every estimator.
    static ref CL100K: Option<Arc<tiktoken_rs::CoreBPE>> = match tiktoken_rs::cl100k_base() {
        Ok(bpe) => Some(Arc::new(bpe)),
        Err(e) => {
            warn!("could not load cl100k_base ({e}), using fast token estimation");
            None
        }
    };
}

/// Empirical words-to-tokens factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Multipliers {
    pub english: f64,
    pub hindi: f64,
    pub sanskrit: f64,
    /// Used for languages without a dedicated factor.
    pub other: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            english: 1.3,
            hindi: 1.8,
            sanskrit: 2.0,
            other: 1.0,
        }
    }
}

impl Multipliers {
    pub fn get(&self, lang: &Lang) -> f64 {
        match lang {
            Lang::English => self.english,
            Lang::Hindi => self.hindi,
            Lang::Sanskrit => self.sanskrit,
            Lang::Other(_) => self.other,
        }
    }
}

/// Counting strategy, chosen up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counting {
    #[default]
    Fast,
    Precise,
}

#[derive(Clone, Default)]
pub struct TokenEstimator {
    multipliers: Multipliers,
    /// effective strategy
    counting: Counting,
    #[cfg(feature = "bpe")]
    bpe: Option<Arc<tiktoken_rs::CoreBPE>>,
}

impl TokenEstimator {
    #[cfg(feature = "bpe")]
    pub fn new(multipliers: Multipliers, counting: Counting) -> Self {
        let bpe = match counting {
            Counting::Fast => None,
            Counting::Precise => CL100K.clone(),
        };
        Self {
            multipliers,
            counting: if bpe.is_some() {
                Counting::Precise
            } else {
                Counting::Fast
            },
            bpe,
        }
    }

    #[cfg(not(feature = "bpe"))]
    pub fn new(multipliers: Multipliers, counting: Counting) -> Self {
        if counting == Counting::Precise {
            warn!("built without the `bpe` feature, using fast token estimation");
        }
        Self {
            multipliers,
            counting: Counting::Fast,
        }
    }

    /// Estimated number of tokens of `text` in `lang`.
    pub fn count(&self, text: &str, lang: &Lang) -> usize {
        let words = text.split_whitespace().count();
        if words == 0 {
            return 0;
        }

        if let Some(tokens) = self.precise(text, lang) {
            return tokens;
        }

        (words as f64 * self.multipliers.get(lang)) as usize
    }

    #[cfg(feature = "bpe")]
    fn precise(&self, text: &str, lang: &Lang) -> Option<usize> {
        match (lang, &self.bpe) {
            (Lang::English, Some(bpe)) => Some(bpe.encode_ordinary(text).len()),
            _ => None,
        }
    }

    #[cfg(not(feature = "bpe"))]
    fn precise(&self, _text: &str, _lang: &Lang) -> Option<usize> {
        None
    }

    /// `true` if English texts are counted with the BPE tokenizer.
    pub fn is_precise(&self) -> bool {
        self.counting == Counting::Precise
    }

    pub fn multipliers(&self) -> &Multipliers {
        &self.multipliers
    }
}

impl fmt::Debug for TokenEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenEstimator")
            .field("multipliers", &self.multipliers)
            .field("counting", &self.counting)
            .finish()
    }
}
