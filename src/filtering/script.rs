//! Script admissibility per target language.
//!
//! Hindi commonly code-switches with English, so `mixed` text is admitted for Hindi.
//! Sanskrit is restricted to Devanagari-dominant labels.
//! Languages without a policy admit everything.
use crate::identifiers::ScriptLabel;
use crate::lang::Lang;

use super::Filter;

/// Language appropriateness filter. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptPolicy;

impl ScriptPolicy {
    /// Labels admitted for `lang`. `None` means no restriction.
    pub fn admitted(lang: &Lang) -> Option<&'static [ScriptLabel]> {
        use ScriptLabel::*;
        match lang {
            Lang::English => Some(&[Latin, LatinDominant, Mixed]),
            Lang::Hindi => Some(&[Devanagari, MixedDevanagari, Mixed]),
            Lang::Sanskrit => Some(&[Devanagari, MixedDevanagari]),
            Lang::Other(_) => None,
        }
    }

    pub fn is_appropriate(label: ScriptLabel, lang: &Lang) -> bool {
        Self::admitted(lang).map_or(true, |labels| labels.contains(&label))
    }
}

impl Filter<(ScriptLabel, &Lang)> for ScriptPolicy {
    fn detect(&self, (label, lang): (ScriptLabel, &Lang)) -> bool {
        Self::is_appropriate(label, lang)
    }
}
