//! Target languages.
//!
//! The corpus is built for three languages, processed in a fixed order ([ORDER]).
//! Any other language name is carried as [Lang::Other] and gets permissive defaults
//! (no script restriction, word count used as-is for token estimation).
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Lang {
    English,
    Hindi,
    Sanskrit,
    Other(String),
}

/// Processing order of a full corpus run.
pub const ORDER: [Lang; 3] = [Lang::English, Lang::Hindi, Lang::Sanskrit];

impl Lang {
    /// Long, lowercase name (used for directories and reports).
    pub fn name(&self) -> &str {
        match self {
            Lang::English => "english",
            Lang::Hindi => "hindi",
            Lang::Sanskrit => "sanskrit",
            Lang::Other(name) => name,
        }
    }

    /// `true` for languages written in Devanagari.
    pub fn is_devanagari(&self) -> bool {
        matches!(self, Lang::Hindi | Lang::Sanskrit)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Lang {
    type Err = Error;

    /// Accepts long names and ISO 639-1/639-3 codes.
    /// Anything else non-empty becomes [Lang::Other].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "" => Err(Error::UnknownLang(s.to_string())),
            "english" | "en" | "eng" => Ok(Lang::English),
            "hindi" | "hi" | "hin" => Ok(Lang::Hindi),
            "sanskrit" | "sa" | "san" => Ok(Lang::Sanskrit),
            _ => Ok(Lang::Other(lower)),
        }
    }
}

impl TryFrom<String> for Lang {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Lang::from_str(&s)
    }
}

impl From<Lang> for String {
    fn from(l: Lang) -> Self {
        l.name().to_string()
    }
}
