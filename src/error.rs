//! Error enum
use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    UnknownLang(String),
    /// A record lacks the expected text field, or it is not a string.
    MalformedRecord(String),
    /// The external source could not be opened or streamed.
    SourceUnavailable { source: String, reason: String },
    /// Accepted texts could not be stored.
    Sink { lang: String, reason: String },
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Serde(e) => write!(f, "json error: {e}"),
            Error::Glob(e) => write!(f, "glob error: {e}"),
            Error::GlobPattern(e) => write!(f, "invalid glob pattern: {e}"),
            Error::UnknownLang(l) => write!(f, "unknown language: {l}"),
            Error::MalformedRecord(r) => write!(f, "malformed record: {r}"),
            Error::SourceUnavailable { source, reason } => {
                write!(f, "source {source} unavailable: {reason}")
            }
            Error::Sink { lang, reason } => write!(f, "could not write {lang} batch: {reason}"),
            Error::Custom(s) => write!(f, "{s}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
