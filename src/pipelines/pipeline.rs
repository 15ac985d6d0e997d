//! Pipeline trait.
use crate::error::Error;

/// A complete run over a corpus directory.
///
/// Generic over its result, so that a run can hand back its report (see [super::CorpusCollection]).
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
