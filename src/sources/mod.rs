/*! Record sources

A [Source] yields records one at a time, in a stable order. Each record exposes a named text field.

Two providers are available:
- [RowsApi] pages through a remote dataset using the Hugging Face datasets-server `/rows` endpoint,
- [JsonLines] reads a local (optionally gzipped) JSON-lines file.

[open] picks the right provider for a [DatasetConfig].
!*/
mod catalog;
mod jsonl;
mod record;
mod rows_api;

pub use catalog::{Catalog, DatasetConfig};
pub use jsonl::JsonLines;
pub use record::Record;
pub use rows_api::RowsApi;

use crate::error::Error;

/// Boxed, fallible record iterator.
pub type Records<'a> = Box<dyn Iterator<Item = Result<Record, Error>> + 'a>;

pub trait Source {
    /// Source identifier, used for batch file names and reports.
    fn name(&self) -> &str;

    /// Name of the field holding the text.
    fn text_field(&self) -> &str {
        "text"
    }

    /// Start iterating over records.
    ///
    /// Fails with [Error::SourceUnavailable] if the source cannot be opened.
    /// Errors yielded by the iterator are pulling failures (network, format),
    /// and iteration should stop at the first one.
    fn records(&mut self) -> Result<Records<'_>, Error>;
}

/// Open the provider matching `dataset`: a local file if [DatasetConfig::path] is set,
/// the remote rows API otherwise.
pub fn open(dataset: &DatasetConfig) -> Result<Box<dyn Source>, Error> {
    match &dataset.path {
        Some(_) => Ok(Box::new(JsonLines::new(dataset.clone()))),
        None => Ok(Box::new(RowsApi::new(dataset.clone())?)),
    }
}
