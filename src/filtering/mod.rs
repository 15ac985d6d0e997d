/*! Filtering utilities

Filters operate on text or on derived script labels.

Filters implement [filter::Filter], [filter::FilterMut] or both:
- [filter::Filter] is implemented for filters that do not have state (see [sentence::Length] for example)
- [filter::FilterMut] is implemented for filters that do have state (see [crate::processing::dedup::Deduplicator]).
! */
mod filter;
pub mod script;
pub mod sentence;

pub use filter::Filter;
pub use filter::FilterMut;
pub use script::ScriptPolicy;
pub use sentence::{Length, WordCount};
