/*! Content processing

Contains structures and functions to account for and aggregate collected texts:
- [dedup]: content-hash deduplication,
- [tokens]: token estimation,
- [process]: sentence-level processed corpus built from raw batch files,
- [analyze]: per-language and per-source statistics of raw batch files.
!*/
pub mod analyze;
pub mod dedup;
pub mod process;
pub mod tokens;

pub use analyze::{analyze_all, analyze_language, LangAnalysis, SourceStats};
pub use dedup::Deduplicator;
pub use process::{process_all, process_language, ProcessingStats};
pub use tokens::{Counting, Multipliers, TokenEstimator};
