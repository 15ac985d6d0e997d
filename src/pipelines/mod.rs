//! Pipelines.
//!
//! [CorpusCollection] is the full corpus run: every language, in a fixed order,
//! each one collected from its configured sources by a [Collector] until its [quota] is met.
//! The module also provides a light [pipeline::Pipeline] trait.
pub mod collector;
pub mod corpus;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod quota;

pub use collector::{Collector, CollectorConfig, CollectorState, SourceOutcome};
pub use corpus::{CorpusCollection, CorpusConfig};
pub use pipeline::Pipeline;
pub use quota::{Policy, QuotaConfig, Quotas};
