/*! # indic-corpus

Token-budgeted collection of a multilingual (English, Hindi, Sanskrit) text corpus from streamed dataset sources.

Texts are pulled from [sources], cleaned by [transformers::Normalizer] (which checks their script using [identifiers] and [filtering]),
deduplicated and counted by [processing], and written in batches by [io] until each language reaches its quota.
[pipelines::CorpusCollection] drives a full run.
!*/
pub mod error;
pub mod filtering;
pub mod identifiers;
pub mod io;
pub mod lang;
pub mod pipelines;
pub mod processing;
pub mod sources;
pub mod transformers;
