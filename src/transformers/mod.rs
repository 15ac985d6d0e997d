/*! Text transformers.

Transforms candidate texts before they are accepted into the corpus.

!*/
pub mod normalize;

pub use normalize::Normalizer;
