/*!
# Batch writing

Accepted texts are handed over to a [Sink] one batch at a time.
[BatchWriter] is the file-based [Sink]: one file per batch, each text being followed by [crate::io::SEPARATOR].
!*/
mod batchwriter;
mod sink;

pub use batchwriter::BatchWriter;
pub use sink::Sink;
