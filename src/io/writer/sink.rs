use crate::{error::Error, lang::Lang};

/// Durable storage for accepted texts.
pub trait Sink {
    /// Store an ordered batch of texts.
    ///
    /// Failures should be reported as [Error::Sink].
    fn write_batch(
        &mut self,
        lang: &Lang,
        source: &str,
        batch_idx: usize,
        texts: &[String],
    ) -> Result<(), Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_batch(
        &mut self,
        lang: &Lang,
        source: &str,
        batch_idx: usize,
        texts: &[String],
    ) -> Result<(), Error> {
        (**self).write_batch(lang, source, batch_idx, texts)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn write_batch(
        &mut self,
        lang: &Lang,
        source: &str,
        batch_idx: usize,
        texts: &[String],
    ) -> Result<(), Error> {
        (**self).write_batch(lang, source, batch_idx, texts)
    }
}
