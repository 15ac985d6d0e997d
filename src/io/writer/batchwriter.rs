//! File-based batch writer.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::info;

use super::Sink;
use crate::{
    error::Error,
    io::{Layout, SEPARATOR},
    lang::Lang,
};

/// Writes each batch into `dst/<lang>/raw/<source>_<batch:06>.txt`.
///
/// Language directories are created on first write.
/// An existing batch file is overwritten.
#[derive(Debug, Clone)]
pub struct BatchWriter {
    layout: Layout,
    files_written: usize,
}

impl BatchWriter {
    pub fn new(dst: &Path) -> Self {
        Self {
            layout: Layout::new(dst),
            files_written: 0,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn files_written(&self) -> usize {
        self.files_written
    }

    fn write(
        &self,
        lang: &Lang,
        source: &str,
        batch_idx: usize,
        texts: &[String],
    ) -> Result<(), Error> {
        if !self.layout.raw(lang).is_dir() {
            self.layout.create(lang)?;
        }

        let path = self.layout.batch_file(lang, source, batch_idx);
        let mut w = BufWriter::new(File::create(&path)?);
        for text in texts {
            w.write_all(text.as_bytes())?;
            w.write_all(SEPARATOR.as_bytes())?;
        }
        w.flush()?;

        info!("[{lang}] saved {} texts to {path:?}", texts.len());
        Ok(())
    }
}

impl Sink for BatchWriter {
    fn write_batch(
        &mut self,
        lang: &Lang,
        source: &str,
        batch_idx: usize,
        texts: &[String],
    ) -> Result<(), Error> {
        self.write(lang, source, batch_idx, texts)
            .map_err(|e| Error::Sink {
                lang: lang.to_string(),
                reason: e.to_string(),
            })?;
        self.files_written += 1;
        Ok(())
    }
}
