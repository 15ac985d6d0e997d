use std::path::{Path, PathBuf};

use log::debug;

use crate::{error::Error, lang::Lang};

/// Paths of a corpus directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn lang(&self, lang: &Lang) -> PathBuf {
        self.root.join(lang.name())
    }

    pub fn raw(&self, lang: &Lang) -> PathBuf {
        self.lang(lang).join("raw")
    }

    pub fn processed(&self, lang: &Lang) -> PathBuf {
        self.lang(lang).join("processed")
    }

    pub fn metadata(&self, lang: &Lang) -> PathBuf {
        self.lang(lang).join("metadata")
    }

    /// `raw/<source>_<batch>.txt`, with `/` in source names replaced by `_`
    /// and the batch index zero-padded to 6 digits.
    pub fn batch_file(&self, lang: &Lang, source: &str, batch_idx: usize) -> PathBuf {
        let source = source.replace(['/', '\\'], "_");
        self.raw(lang).join(format!("{source}_{batch_idx:06}.txt"))
    }

    pub fn corpus_file(&self, lang: &Lang) -> PathBuf {
        self.processed(lang).join(format!("{}_corpus.txt", lang.name()))
    }

    pub fn stats_file(&self, lang: &Lang) -> PathBuf {
        self.metadata(lang).join("processing_stats.json")
    }

    pub fn report_file(&self) -> PathBuf {
        self.root.join("download_report.json")
    }

    /// Create `raw`, `processed` and `metadata` directories for `lang`.
    pub fn create(&self, lang: &Lang) -> Result<(), Error> {
        for dir in [self.raw(lang), self.processed(lang), self.metadata(lang)] {
            debug!("creating {dir:?}");
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}
