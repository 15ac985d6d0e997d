/*! Local JSON-lines provider

Reads one JSON value per line. Files ending in `.gz` are decompressed on the fly.
Blank lines are ignored. A line that is not valid JSON stops the iteration with an error.
!*/
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use flate2::read::MultiGzDecoder;
use log::info;

use super::{DatasetConfig, Record, Records, Source};
use crate::error::Error;

#[derive(Debug, Clone)]
pub struct JsonLines {
    dataset: DatasetConfig,
    id: String,
}

impl JsonLines {
    pub fn new(dataset: DatasetConfig) -> Self {
        Self {
            id: dataset.id(),
            dataset,
        }
    }

    fn open(&self, path: &Path) -> Result<Box<dyn BufRead>, Error> {
        let file = File::open(path).map_err(|e| Error::SourceUnavailable {
            source: self.id.clone(),
            reason: format!("could not open {path:?}: {e}"),
        })?;

        let reader: Box<dyn Read> = if path.extension().map_or(false, |ext| ext == "gz") {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };

        Ok(Box::new(BufReader::new(reader)))
    }
}

impl Source for JsonLines {
    fn name(&self) -> &str {
        &self.id
    }

    fn text_field(&self) -> &str {
        &self.dataset.text_column
    }

    fn records(&mut self) -> Result<Records<'_>, Error> {
        let path = self
            .dataset
            .path
            .clone()
            .ok_or_else(|| Error::SourceUnavailable {
                source: self.id.clone(),
                reason: "no local path".to_string(),
            })?;

        info!("[{}] reading {path:?}", self.id);
        let reader = self.open(&path)?;
        let id = self.id.clone();

        let records = reader
            .lines()
            .enumerate()
            .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
            .map(move |(idx, line)| {
                let line = line?;
                serde_json::from_str(&line)
                    .map(Record::new)
                    .map_err(|e| Error::SourceUnavailable {
                        source: id.clone(),
                        reason: format!("line {}: {e}", idx + 1),
                    })
            });

        Ok(Box::new(records))
    }
}
