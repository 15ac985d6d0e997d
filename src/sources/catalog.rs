/*! Dataset catalog

Typed dataset descriptions, and the default per-language dataset lists.
!*/
use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::lang::Lang;

fn default_split() -> String {
    "train".to_string()
}

fn default_text_column() -> String {
    "text".to_string()
}

fn default_streaming() -> bool {
    true
}

/// Description of a dataset to collect texts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Dataset identifier on the hub (`owner/name`).
    pub name: String,

    /// Sub-collection (subset).
    #[serde(default)]
    pub config: Option<String>,

    #[serde(default = "default_split")]
    pub split: String,

    /// Field holding the text.
    #[serde(default = "default_text_column")]
    pub text_column: String,

    /// Fetch remote rows page by page while iterating.
    /// When `false`, the whole split is fetched when the source is opened.
    #[serde(default = "default_streaming")]
    pub streaming: bool,

    #[serde(default)]
    pub description: String,

    /// Local JSON-lines file to read instead of the remote dataset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DatasetConfig {
    pub fn new(name: &str, config: Option<&str>, split: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            config: config.map(String::from),
            split: split.to_string(),
            text_column: default_text_column(),
            streaming: default_streaming(),
            description: description.to_string(),
            path: None,
        }
    }

    /// Local JSON-lines dataset.
    pub fn local(name: &str, path: PathBuf) -> Self {
        Self {
            path: Some(path),
            ..Self::new(name, None, &default_split(), "")
        }
    }

    /// Unique identifier: name, config and non-default split joined by `-`.
    ///
    /// `ai4bharat/sangraha` verified `hin` becomes `ai4bharat/sangraha-verified-hin`.
    pub fn id(&self) -> String {
        let mut id = self.name.clone();
        if let Some(config) = &self.config {
            id.push('-');
            id.push_str(config);
        }
        if self.split != "train" {
            id.push('-');
            id.push_str(&self.split);
        }
        id
    }
}

/// Ordered dataset lists per language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(BTreeMap<Lang, Vec<DatasetConfig>>);

impl Catalog {
    pub fn new(datasets: BTreeMap<Lang, Vec<DatasetConfig>>) -> Self {
        Self(datasets)
    }

    /// Datasets for `lang`, in collection order. Empty if none is configured.
    pub fn datasets(&self, lang: &Lang) -> &[DatasetConfig] {
        self.0.get(lang).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn insert(&mut self, lang: Lang, datasets: Vec<DatasetConfig>) {
        self.0.insert(lang, datasets);
    }

    pub fn langs(&self) -> impl Iterator<Item = &Lang> {
        self.0.keys()
    }
}

impl Default for Catalog {
    /// FineWeb for English, Wikipedia and Sangraha for Hindi and Sanskrit.
    fn default() -> Self {
        let mut datasets = BTreeMap::new();
        datasets.insert(
            Lang::English,
            vec![DatasetConfig::new(
                "HuggingFaceFW/fineweb",
                Some("sample-10BT"),
                "train",
                "High-quality web text corpus (FineWeb English)",
            )],
        );
        datasets.insert(
            Lang::Hindi,
            vec![
                DatasetConfig::new(
                    "wikimedia/wikipedia",
                    Some("20231101.hi"),
                    "train",
                    "Hindi Wikipedia dump",
                ),
                DatasetConfig::new(
                    "ai4bharat/sangraha",
                    Some("verified"),
                    "hin",
                    "Sangraha verified dataset (Hindi)",
                ),
                DatasetConfig::new(
                    "ai4bharat/sangraha",
                    Some("synthetic"),
                    "hin_Deva",
                    "Sangraha synthetic dataset (Hindi, Devanagari)",
                ),
            ],
        );
        datasets.insert(
            Lang::Sanskrit,
            vec![
                DatasetConfig::new(
                    "wikimedia/wikipedia",
                    Some("20231101.sa"),
                    "train",
                    "Sanskrit Wikipedia dump",
                ),
                DatasetConfig::new(
                    "ai4bharat/sangraha",
                    Some("verified"),
                    "san",
                    "Sangraha verified dataset (Sanskrit)",
                ),
                DatasetConfig::new(
                    "ai4bharat/sangraha",
                    Some("synthetic"),
                    "san_Deva",
                    "Sangraha synthetic dataset (Sanskrit, Devanagari)",
                ),
            ],
        );
        Self(datasets)
    }
}
