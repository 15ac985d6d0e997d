//! Multilingual corpus collection pipeline
//!
//! Languages are collected one at a time, in a fixed order (English, Hindi, Sanskrit, then others),
//! and sources one at a time within a language.
//!
//! # Processing
//! 1. Each language gets a [Collector] with its own deduplication set and token counter.
//! 1. Sources of bounded languages are skipped once the quota is met.
//! 1. A source that cannot be opened or fails mid-stream contributes nothing, and the next one is tried.
//! 1. A sink failure aborts the remaining sources of the language, other languages are still collected.
//! 1. Once the last unlimited language is collected, quotas of bounded languages are rebalanced (once).
//! 1. The report is written to `dst/download_report.json`.
//! 1. Optionally, processed corpora are built from the raw batch files (see [crate::processing::process]).
use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use super::{
    collector::{Collector, CollectorConfig},
    pipeline::Pipeline,
    quota::{Policy, QuotaConfig, Quotas},
};
use crate::{
    error::Error,
    identifiers::ClassifierConfig,
    io::{report::LangReport, BatchWriter, Layout, Report, Sink},
    lang::{Lang, ORDER},
    processing::{
        dedup::{Deduplicator, Sampling},
        process,
        tokens::{Counting, Multipliers, TokenEstimator},
    },
    sources::{self, Catalog, DatasetConfig, Source},
    transformers::Normalizer,
};

fn default_langs() -> Vec<Lang> {
    ORDER.to_vec()
}

/// Full run configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorpusConfig {
    #[serde(default = "default_langs")]
    pub langs: Vec<Lang>,
    pub quotas: QuotaConfig,
    pub collector: CollectorConfig,
    pub classifier: ClassifierConfig,
    pub multipliers: Multipliers,
    pub counting: Counting,
    pub dedup: Sampling,
    pub datasets: Catalog,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            langs: default_langs(),
            quotas: QuotaConfig::default(),
            collector: CollectorConfig::default(),
            classifier: ClassifierConfig::default(),
            multipliers: Multipliers::default(),
            counting: Counting::default(),
            dedup: Sampling::default(),
            datasets: Catalog::default(),
        }
    }
}

impl CorpusConfig {
    /// Load a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let f = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }

    /// Languages in processing order, without duplicates.
    pub fn ordered_langs(&self) -> Vec<Lang> {
        let mut langs = self.langs.clone();
        langs.sort();
        langs.dedup();
        langs
    }

    pub fn estimator(&self) -> TokenEstimator {
        TokenEstimator::new(self.multipliers, self.counting)
    }
}

pub struct CorpusCollection {
    dst: PathBuf,
    config: CorpusConfig,
    process: bool,
}

impl CorpusCollection {
    pub fn new(dst: PathBuf, config: CorpusConfig) -> Self {
        Self {
            dst,
            config,
            process: false,
        }
    }

    /// Build processed corpora after collection.
    pub fn with_processing(mut self, process: bool) -> Self {
        self.process = process;
        self
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Collect every language, opening sources with `open` and writing batches into `sink`.
    ///
    /// Only fails if the quota configuration is unusable: source and sink failures are reported.
    pub fn collect<F, S>(&self, mut open: F, sink: &mut S) -> Result<Report, Error>
    where
        F: FnMut(&DatasetConfig) -> Result<Box<dyn Source>, Error>,
        S: Sink + ?Sized,
    {
        let langs = self.config.ordered_langs();
        let mut quotas = Quotas::new(self.config.quotas.clone());
        if quotas.total() == 0 {
            return Err(Error::Custom("total token target is 0".to_string()));
        }

        let estimator = self.config.estimator();
        let mut report = Report::new(quotas.total());
        let mut unlimited = BTreeMap::new();
        let last_unlimited = langs
            .iter()
            .rposition(|l| quotas.policy(l) == Policy::Unlimited);

        info!("total target: {} tokens", quotas.total());
        for (idx, lang) in langs.iter().enumerate() {
            let limit = quotas.limit(lang);
            match limit {
                Some(target) => info!("[{lang}] target: {target} tokens"),
                None => info!(
                    "[{lang}] collecting everything available (nominal target: {} tokens)",
                    quotas.original(lang)
                ),
            }

            let mut collector = Collector::new(lang.clone(), limit, &mut *sink)
                .with_config(self.config.collector)
                .with_normalizer(Normalizer::with_classifier(self.config.classifier.build()))
                .with_deduplicator(Deduplicator::new(self.config.dedup))
                .with_estimator(estimator.clone());

            let datasets = self.config.datasets.datasets(lang);
            if datasets.is_empty() {
                warn!("[{lang}] no dataset configured");
            }

            let mut aborted = false;
            for dataset in datasets {
                if collector.quota_reached() {
                    info!("[{lang}] target reached, skipping remaining datasets");
                    break;
                }

                let mut source = match open(dataset) {
                    Ok(source) => source,
                    Err(e) => {
                        collector.unavailable(&dataset.id(), &e);
                        continue;
                    }
                };

                if let Err(e) = collector.collect(source.as_mut()) {
                    error!("[{lang}] aborting collection: {e}");
                    aborted = true;
                    break;
                }
            }

            let collected = collector.tokens();
            info!(
                "[{lang}] collected {collected} tokens in {} texts",
                collector.texts()
            );
            report.add(
                lang.clone(),
                LangReport {
                    original_target_tokens: quotas.original(lang),
                    collected_tokens: collected,
                    text_count: collector.texts(),
                    aborted,
                    sources: collector.into_outcomes(),
                    ..LangReport::new(quotas.target(lang), quotas.policy(lang))
                },
            );

            if quotas.policy(lang) == Policy::Unlimited {
                unlimited.insert(lang.clone(), collected);
            }
            if Some(idx) == last_unlimited {
                let rebalance = quotas.rebalance(&unlimited);
                if rebalance.shortfall > 0 {
                    warn!(
                        "unlimited languages are {} tokens short of their nominal quota",
                        rebalance.shortfall
                    );
                } else {
                    info!(
                        "unlimited languages exceed their nominal quota by {} tokens",
                        -rebalance.shortfall
                    );
                }
                for (l, target) in &rebalance.targets {
                    info!("[{l}] adjusted target: {target} tokens");
                }
                report.set_rebalance(rebalance, &unlimited);
            }
        }

        info!(
            "collected {} tokens ({:.2}% of target)",
            report.total_collected_tokens, report.completion_percentage
        );
        Ok(report)
    }
}

impl Pipeline<Report> for CorpusCollection {
    fn run(&self) -> Result<Report, Error> {
        let layout = Layout::new(&self.dst);
        let langs = self.config.ordered_langs();
        for lang in &langs {
            layout.create(lang)?;
        }

        let mut sink = BatchWriter::new(&self.dst);
        let report = self.collect(sources::open, &mut sink)?;
        report.save(&layout.report_file())?;

        if self.process {
            process::process_all(&self.dst, &langs, &self.config.estimator())?;
        }

        Ok(report)
    }
}
