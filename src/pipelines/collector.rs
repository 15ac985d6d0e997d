/*! Budgeted stream collection

A [Collector] pulls records from [Source]s for a single language, and keeps the accepted ones
until its token quota is reached.

Each record goes through:

1. the quota check (bounded languages only): once accumulated tokens reach the quota, no more records are pulled,
1. text extraction: records without a (non-empty) text are skipped,
1. cleaning (see [Normalizer]),
1. deduplication (see [Deduplicator]),
1. token estimation: texts under [CollectorConfig::min_tokens] are skipped,
1. acceptance: the text is added to the current batch, which is written to the [Sink] once full.

The collector owns the deduplication set and the token counter of its language,
so texts are deduplicated across all the sources of a language.
!*/
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    io::Sink,
    lang::Lang,
    processing::{dedup::Deduplicator, tokens::TokenEstimator},
    sources::Source,
    transformers::Normalizer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorConfig {
    /// Number of texts per written batch.
    pub batch_size: usize,
    /// Texts estimated under this number of tokens are skipped.
    pub min_tokens: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            min_tokens: 10,
        }
    }
}

/// State of the collection of a single source.
///
/// Every state but `Collecting` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectorState {
    Collecting,
    QuotaReached,
    SourceExhausted,
    /// The source could not be opened or pulled from.
    SourceError,
    /// A batch could not be written.
    Aborted,
}

impl CollectorState {
    pub fn is_error(&self) -> bool {
        matches!(self, CollectorState::SourceError | CollectorState::Aborted)
    }
}

/// Skipped record counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skipped {
    /// no text, or an empty one.
    pub empty: usize,
    /// rejected by cleaning.
    pub rejected: usize,
    pub duplicates: usize,
    pub too_few_tokens: usize,
}

/// Result of the collection of a single source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOutcome {
    pub name: String,
    pub state: CollectorState,
    pub tokens: u64,
    pub texts: usize,
    pub batches: usize,
    /// Number of pulled records.
    #[serde(default)]
    pub records: usize,
    #[serde(default)]
    pub skipped: Skipped,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SourceOutcome {
    pub fn new(name: &str, state: CollectorState) -> Self {
        Self {
            name: name.to_string(),
            state,
            tokens: 0,
            texts: 0,
            batches: 0,
            records: 0,
            skipped: Skipped::default(),
            error: None,
        }
    }
}

/// Texts waiting to be written.
#[derive(Debug, Default)]
struct Batch {
    idx: usize,
    texts: Vec<String>,
    tokens: u64,
}

/// Per-language collector.
pub struct Collector<S: Sink> {
    lang: Lang,
    /// `None` for unlimited collection.
    limit: Option<u64>,
    config: CollectorConfig,
    normalizer: Normalizer,
    dedup: Deduplicator,
    estimator: TokenEstimator,
    sink: S,
    tokens: u64,
    texts: usize,
    outcomes: Vec<SourceOutcome>,
}

impl<S: Sink> Collector<S> {
    /// Collector with default cleaning, deduplication and estimation.
    pub fn new(lang: Lang, limit: Option<u64>, sink: S) -> Self {
        Self {
            lang,
            limit,
            config: CollectorConfig::default(),
            normalizer: Normalizer::default(),
            dedup: Deduplicator::default(),
            estimator: TokenEstimator::default(),
            sink,
            tokens: 0,
            texts: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: CollectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_deduplicator(mut self, dedup: Deduplicator) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_estimator(mut self, estimator: TokenEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// `true` if the language is bounded and its quota is met.
    pub fn quota_reached(&self) -> bool {
        matches!(self.limit, Some(quota) if self.tokens >= quota)
    }

    /// Record a source that could not be opened.
    pub fn unavailable(&mut self, name: &str, error: &Error) -> SourceOutcome {
        error!("[{}] {name} unavailable: {error}", self.lang);
        let mut outcome = SourceOutcome::new(name, CollectorState::SourceError);
        outcome.error = Some(error.to_string());
        self.outcomes.push(outcome.clone());
        outcome
    }

    /// Collect from `source` until its quota is reached, the source is exhausted or fails.
    ///
    /// Source failures are reported in the returned [SourceOutcome].
    /// A sink failure is returned as an error: accepted texts of the failed batch are not accounted for,
    /// and the source is reported as [CollectorState::Aborted].
    pub fn collect(&mut self, source: &mut dyn Source) -> Result<SourceOutcome, Error> {
        let mut outcome = SourceOutcome::new(source.name(), CollectorState::Collecting);
        info!("[{}] collecting from {}", self.lang, outcome.name);

        let result = self.run(source, &mut outcome);
        if let Err(e) = &result {
            error!("[{}] {}: {e}", self.lang, outcome.name);
            outcome.state = CollectorState::Aborted;
            outcome.error = Some(e.to_string());
        }

        info!(
            "[{}] {}: {:?}, {} tokens, {} texts ({} records, {:?})",
            self.lang,
            outcome.name,
            outcome.state,
            outcome.tokens,
            outcome.texts,
            outcome.records,
            outcome.skipped
        );
        self.outcomes.push(outcome.clone());
        result.map(|_| outcome)
    }

    fn run(&mut self, source: &mut dyn Source, outcome: &mut SourceOutcome) -> Result<(), Error> {
        let field = source.text_field().to_string();
        let mut records = match source.records() {
            Ok(records) => records,
            Err(e) => {
                error!("[{}] could not open {}: {e}", self.lang, outcome.name);
                outcome.state = CollectorState::SourceError;
                outcome.error = Some(e.to_string());
                return Ok(());
            }
        };

        let mut batch = Batch::default();
        while outcome.state == CollectorState::Collecting {
            if self.quota_reached() {
                outcome.state = CollectorState::QuotaReached;
                break;
            }

            let record = match records.next() {
                None => {
                    outcome.state = CollectorState::SourceExhausted;
                    break;
                }
                Some(Err(e)) => {
                    error!("[{}] {} failed: {e}", self.lang, outcome.name);
                    outcome.state = CollectorState::SourceError;
                    outcome.error = Some(e.to_string());
                    break;
                }
                Some(Ok(record)) => record,
            };
            outcome.records += 1;

            let text = match record.try_text(&field) {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => {
                    outcome.skipped.empty += 1;
                    continue;
                }
                Err(e) => {
                    debug!("[{}] {e}", self.lang);
                    outcome.skipped.empty += 1;
                    continue;
                }
            };

            let text = match self.normalizer.clean(text, &self.lang) {
                Some(text) => text,
                None => {
                    outcome.skipped.rejected += 1;
                    continue;
                }
            };

            if self.dedup.is_duplicate(&text) {
                debug!("[{}] duplicate text", self.lang);
                outcome.skipped.duplicates += 1;
                continue;
            }

            let tokens = self.estimator.count(&text, &self.lang) as u64;
            if tokens < self.config.min_tokens {
                outcome.skipped.too_few_tokens += 1;
                continue;
            }

            batch.texts.push(text);
            batch.tokens += tokens;
            self.tokens += tokens;
            self.texts += 1;
            outcome.tokens += tokens;
            outcome.texts += 1;

            if batch.texts.len() >= self.config.batch_size {
                self.flush(&mut batch, outcome)?;
            }
        }

        // accepted texts are written even if the source failed
        self.flush(&mut batch, outcome)?;

        if outcome.state == CollectorState::SourceError {
            outcome.tokens = 0;
        }

        Ok(())
    }

    fn flush(&mut self, batch: &mut Batch, outcome: &mut SourceOutcome) -> Result<(), Error> {
        if batch.texts.is_empty() {
            return Ok(());
        }

        debug!(
            "[{}] flushing batch {} of {} ({} texts)",
            self.lang,
            batch.idx,
            outcome.name,
            batch.texts.len()
        );
        if let Err(e) = self
            .sink
            .write_batch(&self.lang, &outcome.name, batch.idx, &batch.texts)
        {
            self.tokens -= batch.tokens;
            self.texts -= batch.texts.len();
            outcome.tokens -= batch.tokens;
            outcome.texts -= batch.texts.len();
            return Err(e);
        }

        outcome.batches += 1;
        batch.idx += 1;
        batch.texts.clear();
        batch.tokens = 0;
        Ok(())
    }

    pub fn lang(&self) -> &Lang {
        &self.lang
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Accepted tokens, over all sources.
    pub fn tokens(&self) -> u64 {
        self.tokens
    }

    /// Accepted texts, over all sources.
    pub fn texts(&self) -> usize {
        self.texts
    }

    pub fn outcomes(&self) -> &[SourceOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<SourceOutcome> {
        self.outcomes
    }
}
