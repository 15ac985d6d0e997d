/*! Raw corpus analysis

Reads back the raw batch files of each language and reports what is on disk:
file, text and estimated token counts, and size, overall and per source.

Sources are recovered from batch file names (`<source>_<batch>.txt`, see [crate::io::Layout::batch_file]).
When a collection report sits next to the corpus, each language is compared to its target.
!*/
use std::{collections::BTreeMap, path::Path};

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    io::{reader, Layout, Report},
    lang::Lang,
    processing::tokens::TokenEstimator,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStats {
    pub files: usize,
    pub texts: usize,
    pub tokens: u64,
    pub bytes: u64,
}

impl SourceStats {
    fn add(&mut self, other: &SourceStats) {
        self.files += other.files;
        self.texts += other.texts;
        self.tokens += other.tokens;
        self.bytes += other.bytes;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangAnalysis {
    pub language: Lang,
    #[serde(flatten)]
    pub totals: SourceStats,
    /// `0` when there is no text.
    pub avg_tokens_per_text: f64,
    /// Target of the last collection, if a report is available.
    pub target_tokens: Option<u64>,
    /// `tokens / target_tokens`.
    pub completion_rate: Option<f64>,
    pub sources: BTreeMap<String, SourceStats>,
}

impl LangAnalysis {
    fn new(language: Lang) -> Self {
        Self {
            language,
            totals: SourceStats::default(),
            avg_tokens_per_text: 0.0,
            target_tokens: None,
            completion_rate: None,
            sources: BTreeMap::new(),
        }
    }

    fn set_target(&mut self, target_tokens: u64) {
        self.target_tokens = Some(target_tokens);
        self.completion_rate = if target_tokens > 0 {
            Some(self.totals.tokens as f64 / target_tokens as f64)
        } else {
            None
        };
    }
}

/// Source part of a batch file name: its stem without the trailing `_<batch>`.
pub fn source_of(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    match stem.rsplit_once('_') {
        Some((source, idx)) if !idx.is_empty() && idx.chars().all(|c| c.is_ascii_digit()) => {
            source.to_string()
        }
        _ => stem.clone(),
    }
}

/// Analyze the raw batch files of `lang` in `dst`.
///
/// A language without raw files yields zero counts.
pub fn analyze_language(
    dst: &Path,
    lang: &Lang,
    estimator: &TokenEstimator,
) -> Result<LangAnalysis, Error> {
    let layout = Layout::new(dst);
    let mut analysis = LangAnalysis::new(lang.clone());

    for file in reader::batch_files(&layout.raw(lang))? {
        let content = std::fs::read_to_string(&file)?;
        let texts = reader::split_batch(&content);
        let stats = SourceStats {
            files: 1,
            texts: texts.len(),
            tokens: texts
                .iter()
                .map(|t| estimator.count(t, lang) as u64)
                .sum(),
            bytes: std::fs::metadata(&file)?.len(),
        };

        analysis.totals.add(&stats);
        analysis
            .sources
            .entry(source_of(&file))
            .or_default()
            .add(&stats);
    }

    if analysis.totals.texts > 0 {
        analysis.avg_tokens_per_text =
            analysis.totals.tokens as f64 / analysis.totals.texts as f64;
    }
    info!(
        "[{lang}] {} files, {} texts, ~{} tokens",
        analysis.totals.files, analysis.totals.texts, analysis.totals.tokens
    );
    Ok(analysis)
}

/// Analyze every language of `langs` concurrently.
///
/// Targets are taken from the collection report of `dst`, if there is one.
pub fn analyze_all(
    dst: &Path,
    langs: &[Lang],
    estimator: &TokenEstimator,
) -> Result<Vec<LangAnalysis>, Error> {
    let report_file = Layout::new(dst).report_file();
    let report = if report_file.is_file() {
        Some(Report::load(&report_file)?)
    } else {
        warn!("no collection report in {dst:?}, completion is not computed");
        None
    };

    let mut analyses = langs
        .par_iter()
        .map(|lang| analyze_language(dst, lang, estimator))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(report) = report {
        for analysis in analyses.iter_mut() {
            if let Some(lang_report) = report.languages.get(&analysis.language) {
                analysis.set_target(lang_report.target_tokens);
            }
        }
    }
    Ok(analyses)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn source_names() {
        let p = PathBuf::from("raw/HuggingFaceFW_fineweb_000012.txt");
        assert_eq!(source_of(&p), "HuggingFaceFW_fineweb");
        assert_eq!(source_of(Path::new("raw/notes.txt")), "notes");
        assert_eq!(source_of(Path::new("raw/a_b_.txt")), "a_b_");
        assert_eq!(source_of(Path::new("raw/a_b_v2.txt")), "a_b_v2");
    }

    #[test]
    fn zero_target() {
        let mut analysis = LangAnalysis::new(Lang::Sanskrit);
        analysis.totals.tokens = 10;
        analysis.set_target(0);
        assert_eq!(analysis.target_tokens, Some(0));
        assert_eq!(analysis.completion_rate, None);

        analysis.set_target(40);
        assert_eq!(analysis.completion_rate, Some(0.25));
    }
}
