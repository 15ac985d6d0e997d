//! Collection report.
use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    lang::Lang,
    pipelines::{
        collector::SourceOutcome,
        quota::{Policy, Rebalance},
    },
};

/// Per-language accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LangReport {
    /// Target after rebalancing.
    pub target_tokens: u64,
    pub original_target_tokens: u64,
    pub collected_tokens: u64,
    pub text_count: usize,
    /// `collected / target`, in percent. `0` when there is no target.
    pub completion_rate: f64,
    pub policy: Policy,
    /// `true` if collection was stopped by a sink failure.
    pub aborted: bool,
    pub sources: Vec<SourceOutcome>,
}

impl LangReport {
    pub fn new(target_tokens: u64, policy: Policy) -> Self {
        Self {
            target_tokens,
            original_target_tokens: target_tokens,
            collected_tokens: 0,
            text_count: 0,
            completion_rate: 0.0,
            policy,
            aborted: false,
            sources: Vec::new(),
        }
    }

    pub fn update_target(&mut self, target_tokens: u64) {
        self.target_tokens = target_tokens;
        self.completion_rate = percentage(self.collected_tokens, target_tokens);
    }
}

/// Report of a full corpus run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub target_tokens: u64,
    pub total_collected_tokens: u64,
    pub completion_percentage: f64,
    pub languages: BTreeMap<Lang, LangReport>,
    pub rebalance: Option<Rebalance>,
}

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

impl Report {
    pub fn new(target_tokens: u64) -> Self {
        Self {
            target_tokens,
            total_collected_tokens: 0,
            completion_percentage: 0.0,
            languages: BTreeMap::new(),
            rebalance: None,
        }
    }

    /// Add the accounting of a language, updating global totals.
    pub fn add(&mut self, lang: Lang, mut report: LangReport) {
        report.completion_rate = percentage(report.collected_tokens, report.target_tokens);
        self.languages.insert(lang, report);
        self.update_totals();
    }

    /// Record a rebalancing, updating the targets of affected languages.
    pub fn set_rebalance(&mut self, rebalance: Rebalance, unlimited: &BTreeMap<Lang, u64>) {
        for (lang, target) in rebalance.targets.iter().chain(unlimited.iter()) {
            if let Some(l) = self.languages.get_mut(lang) {
                l.update_target(*target);
            }
        }
        self.rebalance = Some(rebalance);
    }

    fn update_totals(&mut self) {
        self.total_collected_tokens = self.languages.values().map(|l| l.collected_tokens).sum();
        self.completion_percentage = percentage(self.total_collected_tokens, self.target_tokens);
    }

    /// Pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let f = File::create(path)?;
        serde_json::to_writer_pretty(f, self)?;
        info!("report saved to {path:?}");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let f = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(f))?)
    }
}
