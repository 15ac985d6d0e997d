/*! Token quotas

Each language gets a share of a total token budget.
A language is either [Policy::Bounded] (collection stops once its quota is reached)
or [Policy::Unlimited] (everything available is collected, the quota is only nominal).

Once every unlimited language has been collected, [Quotas::rebalance] redistributes
`total − unlimited tokens` between the bounded languages, proportionally to their shares.
!*/
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lang::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    Bounded,
    Unlimited,
}

/// Quota configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuotaConfig {
    pub total_tokens: u64,
    /// Share of [QuotaConfig::total_tokens] per language (`0.5` is 50%).
    pub shares: BTreeMap<Lang, f64>,
    /// Languages collected regardless of their quota.
    pub unlimited: Vec<Lang>,
}

impl Default for QuotaConfig {
    /// 3B tokens: 50% English, 35% Hindi, 15% Sanskrit. Sanskrit is unlimited.
    fn default() -> Self {
        let shares = [
            (Lang::English, 0.50),
            (Lang::Hindi, 0.35),
            (Lang::Sanskrit, 0.15),
        ]
        .into_iter()
        .collect();

        Self {
            total_tokens: 3_000_000_000,
            shares,
            unlimited: vec![Lang::Sanskrit],
        }
    }
}

impl QuotaConfig {
    pub fn share(&self, lang: &Lang) -> f64 {
        self.shares.get(lang).copied().unwrap_or(0.0)
    }

    pub fn policy(&self, lang: &Lang) -> Policy {
        if self.unlimited.contains(lang) {
            Policy::Unlimited
        } else {
            Policy::Bounded
        }
    }
}

/// `fraction` of `total`, rounded to the nearest token rather than truncated,
/// so that `0.35 × 3 000 000 000` is 1 050 000 000 and not 1 049 999 999.
fn portion(total: u64, fraction: f64) -> u64 {
    (total as f64 * fraction).round() as u64
}

/// Outcome of a rebalancing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebalance {
    /// Tokens collected by unlimited languages.
    pub unlimited_tokens: u64,
    /// Nominal unlimited quotas minus collected tokens. Negative on surplus.
    pub shortfall: i64,
    /// New targets of bounded languages.
    #[serde(flatten)]
    pub targets: BTreeMap<Lang, u64>,
}

/// Current per-language targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Quotas {
    config: QuotaConfig,
    original: BTreeMap<Lang, u64>,
    targets: BTreeMap<Lang, u64>,
}

impl Quotas {
    pub fn new(config: QuotaConfig) -> Self {
        let original: BTreeMap<Lang, u64> = config
            .shares
            .iter()
            .map(|(lang, share)| (lang.clone(), portion(config.total_tokens, *share)))
            .collect();

        Self {
            targets: original.clone(),
            original,
            config,
        }
    }

    pub fn config(&self) -> &QuotaConfig {
        &self.config
    }

    pub fn total(&self) -> u64 {
        self.config.total_tokens
    }

    pub fn policy(&self, lang: &Lang) -> Policy {
        self.config.policy(lang)
    }

    /// Current target of `lang`.
    pub fn target(&self, lang: &Lang) -> u64 {
        self.targets.get(lang).copied().unwrap_or(0)
    }

    /// Target before any rebalancing.
    pub fn original(&self, lang: &Lang) -> u64 {
        self.original.get(lang).copied().unwrap_or(0)
    }

    /// Collection limit of `lang`: its target when bounded, `None` when unlimited.
    pub fn limit(&self, lang: &Lang) -> Option<u64> {
        match self.policy(lang) {
            Policy::Bounded => Some(self.target(lang)),
            Policy::Unlimited => None,
        }
    }

    /// Redistribute the budget left by unlimited languages.
    ///
    /// `collected` holds the tokens collected by each unlimited language.
    /// Bounded languages share `total − Σ collected` proportionally to their configured shares,
    /// and unlimited languages get their collected count as target.
    ///
    /// New targets are rounded to the nearest token (see [portion]): a truncating split would give
    /// 1 763 529 411 instead of 1 763 529 412 for English on a 2 000 000 token Sanskrit collection.
    pub fn rebalance(&mut self, collected: &BTreeMap<Lang, u64>) -> Rebalance {
        let unlimited_tokens: u64 = collected.values().sum();
        let nominal: u64 = collected.keys().map(|l| self.original(l)).sum();
        let remaining = self.total().saturating_sub(unlimited_tokens);

        let bounded: Vec<(Lang, f64)> = self
            .config
            .shares
            .iter()
            .filter(|(l, _)| self.config.policy(l) == Policy::Bounded)
            .map(|(l, s)| (l.clone(), *s))
            .collect();
        let bounded_share: f64 = bounded.iter().map(|(_, s)| s).sum();

        let mut targets = BTreeMap::new();
        for (lang, share) in bounded {
            let target = if bounded_share > 0.0 {
                portion(remaining, share / bounded_share)
            } else {
                0
            };
            self.targets.insert(lang.clone(), target);
            targets.insert(lang, target);
        }
        for (lang, tokens) in collected {
            self.targets.insert(lang.clone(), *tokens);
        }

        Rebalance {
            unlimited_tokens,
            shortfall: nominal as i64 - unlimited_tokens as i64,
            targets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quotas() {
        let q = Quotas::new(QuotaConfig::default());
        assert_eq!(q.target(&Lang::English), 1_500_000_000);
        assert_eq!(q.target(&Lang::Hindi), 1_050_000_000);
        assert_eq!(q.target(&Lang::Sanskrit), 450_000_000);
        assert_eq!(q.limit(&Lang::English), Some(1_500_000_000));
        assert_eq!(q.limit(&Lang::Sanskrit), None);
        assert_eq!(q.target(&Lang::Other("tamil".to_string())), 0);
    }

    #[test]
    fn sanskrit_shortfall() {
        let mut q = Quotas::new(QuotaConfig::default());
        let collected = [(Lang::Sanskrit, 2_000_000)].into_iter().collect();
        let r = q.rebalance(&collected);

        assert_eq!(r.unlimited_tokens, 2_000_000);
        assert_eq!(r.shortfall, 448_000_000);
        // 2 998 000 000 split 50:35
        assert_eq!(r.targets[&Lang::English], 1_763_529_412);
        assert_eq!(r.targets[&Lang::Hindi], 1_234_470_588);

        assert_eq!(q.target(&Lang::English), 1_763_529_412);
        assert_eq!(q.target(&Lang::Sanskrit), 2_000_000);
        assert_eq!(q.original(&Lang::Sanskrit), 450_000_000);
    }

    #[test]
    fn portions_are_rounded() {
        assert_eq!(portion(3_000_000_000, 0.35), 1_050_000_000);
        assert_eq!(portion(2_998_000_000, 0.5 / 0.85), 1_763_529_412);
        assert_eq!(portion(10, 0.04), 0);
        assert_eq!(portion(10, 0.05), 1);
    }

    #[test]
    fn surplus() {
        let mut q = Quotas::new(QuotaConfig::default());
        let collected = [(Lang::Sanskrit, 600_000_000)].into_iter().collect();
        let r = q.rebalance(&collected);
        assert_eq!(r.shortfall, -150_000_000);
        assert!(r.targets[&Lang::English] < 1_500_000_000);
    }

    #[test]
    fn unlimited_over_total() {
        let mut q = Quotas::new(QuotaConfig::default());
        let collected = [(Lang::Sanskrit, 4_000_000_000)].into_iter().collect();
        let r = q.rebalance(&collected);
        assert_eq!(r.targets[&Lang::English], 0);
        assert_eq!(r.targets[&Lang::Hindi], 0);
    }

    #[test]
    fn rebalance_report() {
        let mut q = Quotas::new(QuotaConfig::default());
        let collected = [(Lang::Sanskrit, 2_000_000)].into_iter().collect();
        let r = q.rebalance(&collected);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["english"], 1_763_529_412u64);
        assert_eq!(json["shortfall"], 448_000_000i64);
    }

    #[test]
    fn config_from_json() {
        let c: QuotaConfig = serde_json::from_str(
            r#"{"total_tokens": 1000, "shares": {"en": 0.6, "hi": 0.4}, "unlimited": []}"#,
        )
        .unwrap();
        let q = Quotas::new(c);
        assert_eq!(q.target(&Lang::English), 600);
        assert_eq!(q.limit(&Lang::Hindi), Some(400));
    }
}
