mod common;

use std::collections::{BTreeMap, HashMap};

use common::{devanagari_texts, english_texts, Memory, VecSink};
use indic_corpus::{
    error::Error,
    io::{Layout, Report},
    lang::Lang,
    pipelines::{CollectorState, CorpusCollection, CorpusConfig, Pipeline, Policy, QuotaConfig},
    sources::{Catalog, DatasetConfig, Source},
};
use serde_json::json;

/// Named in-memory datasets. Unknown names are unavailable.
struct Datasets(HashMap<String, Vec<String>>);

impl Datasets {
    fn new(datasets: &[(&str, Vec<String>)]) -> Self {
        Self(
            datasets
                .iter()
                .map(|(name, texts)| (name.to_string(), texts.clone()))
                .collect(),
        )
    }

    fn open(&self, dataset: &DatasetConfig) -> Result<Box<dyn Source>, Error> {
        match self.0.get(&dataset.name) {
            Some(texts) => Ok(Box::new(Memory::new(&dataset.id(), texts))),
            None => Err(Error::SourceUnavailable {
                source: dataset.id(),
                reason: "dataset not found".to_string(),
            }),
        }
    }
}

fn catalog(datasets: &[(Lang, Vec<&str>)]) -> Catalog {
    let datasets: BTreeMap<Lang, Vec<DatasetConfig>> = datasets
        .iter()
        .map(|(lang, names)| {
            let configs = names
                .iter()
                .map(|name| DatasetConfig::new(name, None, "train", ""))
                .collect();
            (lang.clone(), configs)
        })
        .collect();
    Catalog::new(datasets)
}

fn config() -> CorpusConfig {
    CorpusConfig {
        datasets: catalog(&[
            (Lang::English, vec!["en/web"]),
            (Lang::Hindi, vec!["hi/first", "hi/second"]),
            (Lang::Sanskrit, vec!["sa/wiki"]),
        ]),
        ..Default::default()
    }
}

#[test_log::test]
fn sanskrit_shortfall_rebalances_bounded_languages() {
    let mut config = config();
    // 10 words at 20 000 tokens each
    config.multipliers.sanskrit = 20_000.0;
    let data = Datasets::new(&[
        ("en/web", english_texts(3)),
        ("hi/first", devanagari_texts(3)),
        ("hi/second", vec![]),
        ("sa/wiki", devanagari_texts(10)),
    ]);

    let mut sink = VecSink::default();
    let report = CorpusCollection::new("unused".into(), config)
        .collect(|d| data.open(d), &mut sink)
        .unwrap();

    let sa = &report.languages[&Lang::Sanskrit];
    assert_eq!(sa.policy, Policy::Unlimited);
    assert_eq!(sa.collected_tokens, 2_000_000);
    assert_eq!(sa.original_target_tokens, 450_000_000);
    assert_eq!(sa.target_tokens, 2_000_000);

    let rebalance = report.rebalance.as_ref().unwrap();
    assert_eq!(rebalance.unlimited_tokens, 2_000_000);
    assert_eq!(rebalance.shortfall, 448_000_000);

    let en = &report.languages[&Lang::English];
    assert_eq!(en.original_target_tokens, 1_500_000_000);
    assert_eq!(en.target_tokens, 1_763_529_412);
    assert_eq!(en.collected_tokens, 3 * 29);
    assert_eq!(report.languages[&Lang::Hindi].target_tokens, 1_234_470_588);

    assert_eq!(
        report.total_collected_tokens,
        2_000_000 + 3 * 29 + 3 * 18
    );
}

#[test_log::test]
fn languages_are_collected_in_order() {
    let mut config = config();
    config.langs = vec![Lang::Sanskrit, Lang::English, Lang::Hindi, Lang::English];
    let data = Datasets::new(&[
        ("en/web", english_texts(1)),
        ("hi/first", devanagari_texts(1)),
        ("sa/wiki", devanagari_texts(1)),
    ]);

    let mut opened = Vec::new();
    let mut sink = VecSink::default();
    CorpusCollection::new("unused".into(), config)
        .collect(
            |d| {
                opened.push(d.id());
                data.open(d)
            },
            &mut sink,
        )
        .unwrap();

    assert_eq!(opened, vec!["en/web", "hi/first", "hi/second", "sa/wiki"]);
    let langs: Vec<Lang> = sink.batches.iter().map(|(l, _, _, _)| l.clone()).collect();
    assert_eq!(langs, vec![Lang::English, Lang::Hindi, Lang::Sanskrit]);
}

#[test_log::test]
fn unavailable_source_falls_through() {
    let data = Datasets::new(&[
        ("en/web", english_texts(1)),
        ("hi/second", devanagari_texts(3)),
        ("sa/wiki", devanagari_texts(1)),
    ]);

    let mut sink = VecSink::default();
    let report = CorpusCollection::new("unused".into(), config())
        .collect(|d| data.open(d), &mut sink)
        .unwrap();

    let hi = &report.languages[&Lang::Hindi];
    assert_eq!(hi.sources.len(), 2);
    assert_eq!(hi.sources[0].name, "hi/first");
    assert_eq!(hi.sources[0].state, CollectorState::SourceError);
    assert!(hi.sources[0].error.is_some());
    assert_eq!(hi.sources[1].state, CollectorState::SourceExhausted);
    assert_eq!(hi.collected_tokens, 3 * 18);
    assert!(!hi.aborted);
}

#[test_log::test]
fn quota_skips_remaining_datasets() {
    let config = CorpusConfig {
        langs: vec![Lang::English],
        quotas: QuotaConfig {
            total_tokens: 200,
            shares: [(Lang::English, 0.5)].into_iter().collect(),
            unlimited: vec![],
        },
        datasets: catalog(&[(Lang::English, vec!["en/first", "en/second"])]),
        ..Default::default()
    };
    let data = Datasets::new(&[
        ("en/first", english_texts(10)),
        ("en/second", english_texts(10)),
    ]);

    let mut opened = Vec::new();
    let mut sink = VecSink::default();
    let report = CorpusCollection::new("unused".into(), config)
        .collect(
            |d| {
                opened.push(d.id());
                data.open(d)
            },
            &mut sink,
        )
        .unwrap();

    assert_eq!(opened, vec!["en/first"]);
    let en = &report.languages[&Lang::English];
    assert_eq!(en.collected_tokens, 4 * 29);
    assert_eq!(en.text_count, 4);
    assert_eq!(en.sources[0].state, CollectorState::QuotaReached);
    // no unlimited language
    assert!(report.rebalance.is_none());
    assert_eq!(report.completion_percentage, 58.0);
}

#[test_log::test]
fn sink_failure_aborts_a_single_language() {
    let data = Datasets::new(&[
        ("en/web", english_texts(3)),
        ("hi/first", devanagari_texts(3)),
        ("hi/second", devanagari_texts(3)),
        ("sa/wiki", devanagari_texts(3)),
    ]);

    let mut opened = Vec::new();
    let mut sink = VecSink::failing_for(Lang::Hindi);
    let report = CorpusCollection::new("unused".into(), config())
        .collect(
            |d| {
                opened.push(d.id());
                data.open(d)
            },
            &mut sink,
        )
        .unwrap();

    let hi = &report.languages[&Lang::Hindi];
    assert!(hi.aborted);
    assert_eq!(hi.collected_tokens, 0);
    assert_eq!(hi.sources.len(), 1);
    assert_eq!(hi.sources[0].state, CollectorState::Aborted);
    assert!(!opened.contains(&"hi/second".to_string()));

    assert_eq!(report.languages[&Lang::English].collected_tokens, 3 * 29);
    assert_eq!(report.languages[&Lang::Sanskrit].collected_tokens, 3 * 20);
    assert!(sink.batches.iter().all(|(lang, _, _, _)| *lang != Lang::Hindi));
}

fn write_jsonl(path: &std::path::Path, field: &str, texts: &[String]) {
    let lines: Vec<String> = texts
        .iter()
        .enumerate()
        .map(|(id, t)| {
            let mut record = serde_json::Map::new();
            record.insert("id".to_string(), json!(id));
            record.insert(field.to_string(), json!(t));
            serde_json::Value::Object(record).to_string()
        })
        .collect();
    std::fs::write(path, lines.join("\n")).unwrap();
}

#[test_log::test]
fn run_from_local_files() {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();

    let mut english = english_texts(4);
    english.push(english[0].clone());
    write_jsonl(&src.path().join("en.jsonl"), "text", &english);
    write_jsonl(&src.path().join("hi.jsonl"), "content", &devanagari_texts(2));
    write_jsonl(&src.path().join("sa.jsonl"), "text", &devanagari_texts(3));

    let mut hindi = DatasetConfig::local("hi/local", src.path().join("hi.jsonl"));
    hindi.text_column = "content".to_string();
    let mut datasets = BTreeMap::new();
    datasets.insert(
        Lang::English,
        vec![DatasetConfig::local("en/local", src.path().join("en.jsonl"))],
    );
    datasets.insert(Lang::Hindi, vec![hindi]);
    datasets.insert(
        Lang::Sanskrit,
        vec![
            DatasetConfig::local("sa/missing", src.path().join("missing.jsonl")),
            DatasetConfig::local("sa/local", src.path().join("sa.jsonl")),
        ],
    );
    let config = CorpusConfig {
        datasets: Catalog::new(datasets),
        ..Default::default()
    };

    let report = CorpusCollection::new(dst.path().to_path_buf(), config)
        .with_processing(true)
        .run()
        .unwrap();

    let layout = Layout::new(dst.path());
    let saved = Report::load(&layout.report_file()).unwrap();
    assert_eq!(saved.total_collected_tokens, report.total_collected_tokens);
    assert_eq!(saved.languages.len(), 3);
    assert_eq!(report.languages[&Lang::English].text_count, 4);
    assert_eq!(report.languages[&Lang::Hindi].text_count, 2);
    assert_eq!(report.languages[&Lang::Sanskrit].text_count, 3);
    assert_eq!(
        report.languages[&Lang::Sanskrit].sources[0].state,
        CollectorState::SourceError
    );

    assert!(layout.batch_file(&Lang::English, "en/local", 0).is_file());
    assert!(layout.batch_file(&Lang::Hindi, "hi/local", 0).is_file());
    assert!(!layout.batch_file(&Lang::Sanskrit, "sa/missing", 0).exists());

    let corpus = std::fs::read_to_string(layout.corpus_file(&Lang::English)).unwrap();
    assert_eq!(corpus.lines().count(), 4);
    assert_eq!(corpus.lines().next(), Some(english[0].as_str()));
    for lang in [Lang::English, Lang::Hindi, Lang::Sanskrit] {
        assert!(layout.stats_file(&lang).is_file());
    }
}
