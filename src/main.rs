//! # indic-corpus
//!
//! Token-budgeted collection of an English/Hindi/Sanskrit corpus from streamed datasets.
//!
//! ## Getting started
//!
//! ```sh
//! indic-corpus 0.1.0
//! token-budgeted English/Hindi/Sanskrit corpus collection.
//!
//! USAGE:
//!     indic-corpus <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     analyze    Report files, texts and tokens of collected batch files
//!     collect    Collect texts from configured datasets
//!     help       Prints this message or the help of the given subcommand(s)
//!     inspect    Print script labels of each line of a file
//!     process    Build processed corpora from collected batch files
//! ```
//!
//! Set `HF_TOKEN` to authenticate remote requests, and `RUST_LOG` to control verbosity.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use indic_corpus::{
    error::Error,
    filtering::ScriptPolicy,
    identifiers::ScriptClassifier,
    pipelines::{CorpusCollection, CorpusConfig, Pipeline},
    processing::{analyze, process, tokens::Counting},
    transformers::Normalizer,
};
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn load_config(path: Option<&Path>) -> Result<CorpusConfig, Error> {
    match path {
        Some(path) => {
            info!("loading configuration from {path:?}");
            CorpusConfig::load(path)
        }
        None => Ok(CorpusConfig::default()),
    }
}

fn inspect(opt: cli::Inspect) -> Result<(), Error> {
    let f = BufReader::new(File::open(&opt.src)?);
    let mut classifier = ScriptClassifier::default();
    let mut normalizer = Normalizer::default();

    for line in f.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let label = classifier.classify(&line);
        let admitted = ScriptPolicy::is_appropriate(label, &opt.lang);
        let profile = classifier.profile(&line);
        print!(
            "{label}\t{admitted}\t{}/{}/{}\t{line}",
            profile.devanagari(),
            profile.latin(),
            profile.alpha()
        );
        if opt.clean {
            print!("\t{}", normalizer.clean(&line, &opt.lang).unwrap_or_default());
        }
        println!();
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::IndicCorpus::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::IndicCorpus::Collect(c) => {
            let mut config = load_config(c.config.as_deref())?;
            if let Some(target) = c.target_tokens {
                config.quotas.total_tokens = target;
            }
            if !c.langs.is_empty() {
                config.langs = c.langs;
            }
            if let Some(batch_size) = c.batch_size {
                config.collector.batch_size = batch_size;
            }
            if c.precise {
                config.counting = Counting::Precise;
            }

            let p = CorpusCollection::new(c.dst, config).with_processing(c.process);
            let report = p.run()?;
            info!(
                "done: {} tokens collected ({:.2}% of {})",
                report.total_collected_tokens, report.completion_percentage, report.target_tokens
            );
        }

        cli::IndicCorpus::Process(p) => {
            let mut config = load_config(p.config.as_deref())?;
            if !p.langs.is_empty() {
                config.langs = p.langs;
            }
            let stats = process::process_all(&p.dst, &config.ordered_langs(), &config.estimator())?;
            for s in stats {
                info!(
                    "[{}] {} sentences, ~{} tokens in the first 1000",
                    s.language, s.total_texts, s.total_tokens
                );
            }
        }

        cli::IndicCorpus::Analyze(a) => {
            let mut config = load_config(a.config.as_deref())?;
            if !a.langs.is_empty() {
                config.langs = a.langs;
            }
            let analyses =
                analyze::analyze_all(&a.dst, &config.ordered_langs(), &config.estimator())?;
            for a in analyses {
                let completion = a
                    .completion_rate
                    .map(|r| format!(", {:.2}% of target", r * 100.0))
                    .unwrap_or_default();
                println!(
                    "{}: {} files, {} texts, {} tokens ({:.1} per text), {:.2} MB{completion}",
                    a.language,
                    a.totals.files,
                    a.totals.texts,
                    a.totals.tokens,
                    a.avg_tokens_per_text,
                    a.totals.bytes as f64 / (1024.0 * 1024.0)
                );
                for (source, s) in &a.sources {
                    println!(
                        "  {source}: {} files, {} texts, {} tokens",
                        s.files, s.texts, s.tokens
                    );
                }
            }
        }

        cli::IndicCorpus::Inspect(i) => inspect(i)?,
    };

    Ok(())
}
