//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use indic_corpus::lang::Lang;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "indic-corpus",
    about = "token-budgeted English/Hindi/Sanskrit corpus collection."
)]
/// Holds every command that is callable by the `indic-corpus` command.
pub enum IndicCorpus {
    #[structopt(about = "Collect texts from configured datasets")]
    Collect(Collect),
    #[structopt(about = "Build processed corpora from collected batch files")]
    Process(Process),
    #[structopt(about = "Report files, texts and tokens of collected batch files")]
    Analyze(Analyze),
    #[structopt(about = "Print script labels of each line of a file")]
    Inspect(Inspect),
}

#[derive(Debug, StructOpt)]
/// Collect command and parameters.
pub struct Collect {
    #[structopt(parse(from_os_str), help = "corpus location")]
    pub dst: PathBuf,

    #[structopt(
        parse(from_os_str),
        long = "config",
        short = "c",
        help = "JSON configuration file"
    )]
    pub config: Option<PathBuf>,

    #[structopt(long = "target-tokens", help = "total token target")]
    pub target_tokens: Option<u64>,

    #[structopt(
        long = "languages",
        short = "l",
        help = "languages to collect (names or ISO codes)"
    )]
    pub langs: Vec<Lang>,

    #[structopt(long = "batch-size", help = "number of texts per batch file")]
    pub batch_size: Option<usize>,

    #[structopt(
        long = "precise",
        help = "count English tokens with a BPE tokenizer (needs the `bpe` feature)"
    )]
    pub precise: bool,

    #[structopt(long = "process", help = "build processed corpora after collection")]
    pub process: bool,
}

#[derive(Debug, StructOpt)]
/// Process command and parameters.
pub struct Process {
    #[structopt(parse(from_os_str), help = "corpus location")]
    pub dst: PathBuf,

    #[structopt(
        parse(from_os_str),
        long = "config",
        short = "c",
        help = "JSON configuration file"
    )]
    pub config: Option<PathBuf>,

    #[structopt(
        long = "languages",
        short = "l",
        help = "languages to process (names or ISO codes)"
    )]
    pub langs: Vec<Lang>,
}

#[derive(Debug, StructOpt)]
/// Analyze command and parameters.
pub struct Analyze {
    #[structopt(parse(from_os_str), help = "corpus location")]
    pub dst: PathBuf,

    #[structopt(
        parse(from_os_str),
        long = "config",
        short = "c",
        help = "JSON configuration file"
    )]
    pub config: Option<PathBuf>,

    #[structopt(
        long = "languages",
        short = "l",
        help = "languages to analyze (names or ISO codes)"
    )]
    pub langs: Vec<Lang>,
}

#[derive(Debug, StructOpt)]
/// Inspect command and parameters.
pub struct Inspect {
    #[structopt(parse(from_os_str), help = "text file, one text per line")]
    pub src: PathBuf,

    #[structopt(long = "lang", short = "l", help = "expected language")]
    pub lang: Lang,

    #[structopt(long = "clean", help = "also print the cleaned text")]
    pub clean: bool,
}
