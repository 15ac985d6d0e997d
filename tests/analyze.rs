mod common;

use common::{devanagari_texts, english_texts};
use indic_corpus::{
    io::{report::LangReport, BatchWriter, Layout, Report, Sink},
    lang::Lang,
    pipelines::Policy,
    processing::{analyze_all, analyze_language, TokenEstimator},
};

#[test_log::test]
fn grouped_by_source() {
    let dst = tempfile::tempdir().unwrap();
    let mut writer = BatchWriter::new(dst.path());
    let texts = english_texts(5);
    for (idx, batch) in texts.chunks(2).enumerate() {
        writer
            .write_batch(&Lang::English, "HuggingFaceFW/fineweb", idx, batch)
            .unwrap();
    }
    writer
        .write_batch(&Lang::English, "wikimedia/wikipedia", 0, &english_texts(1))
        .unwrap();

    let analysis =
        analyze_language(dst.path(), &Lang::English, &TokenEstimator::default()).unwrap();
    assert_eq!(analysis.totals.files, 4);
    assert_eq!(analysis.totals.texts, 6);
    assert_eq!(analysis.totals.tokens, 6 * 29);
    assert_eq!(analysis.avg_tokens_per_text, 29.0);
    assert_eq!(analysis.target_tokens, None);

    let layout = Layout::new(dst.path());
    let bytes = std::fs::metadata(layout.batch_file(&Lang::English, "wikimedia/wikipedia", 0))
        .unwrap()
        .len();
    let wiki = &analysis.sources["wikimedia_wikipedia"];
    assert_eq!((wiki.files, wiki.texts, wiki.bytes), (1, 1, bytes));

    let fineweb = &analysis.sources["HuggingFaceFW_fineweb"];
    assert_eq!((fineweb.files, fineweb.texts), (3, 5));
    assert_eq!(fineweb.tokens, 5 * 29);
    assert_eq!(analysis.totals.bytes, fineweb.bytes + wiki.bytes);
}

#[test_log::test]
fn completion_against_report() {
    let dst = tempfile::tempdir().unwrap();
    let mut writer = BatchWriter::new(dst.path());
    writer
        .write_batch(&Lang::Hindi, "hi/web", 0, &devanagari_texts(4))
        .unwrap();

    let mut report = Report::new(1000);
    report.add(Lang::Hindi, LangReport::new(144, Policy::Bounded));
    report.save(&Layout::new(dst.path()).report_file()).unwrap();

    let analyses = analyze_all(
        dst.path(),
        &[Lang::Hindi, Lang::Sanskrit],
        &TokenEstimator::default(),
    )
    .unwrap();

    let hi = &analyses[0];
    assert_eq!(hi.language, Lang::Hindi);
    // 10 words, x1.8
    assert_eq!(hi.totals.tokens, 4 * 18);
    assert_eq!(hi.target_tokens, Some(144));
    assert_eq!(hi.completion_rate, Some(0.5));

    // nothing collected, and not in the report
    let sa = &analyses[1];
    assert_eq!(sa.totals.files, 0);
    assert_eq!(sa.totals.texts, 0);
    assert_eq!(sa.avg_tokens_per_text, 0.0);
    assert!(sa.sources.is_empty());
    assert_eq!(sa.completion_rate, None);
}

#[test_log::test]
fn without_report() {
    let dst = tempfile::tempdir().unwrap();
    let mut writer = BatchWriter::new(dst.path());
    writer
        .write_batch(&Lang::Sanskrit, "sa/wiki", 0, &devanagari_texts(2))
        .unwrap();

    let analyses =
        analyze_all(dst.path(), &[Lang::Sanskrit], &TokenEstimator::default()).unwrap();
    assert_eq!(analyses[0].totals.tokens, 2 * 20);
    assert_eq!(analyses[0].target_tokens, None);
}
