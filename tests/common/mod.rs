#![allow(dead_code)]
use std::cell::Cell;

use indic_corpus::{
    error::Error,
    io::Sink,
    lang::Lang,
    sources::{Record, Records, Source},
};
use serde_json::json;

/// In-memory source that counts pulled records.
pub struct Memory {
    pub name: String,
    pub records: Vec<Result<Record, String>>,
    pub pulled: Cell<usize>,
    pub unavailable: bool,
}

impl Memory {
    pub fn new(name: &str, texts: &[String]) -> Self {
        Self {
            name: name.to_string(),
            records: texts
                .iter()
                .map(|t| Ok(Record::new(json!({ "text": t }))))
                .collect(),
            pulled: Cell::new(0),
            unavailable: false,
        }
    }

    pub fn unavailable(name: &str) -> Self {
        Self {
            unavailable: true,
            ..Self::new(name, &[])
        }
    }

    pub fn fail_after(mut self, n: usize) -> Self {
        self.records.insert(n, Err("connection reset".to_string()));
        self
    }
}

impl Source for Memory {
    fn name(&self) -> &str {
        &self.name
    }

    fn records(&mut self) -> Result<Records<'_>, Error> {
        if self.unavailable {
            return Err(Error::SourceUnavailable {
                source: self.name.clone(),
                reason: "dataset not found".to_string(),
            });
        }

        let pulled = &self.pulled;
        Ok(Box::new(self.records.iter().map(move |r| {
            pulled.set(pulled.get() + 1);
            r.clone().map_err(Error::Custom)
        })))
    }
}

/// Sink keeping batches in memory, optionally failing from the `fail_from`-th write on.
#[derive(Default)]
pub struct VecSink {
    pub batches: Vec<(Lang, String, usize, Vec<String>)>,
    pub fail_from: Option<usize>,
    pub fail_lang: Option<Lang>,
    writes: usize,
}

impl VecSink {
    pub fn failing_from(n: usize) -> Self {
        Self {
            fail_from: Some(n),
            ..Default::default()
        }
    }

    pub fn failing_for(lang: Lang) -> Self {
        Self {
            fail_lang: Some(lang),
            ..Default::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.batches
            .iter()
            .flat_map(|(_, _, _, texts)| texts.iter().cloned())
            .collect()
    }
}

impl Sink for VecSink {
    fn write_batch(
        &mut self,
        lang: &Lang,
        source: &str,
        batch_idx: usize,
        texts: &[String],
    ) -> Result<(), Error> {
        let fails = self.fail_from.map_or(false, |n| self.writes >= n)
            || self.fail_lang.as_ref() == Some(lang);
        self.writes += 1;
        if fails {
            return Err(Error::Sink {
                lang: lang.to_string(),
                reason: "disk full".to_string(),
            });
        }
        self.batches
            .push((lang.clone(), source.to_string(), batch_idx, texts.to_vec()));
        Ok(())
    }
}

/// 23-word English text, estimated at 29 tokens.
pub fn english_text(i: usize) -> String {
    let words: Vec<String> = (0..22).map(|w| format!("word{w}")).collect();
    format!("record{i} {}", words.join(" "))
}

pub fn english_texts(n: usize) -> Vec<String> {
    (0..n).map(english_text).collect()
}

/// 10-word Devanagari text.
pub fn devanagari_text(i: usize) -> String {
    format!("राम वन को गए {i} सीता भी साथ गईं अब")
}

pub fn devanagari_texts(n: usize) -> Vec<String> {
    (0..n).map(devanagari_text).collect()
}
