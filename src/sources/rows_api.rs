/*! Remote rows provider

Pages through a dataset split with the datasets-server `/rows` endpoint:

```text
GET https://datasets-server.huggingface.co/rows?dataset=<name>&config=<config>&split=<split>&offset=<n>&length=<len>
```

Pages hold at most [MAX_PAGE_LENGTH] rows and are requested at increasing offsets,
so iteration order is the order of the dataset split.
Iteration stops on an empty page, or once `num_rows_total` rows have been read.

If the `HF_TOKEN` environment variable is set, it is sent as a bearer token.
!*/
use std::{collections::VecDeque, env, time::Duration};

use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use super::{DatasetConfig, Record, Records, Source};
use crate::error::Error;

pub const ENDPOINT: &str = "https://datasets-server.huggingface.co/rows";

/// Maximum page length accepted by the endpoint.
pub const MAX_PAGE_LENGTH: usize = 100;

#[derive(Debug, Deserialize)]
struct Page {
    rows: Vec<Row>,
    num_rows_total: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct Row {
    row: Value,
}

#[derive(Debug, Clone)]
pub struct RowsApi {
    dataset: DatasetConfig,
    id: String,
    endpoint: String,
    page_length: usize,
    token: Option<String>,
    client: Client,
}

impl RowsApi {
    pub fn new(dataset: DatasetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::SourceUnavailable {
                source: dataset.id(),
                reason: format!("could not build http client: {e}"),
            })?;

        Ok(Self {
            id: dataset.id(),
            dataset,
            endpoint: ENDPOINT.to_string(),
            page_length: MAX_PAGE_LENGTH,
            token: env::var("HF_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            client,
        })
    }

    /// Use another endpoint (mirrors, tests).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Set page length, clamped to `1..=`[MAX_PAGE_LENGTH].
    pub fn with_page_length(mut self, page_length: usize) -> Self {
        self.page_length = page_length.clamp(1, MAX_PAGE_LENGTH);
        self
    }

    fn unavailable(&self, reason: String) -> Error {
        Error::SourceUnavailable {
            source: self.id.clone(),
            reason,
        }
    }

    /// Fetch the page starting at `offset`.
    fn page(&self, offset: usize) -> Result<Page, Error> {
        let mut query = vec![
            ("dataset", self.dataset.name.clone()),
            ("split", self.dataset.split.clone()),
            ("offset", offset.to_string()),
            ("length", self.page_length.to_string()),
        ];
        if let Some(config) = &self.dataset.config {
            query.push(("config", config.clone()));
        }

        let mut request = self.client.get(&self.endpoint).query(&query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!("[{}] fetching rows {offset}..", self.id);
        let response = request
            .send()
            .map_err(|e| self.unavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(self.unavailable(format!("{status}: {}", body.trim())));
        }

        response
            .json::<Page>()
            .map_err(|e| self.unavailable(format!("invalid rows response: {e}")))
    }
}

impl Source for RowsApi {
    fn name(&self) -> &str {
        &self.id
    }

    fn text_field(&self) -> &str {
        &self.dataset.text_column
    }

    /// Opens the split. Streaming datasets fetch their first page eagerly so that opening fails early,
    /// others are fetched in full.
    fn records(&mut self) -> Result<Records<'_>, Error> {
        let api: &RowsApi = self;
        let mut pages = Pages::new(Box::new(move |offset| api.page(offset)));

        if api.dataset.streaming {
            pages.fetch_next()?;
        } else {
            pages.prefetch()?;
            info!("[{}] {} rows fetched", api.id, pages.buffer.len());
        }
        if let Some(total) = pages.total {
            info!("[{}] {total} rows available", api.id);
        }

        Ok(Box::new(pages))
    }
}

type Fetch<'a> = Box<dyn FnMut(usize) -> Result<Page, Error> + 'a>;

/// Lazy page iterator.
struct Pages<'a> {
    fetch: Fetch<'a>,
    offset: usize,
    total: Option<usize>,
    buffer: VecDeque<Record>,
    done: bool,
}

impl<'a> Pages<'a> {
    fn new(fetch: Fetch<'a>) -> Self {
        Self {
            fetch,
            offset: 0,
            total: None,
            buffer: VecDeque::new(),
            done: false,
        }
    }

    fn fill(&mut self, page: Page) {
        if page.num_rows_total.is_some() {
            self.total = page.num_rows_total;
        }
        if page.rows.is_empty() {
            self.done = true;
        }
        self.offset += page.rows.len();
        self.buffer
            .extend(page.rows.into_iter().map(|r| Record::new(r.row)));

        if let Some(total) = self.total {
            if self.offset >= total {
                self.done = true;
            }
        }
    }

    /// Fetch the page at the current offset.
    fn fetch_next(&mut self) -> Result<(), Error> {
        let page = (self.fetch)(self.offset)?;
        self.fill(page);
        Ok(())
    }

    /// Fetch every remaining page.
    fn prefetch(&mut self) -> Result<(), Error> {
        while !self.done {
            self.fetch_next()?;
        }
        Ok(())
    }
}

impl<'a> Iterator for Pages<'a> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(record) = self.buffer.pop_front() {
            return Some(Ok(record));
        }
        if self.done {
            return None;
        }

        match self.fetch_next() {
            Ok(()) => self.buffer.pop_front().map(Ok),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
