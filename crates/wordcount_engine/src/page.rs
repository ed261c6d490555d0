use std::fmt;
use std::sync::Arc;

use page_logging::{page_debug, page_info, page_warn};
use thiserror::Error;
use wordcount_core::{count_words, FrequencyTable, SortDirection, SplitterError, WordCount, WordSplitter};

use crate::fetch::{Fetcher, UrlFetcher};
use crate::parse::parse_document;
use crate::{FetchError, LineWindow};

pub const DEFAULT_LINE_CAPACITY: usize = 1_000_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error(transparent)]
    InvalidPattern(#[from] SplitterError),
}

/// Word frequencies of one web page.
///
/// The page is fetched, parsed and counted on the first call to
/// [`HtmlPage::count_words`]; later calls reuse the table until a refresh is
/// forced. Fetch failures never reach the caller: the page is treated as
/// empty and the failure is kept for [`HtmlPage::last_fetch_error`].
pub struct HtmlPage {
    url: String,
    splitter: WordSplitter,
    line_capacity: usize,
    read_offset: usize,
    fetcher: Arc<dyn Fetcher>,
    table: Option<FrequencyTable>,
    last_fetch_error: Option<FetchError>,
}

impl HtmlPage {
    pub fn new(url: impl Into<String>, delimiter: &str) -> Result<Self, PageError> {
        Self::with_line_capacity(url, delimiter, DEFAULT_LINE_CAPACITY)
    }

    pub fn with_line_capacity(
        url: impl Into<String>,
        delimiter: &str,
        line_capacity: usize,
    ) -> Result<Self, PageError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(PageError::InvalidArgument("url must not be empty or blank"));
        }
        if delimiter.is_empty() {
            return Err(PageError::InvalidArgument("delimiter pattern must not be empty"));
        }
        if line_capacity == 0 {
            return Err(PageError::InvalidArgument("line capacity must be positive"));
        }
        let splitter = WordSplitter::new(delimiter)?;

        Ok(Self {
            url,
            splitter,
            line_capacity,
            read_offset: 0,
            fetcher: Arc::new(UrlFetcher::default()),
            table: None,
            last_fetch_error: None,
        })
    }

    /// Replaces the fetcher used to read the page.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The delimiter pattern words are split on.
    pub fn splitters(&self) -> &str {
        self.splitter.as_str()
    }

    pub fn line_capacity(&self) -> usize {
        self.line_capacity
    }

    pub fn is_computed(&self) -> bool {
        self.table.is_some()
    }

    /// Failure of the most recent fetch, cleared by the next successful one.
    pub fn last_fetch_error(&self) -> Option<&FetchError> {
        self.last_fetch_error.as_ref()
    }

    /// Word counts ordered by `direction` (ascending when `None`).
    ///
    /// Fetches and counts the page when no table has been computed yet or
    /// `force_refresh` is set; a refresh replaces the previous table.
    pub async fn count_words(
        &mut self,
        direction: Option<SortDirection>,
        force_refresh: bool,
    ) -> Vec<WordCount> {
        let direction = direction.unwrap_or_default();

        if force_refresh || self.table.is_none() {
            self.table = self.compute().await;
        }

        match &self.table {
            Some(table) => table.sorted(direction),
            None => Vec::new(),
        }
    }

    /// Fetches and counts the page. `None` when the fetch failed.
    async fn compute(&mut self) -> Option<FrequencyTable> {
        let window = LineWindow {
            offset: self.read_offset,
            max_lines: self.line_capacity,
        };

        let page = match self.fetcher.fetch(&self.url, window).await {
            Ok(page) => {
                self.last_fetch_error = None;
                page
            }
            Err(err) => {
                page_warn!("could not load page {}: {}", self.url, err);
                self.last_fetch_error = Some(err);
                return None;
            }
        };
        page_debug!(
            "parsing {} lines from {}",
            page.metadata.lines_read,
            page.metadata.final_url
        );

        let document = parse_document(&page.text);
        let table = count_words(&document, &self.splitter);
        page_info!(
            "counted {} distinct words ({} total) on {}",
            table.len(),
            table.total(),
            self.url
        );
        Some(table)
    }
}

impl fmt::Debug for HtmlPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlPage")
            .field("url", &self.url)
            .field("splitters", &self.splitter.as_str())
            .field("line_capacity", &self.line_capacity)
            .field("computed_words", &self.table.as_ref().map(FrequencyTable::len))
            .field("last_fetch_error", &self.last_fetch_error)
            .finish()
    }
}
