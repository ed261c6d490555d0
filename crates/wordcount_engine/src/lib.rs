//! Word count engine: page fetching, decoding, HTML parsing and the page object.
mod decode;
mod fetch;
mod lines;
mod page;
mod parse;
mod types;

pub use decode::{decode_html, DecodedText};
pub use fetch::{FetchSettings, Fetcher, UrlFetcher};
pub use page::{HtmlPage, PageError, DEFAULT_LINE_CAPACITY};
pub use parse::parse_document;
pub use types::{FailureKind, FetchError, FetchMetadata, LineWindow, PageText};
pub use wordcount_core::{SortDirection, WordCount};
