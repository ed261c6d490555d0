use std::io;
use std::time::Duration;

use futures_util::StreamExt;
use page_logging::{page_debug, page_warn};
use reqwest::header::CONTENT_TYPE;
use tokio::io::AsyncReadExt;
use url::Url;

use crate::lines::LineCollector;
use crate::{FailureKind, FetchError, FetchMetadata, LineWindow, PageText};

const FILE_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    /// Ceiling on bytes read from one resource, whatever the line window.
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Line-oriented read access to a resource named by URL.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, window: LineWindow) -> Result<PageText, FetchError>;
}

/// Fetches `http`, `https` and `file` URLs.
#[derive(Debug, Clone, Default)]
pub struct UrlFetcher {
    settings: FetchSettings,
}

impl UrlFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(self.settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    async fn fetch_http(
        &self,
        original_url: &str,
        url: Url,
        window: LineWindow,
    ) -> Result<PageText, FetchError> {
        let client = self.build_client()?;
        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut collector =
            LineCollector::new(window, content_type.as_deref(), self.settings.max_bytes);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if collector.push(&chunk) {
                break;
            }
        }
        // Dropping the stream here releases the connection early.
        drop(stream);

        Ok(into_page_text(collector, original_url, final_url, content_type))
    }

    async fn fetch_file(
        &self,
        original_url: &str,
        url: Url,
        window: LineWindow,
    ) -> Result<PageText, FetchError> {
        let path = url.to_file_path().map_err(|()| {
            FetchError::new(FailureKind::InvalidUrl, "url does not name a local file")
        })?;
        let mut file = tokio::fs::File::open(&path).await.map_err(map_io_error)?;

        let mut collector = LineCollector::new(window, None, self.settings.max_bytes);
        let mut chunk = vec![0u8; FILE_CHUNK_SIZE];
        loop {
            let read = file.read(&mut chunk).await.map_err(map_io_error)?;
            if read == 0 || collector.push(&chunk[..read]) {
                break;
            }
        }

        Ok(into_page_text(collector, original_url, url.to_string(), None))
    }
}

#[async_trait::async_trait]
impl Fetcher for UrlFetcher {
    async fn fetch(&self, url: &str, window: LineWindow) -> Result<PageText, FetchError> {
        let parsed =
            Url::parse(url).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        page_debug!(
            "fetch url={} offset={} max_lines={}",
            url,
            window.offset,
            window.max_lines
        );

        match parsed.scheme() {
            "http" | "https" => self.fetch_http(url, parsed, window).await,
            "file" => self.fetch_file(url, parsed, window).await,
            other => Err(FetchError::new(
                FailureKind::UnsupportedScheme {
                    scheme: other.to_string(),
                },
                "only http, https and file urls can be fetched",
            )),
        }
    }
}

fn into_page_text(
    collector: LineCollector,
    original_url: &str,
    final_url: String,
    content_type: Option<String>,
) -> PageText {
    let lines = collector.finish();
    if lines.truncated {
        page_warn!(
            "read of {} stopped at the byte ceiling; partial last line dropped",
            original_url
        );
    }
    if lines.had_errors {
        page_warn!(
            "malformed {} sequences in {} were replaced",
            lines.encoding_label,
            original_url
        );
    }
    page_debug!(
        "read {} lines ({} bytes, {}) from {}",
        lines.lines_read,
        lines.byte_len,
        lines.encoding_label,
        original_url
    );

    PageText {
        text: lines.text,
        metadata: FetchMetadata {
            original_url: original_url.to_string(),
            final_url,
            content_type,
            encoding_label: lines.encoding_label,
            lines_read: lines.lines_read,
            byte_len: lines.byte_len,
            truncated: lines.truncated,
        },
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

fn map_io_error(err: io::Error) -> FetchError {
    if err.kind() == io::ErrorKind::TimedOut {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Io, err.to_string())
}
