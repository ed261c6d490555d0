use std::fmt;

/// Which lines of a resource to read: skip `offset` lines, then keep at most
/// `max_lines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow {
    pub offset: usize,
    pub max_lines: usize,
}

impl LineWindow {
    pub fn first(max_lines: usize) -> Self {
        Self {
            offset: 0,
            max_lines,
        }
    }

    /// Number of leading lines that must be read to fill the window.
    pub(crate) fn end(&self) -> usize {
        self.offset.saturating_add(self.max_lines)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Lines of the window, each followed by `\n`.
    pub text: String,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub encoding_label: String,
    pub lines_read: usize,
    pub byte_len: u64,
    /// The byte ceiling cut the read short.
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    UnsupportedScheme { scheme: String },
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    Io,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::UnsupportedScheme { scheme } => write!(f, "unsupported scheme {scheme}"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
