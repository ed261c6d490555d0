use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SplitterError {
    #[error("delimiter pattern must not be empty")]
    EmptyPattern,
    #[error("invalid delimiter pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Splits text into candidate words on a regular-expression delimiter.
#[derive(Debug, Clone)]
pub struct WordSplitter {
    pattern: Regex,
}

impl WordSplitter {
    pub fn new(pattern: &str) -> Result<Self, SplitterError> {
        if pattern.is_empty() {
            return Err(SplitterError::EmptyPattern);
        }
        let pattern = Regex::new(pattern).map_err(|err| SplitterError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Yields the words of `text`: fragments between delimiter matches that are
    /// neither empty nor whitespace-only. Words are returned verbatim.
    pub fn split<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.pattern.split(text).filter(|word| is_word(word))
    }
}

fn is_word(fragment: &str) -> bool {
    !fragment.trim().is_empty()
}
