use encoding_rs::{CoderResult, Decoder, UTF_8};

use crate::decode::detect_encoding;
use crate::LineWindow;

/// Bytes buffered before the encoding is chosen, unless the input ends first.
const SNIFF_LEN: usize = 1024;

/// Decodes a byte stream as it arrives and keeps the lines of a [`LineWindow`].
///
/// `\n`, `\r` and `\r\n` each end a line. Input stops being wanted once the
/// window is filled or the byte ceiling is reached; in the latter case the
/// partial last line is dropped.
pub(crate) struct LineCollector {
    window: LineWindow,
    content_type: Option<String>,
    max_bytes: u64,
    byte_len: u64,
    sniffed: Vec<u8>,
    decoder: Option<Decoder>,
    current: String,
    after_cr: bool,
    seen_lines: usize,
    kept: String,
    kept_lines: usize,
    had_errors: bool,
    full: bool,
    truncated: bool,
}

pub(crate) struct CollectedLines {
    pub text: String,
    pub lines_read: usize,
    pub byte_len: u64,
    pub encoding_label: String,
    pub had_errors: bool,
    pub truncated: bool,
}

impl LineCollector {
    pub(crate) fn new(window: LineWindow, content_type: Option<&str>, max_bytes: u64) -> Self {
        Self {
            window,
            content_type: content_type.map(str::to_string),
            max_bytes,
            byte_len: 0,
            sniffed: Vec::new(),
            decoder: None,
            current: String::new(),
            after_cr: false,
            seen_lines: 0,
            kept: String::new(),
            kept_lines: 0,
            had_errors: false,
            full: window.max_lines == 0,
            truncated: false,
        }
    }

    fn is_done(&self) -> bool {
        self.full || self.truncated
    }

    /// Feeds raw bytes; returns true once no further input is wanted.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> bool {
        if self.is_done() {
            return true;
        }

        let remaining = self.max_bytes.saturating_sub(self.byte_len);
        let allowed = usize::try_from(remaining).map_or(chunk.len(), |r| r.min(chunk.len()));
        let slice = &chunk[..allowed];
        self.byte_len += allowed as u64;

        if self.decoder.is_some() {
            self.decode(slice, false);
        } else {
            self.sniffed.extend_from_slice(slice);
            if self.sniffed.len() >= SNIFF_LEN {
                self.start_decoding(false);
            }
        }

        if allowed < chunk.len() {
            self.truncated = true;
        }
        self.is_done()
    }

    pub(crate) fn finish(mut self) -> CollectedLines {
        let last = !self.truncated;
        if self.decoder.is_none() {
            self.start_decoding(last);
        } else if !self.full && last {
            self.decode(&[], true);
        }
        // A final line without terminator still counts, unless it was cut short.
        if !self.full && !self.truncated && !self.current.is_empty() {
            self.end_line();
        }

        let encoding_label = self
            .decoder
            .as_ref()
            .map_or(UTF_8.name(), |decoder| decoder.encoding().name())
            .to_string();

        CollectedLines {
            text: self.kept,
            lines_read: self.kept_lines,
            byte_len: self.byte_len,
            encoding_label,
            had_errors: self.had_errors,
            truncated: self.truncated,
        }
    }

    fn start_decoding(&mut self, last: bool) {
        let encoding = detect_encoding(&self.sniffed, self.content_type.as_deref());
        self.decoder = Some(encoding.new_decoder_with_bom_removal());
        let pending = std::mem::take(&mut self.sniffed);
        self.decode(&pending, last);
    }

    fn decode(&mut self, mut src: &[u8], last: bool) {
        let Some(decoder) = self.decoder.as_mut() else {
            return;
        };

        let mut decoded = String::new();
        loop {
            let needed = decoder
                .max_utf8_buffer_length(src.len())
                .unwrap_or(src.len().saturating_mul(3).saturating_add(16));
            decoded.reserve(needed);
            let (result, read, had_errors) = decoder.decode_to_string(src, &mut decoded, last);
            self.had_errors |= had_errors;
            src = &src[read..];
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
        self.consume(&decoded);
    }

    fn consume(&mut self, text: &str) {
        for ch in text.chars() {
            if self.full {
                return;
            }
            if std::mem::take(&mut self.after_cr) && ch == '\n' {
                continue;
            }
            match ch {
                '\n' => self.end_line(),
                '\r' => {
                    self.end_line();
                    self.after_cr = true;
                }
                _ => {
                    if self.seen_lines >= self.window.offset {
                        self.current.push(ch);
                    }
                }
            }
        }
    }

    fn end_line(&mut self) {
        if self.seen_lines >= self.window.offset {
            self.kept.push_str(&self.current);
            self.kept.push('\n');
            self.kept_lines += 1;
        }
        self.current.clear();
        self.seen_lines += 1;
        if self.seen_lines >= self.window.end() {
            self.full = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(chunks: &[&[u8]], window: LineWindow, max_bytes: u64) -> CollectedLines {
        let mut collector = LineCollector::new(window, None, max_bytes);
        for chunk in chunks {
            if collector.push(chunk) {
                break;
            }
        }
        collector.finish()
    }

    #[test]
    fn crlf_split_between_chunks_ends_one_line() {
        let mut first = vec![b'x'; SNIFF_LEN];
        first.push(b'\r');
        let chunks: [&[u8]; 3] = [&first, b"\ntwo\r", b"three"];
        let lines = collect(&chunks, LineWindow::first(5), u64::MAX);
        assert_eq!(lines.lines_read, 3);
        assert!(lines.text.ends_with("x\ntwo\nthree\n"));
    }

    #[test]
    fn utf16_code_unit_split_between_chunks_is_decoded_once() {
        // UTF-16LE with BOM, cut inside the newline code unit after sniffing.
        let mut first = vec![0xFF, 0xFE];
        for _ in 0..SNIFF_LEN {
            first.extend_from_slice(&[b'a', 0x00]);
        }
        first.push(b'\n');
        let chunks: [&[u8]; 2] = [&first, &[0x00, b'b', 0x00]];
        let lines = collect(&chunks, LineWindow::first(5), u64::MAX);
        assert_eq!(lines.text, format!("{}\nb\n", "a".repeat(SNIFF_LEN)));
        assert_eq!(lines.lines_read, 2);
        assert_eq!(lines.encoding_label, "UTF-16LE");
        assert!(!lines.had_errors);
    }

    #[test]
    fn offset_skips_leading_lines() {
        let window = LineWindow {
            offset: 1,
            max_lines: 2,
        };
        let lines = collect(&[&b"skip\nkeep\nalso\nnot\n"[..]], window, u64::MAX);
        assert_eq!(lines.text, "keep\nalso\n");
        assert_eq!(lines.lines_read, 2);
    }

    #[test]
    fn byte_ceiling_drops_the_partial_line() {
        let lines = collect(&[&b"first\nsecond line"[..]], LineWindow::first(5), 10);
        assert!(lines.truncated);
        assert_eq!(lines.byte_len, 10);
        assert_eq!(lines.text, "first\n");
    }
}
