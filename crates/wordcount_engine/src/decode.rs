use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset -> chardetng fallback.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedText {
    decode_with(bytes, detect_encoding(bytes, content_type))
}

/// Pick the encoding of a document from its leading bytes and Content-Type.
pub(crate) fn detect_encoding(prefix: &[u8], content_type: Option<&str>) -> &'static Encoding {
    // 1) BOM wins over any declared charset
    if let Some((encoding, _)) = Encoding::for_bom(prefix) {
        return encoding;
    }

    // 2) Content-Type header charset
    if let Some(enc) = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return enc;
    }

    // 3) chardetng detection over what has been read so far
    let mut detector = EncodingDetector::new();
    detector.feed(prefix, true);
    detector.guess(None, true)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches(['"', '\'']))
        })
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedText {
    // `decode` sniffs and strips a BOM itself.
    let (text, used, had_errors) = enc.decode(bytes);
    DecodedText {
        text: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}
