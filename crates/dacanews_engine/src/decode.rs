use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode bytes with {encoding}")]
    Malformed { encoding: String },
}

/// Decode a response body to UTF-8: BOM, then the Content-Type charset, then
/// chardetng's guess.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedHtml, DecodeError> {
    let (text, encoding_label, had_errors) = decode_with(bytes, pick_encoding(bytes, content_type));
    if had_errors {
        return Err(DecodeError::Malformed {
            encoding: encoding_label,
        });
    }
    Ok(DecodedHtml {
        html: text,
        encoding_label,
    })
}

/// Like [`decode_html`], but malformed sequences become U+FFFD instead of an
/// error.
pub fn decode_html_lossy(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    let (html, encoding_label, _) = decode_with(bytes, pick_encoding(bytes, content_type));
    DecodedHtml {
        html,
        encoding_label,
    }
}

fn pick_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    if let Some(enc) = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return enc;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true)
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']))
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> (String, String, bool) {
    let (text, actual, had_errors) = enc.decode(bytes);
    (text.into_owned(), actual.name().to_string(), had_errors)
}
