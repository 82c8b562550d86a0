/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use encoding_rs::{Encoding, UTF_8};

pub const DEFAULT_CHARSET: &str = "utf-8";

/// Text decoded from a response body
#[derive(Debug)]
pub struct Decoded {
    pub text: String,
    pub encoding: &'static Encoding,
    pub malformed: bool,
}

/// Returns the media type without parameters, e.g. "text/html" for "text/html; charset=utf-8"
pub fn media_type(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default()
}

/// Returns the `charset=<token>` value of a content-type, or "utf-8" if there isn't one
pub fn resolve(content_type: &str) -> &str {
    const KEY: &str = "charset=";
    let Some(start) = content_type.find(KEY).map(|index| index + KEY.len()) else {
        return DEFAULT_CHARSET;
    };
    let rest = &content_type[start..];
    let len = rest
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'))
        .unwrap_or(rest.len());
    if len == 0 {
        DEFAULT_CHARSET
    } else {
        &rest[..len]
    }
}

/// Returns the encoding for a content-type's charset, falling back to UTF-8 for unknown labels
pub fn encoding_for(content_type: &str) -> &'static Encoding {
    let charset = resolve(content_type);
    Encoding::for_label(charset.as_bytes()).unwrap_or_else(|| {
        log::warn!("Unknown charset \"{charset}\", decoding as {DEFAULT_CHARSET}");
        UTF_8
    })
}

/// Decodes a body using the charset of its content-type.
/// Invalid sequences are replaced with U+FFFD and flagged.
pub fn decode(bytes: &[u8], content_type: &str) -> Decoded {
    let (text, encoding, malformed) = encoding_for(content_type).decode(bytes);
    if malformed {
        log::warn!("Response body has malformed {} sequences", encoding.name());
    }
    Decoded {
        text: text.into_owned(),
        encoding,
        malformed,
    }
}

#[cfg(test)]
mod tests {
    use encoding_rs::WINDOWS_1252;

    use super::*;

    #[test]
    fn resolves_charset_parameter() {
        assert_eq!(resolve("text/html; charset=iso-8859-1"), "iso-8859-1");
        assert_eq!(resolve("application/json;charset=UTF-8;x=y"), "UTF-8");
    }

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(resolve("text/plain"), DEFAULT_CHARSET);
        assert_eq!(resolve(""), DEFAULT_CHARSET);
        assert_eq!(resolve("text/plain; charset="), DEFAULT_CHARSET);
        assert_eq!(resolve("text/plain; charset=\"latin1\""), DEFAULT_CHARSET);
    }

    #[test]
    fn unknown_label_falls_back_to_utf8() {
        assert_eq!(encoding_for("text/plain; charset=klingon"), UTF_8);
        assert_eq!(encoding_for("text/plain"), UTF_8);
    }

    #[test]
    fn decodes_with_declared_charset() {
        let decoded = decode(b"caf\xe9", "text/html; charset=iso-8859-1");
        assert_eq!(decoded.text, "café");
        assert_eq!(decoded.encoding, WINDOWS_1252);
        assert!(!decoded.malformed);
    }

    #[test]
    fn flags_malformed_input() {
        let decoded = decode(b"caf\xe9", "text/plain");
        assert_eq!(decoded.text, "caf\u{fffd}");
        assert!(decoded.malformed);
    }

    #[test]
    fn strips_parameters_from_media_type() {
        assert_eq!(media_type("image/png; q=1"), "image/png");
        assert_eq!(media_type("image/png"), "image/png");
    }
}
