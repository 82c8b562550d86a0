/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use serde::de::IgnoredAny;

use crate::charset;
use crate::errors::ViewerError;
use crate::response::{EditorSettings, PreviewMode, ResponseViewModel};

use super::size_guard::SizeGuard;

pub const JSON_MODE: &str = "application/json";

#[derive(Debug, PartialEq, Eq)]
pub enum JsonSniff {
    Json,
    NotJson,
}

/// Checks whether a body parses as JSON
pub fn sniff_json(text: &str) -> JsonSniff {
    match serde_json::from_str::<IgnoredAny>(text) {
        Ok(_) => JsonSniff::Json,
        Err(_) => JsonSniff::NotJson,
    }
}

/// Picks the syntax mode for source view, relabeling JSON bodies served as something else
pub fn source_mode(content_type: &str, text: &str) -> String {
    if content_type.to_ascii_lowercase().contains("json") || sniff_json(text) == JsonSniff::Json {
        JSON_MODE.to_string()
    } else {
        content_type.to_string()
    }
}

/// What the viewer shows for a response
#[derive(Debug, PartialEq, Eq)]
pub enum RenderPlan {
    Error {
        url: String,
        status_code: u16,
        text: String,
    },
    Blocked {
        limit_mb: u64,
    },
    Empty,
    Image {
        media_type: String,
        data_uri: String,
        bytes: Vec<u8>,
    },
    Web {
        html: String,
        content_type: String,
        malformed: bool,
    },
    Raw {
        text: String,
        malformed: bool,
    },
    Source {
        text: String,
        mode: String,
        filter: String,
        editor: EditorSettings,
        malformed: bool,
    },
}

impl RenderPlan {
    pub fn build(response: &ResponseViewModel, guard: &SizeGuard) -> Result<Self, ViewerError> {
        let body = response.body_bytes()?;

        if response.error {
            return Ok(RenderPlan::Error {
                url: response.url.clone(),
                status_code: response.status_code,
                text: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        if guard.is_blocking() {
            return Ok(RenderPlan::Blocked {
                limit_mb: guard.limit_mb(),
            });
        }
        if body.is_empty() {
            return Ok(RenderPlan::Empty);
        }

        let content_type = response.content_type.as_str();
        let lowercase = content_type.to_ascii_lowercase();
        let media_type = charset::media_type(content_type);
        let plan = match response.preview_mode {
            PreviewMode::Friendly if lowercase.starts_with("image/") => RenderPlan::Image {
                media_type: media_type.to_string(),
                data_uri: format!("data:{};base64,{}", media_type, response.body),
                bytes: body,
            },
            PreviewMode::Friendly if lowercase.contains("html") => {
                let decoded = charset::decode(&body, content_type);
                RenderPlan::Web {
                    html: decoded.text,
                    content_type: format!("{media_type}; charset=UTF-8"),
                    malformed: decoded.malformed,
                }
            }
            PreviewMode::Raw => {
                let decoded = charset::decode(&body, content_type);
                RenderPlan::Raw {
                    text: decoded.text,
                    malformed: decoded.malformed,
                }
            }
            _ => {
                let decoded = charset::decode(&body, content_type);
                RenderPlan::Source {
                    mode: source_mode(content_type, &decoded.text),
                    text: decoded.text,
                    filter: response.filter.clone(),
                    editor: response.editor.clone(),
                    malformed: decoded.malformed,
                }
            }
        };
        Ok(plan)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderPlan::Error { .. } => "error",
            RenderPlan::Blocked { .. } => "blocked",
            RenderPlan::Empty => "empty",
            RenderPlan::Image { .. } => "image",
            RenderPlan::Web { .. } => "web",
            RenderPlan::Raw { .. } => "raw",
            RenderPlan::Source { .. } => "source",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::session::Session;

    use super::*;

    fn response(body: &[u8], content_type: &str, preview_mode: PreviewMode) -> ResponseViewModel {
        let mut response = ResponseViewModel::from_raw_body(body, content_type);
        response.preview_mode = preview_mode;
        response
    }

    fn plan(response: &ResponseViewModel) -> RenderPlan {
        let mut guard = SizeGuard::default();
        guard.evaluate(response.bytes, &Session::default());
        RenderPlan::build(response, &guard).unwrap()
    }

    #[test]
    fn friendly_image_embeds_payload_unmodified() {
        let response = response(b"\x89PNG\r\n", "image/png", PreviewMode::Friendly);
        assert_eq!(
            plan(&response),
            RenderPlan::Image {
                media_type: "image/png".to_string(),
                data_uri: format!("data:image/png;base64,{}", response.body),
                bytes: b"\x89PNG\r\n".to_vec(),
            }
        );
    }

    #[test]
    fn image_content_type_is_case_insensitive() {
        let response = response(b"GIF89a", "IMAGE/GIF; x=1", PreviewMode::Friendly);
        assert_eq!(plan(&response).name(), "image");
    }

    #[test]
    fn friendly_html_decodes_charset_and_forces_utf8() {
        let response = response(
            b"<p>caf\xe9</p>",
            "text/html; charset=iso-8859-1",
            PreviewMode::Friendly,
        );
        assert_eq!(
            plan(&response),
            RenderPlan::Web {
                html: "<p>café</p>".to_string(),
                content_type: "text/html; charset=UTF-8".to_string(),
                malformed: false,
            }
        );
    }

    #[test]
    fn raw_mode_ignores_image_and_html() {
        for content_type in ["image/png", "text/html"] {
            let response = response(b"abc", content_type, PreviewMode::Raw);
            assert_eq!(
                plan(&response),
                RenderPlan::Raw {
                    text: "abc".to_string(),
                    malformed: false,
                }
            );
        }
    }

    #[test]
    fn source_mode_relabels_json() {
        let response = response(br#"{"a":1}"#, "text/plain", PreviewMode::Source);
        match plan(&response) {
            RenderPlan::Source { mode, text, .. } => {
                assert_eq!(mode, JSON_MODE);
                assert_eq!(text, r#"{"a":1}"#);
            }
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[test]
    fn source_mode_keeps_content_type_for_non_json() {
        let response = response(b"{not json", "text/plain", PreviewMode::Source);
        match plan(&response) {
            RenderPlan::Source { mode, .. } => assert_eq!(mode, "text/plain"),
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[test]
    fn json_content_type_is_json_mode_even_when_invalid() {
        assert_eq!(source_mode("application/vnd.api+json", "{oops"), JSON_MODE);
    }

    #[test]
    fn friendly_falls_back_to_source() {
        let response = response(b"body", "text/css", PreviewMode::Friendly);
        assert_eq!(plan(&response).name(), "source");
    }

    #[test]
    fn empty_body_wins_over_preview_mode() {
        for mode in [PreviewMode::Friendly, PreviewMode::Raw, PreviewMode::Source] {
            let response = response(b"", "image/png", mode);
            assert_eq!(plan(&response), RenderPlan::Empty);
        }
    }

    #[test]
    fn error_flag_wins_over_everything() {
        let mut response = response(b"connection refused", "image/png", PreviewMode::Friendly);
        response.error = true;
        response.url = "http://localhost:1".to_string();
        response.bytes = u64::MAX;
        assert_eq!(
            plan(&response),
            RenderPlan::Error {
                url: "http://localhost:1".to_string(),
                status_code: 0,
                text: "connection refused".to_string(),
            }
        );
    }

    #[test]
    fn blocked_wins_over_empty() {
        let mut response = response(b"", "text/plain", PreviewMode::Raw);
        response.bytes = 6 * 1024 * 1024;
        assert_eq!(plan(&response), RenderPlan::Blocked { limit_mb: 5 });
    }

    #[test]
    fn missing_charset_decodes_as_utf8() {
        let response = response("naïve".as_bytes(), "text/plain", PreviewMode::Raw);
        assert_eq!(
            plan(&response),
            RenderPlan::Raw {
                text: "naïve".to_string(),
                malformed: false,
            }
        );
    }

    #[test]
    fn bad_payload_is_an_error() {
        let mut response = response(b"", "text/plain", PreviewMode::Raw);
        response.body = "%%%".to_string();
        assert!(RenderPlan::build(&response, &SizeGuard::default()).is_err());
    }

    #[test]
    fn sniffs_json() {
        assert_eq!(sniff_json("[1, 2]"), JsonSniff::Json);
        assert_eq!(sniff_json("42"), JsonSniff::Json);
        assert_eq!(sniff_json("<html>"), JsonSniff::NotJson);
        assert_eq!(sniff_json(""), JsonSniff::NotJson);
    }
}
