/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Line, Span, Style};
use ratatui::Frame;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::charset;
use crate::response::EditorSettings;

use super::filter::{self, FilterError};
use super::preview_pane::{self, PreviewPane};
use super::render_plan::JSON_MODE;
use super::text_pane::{TextOptions, TextPane};

const THEME_NAME: &str = "base16-ocean.dark";

/// Syntax definitions and colors, loaded once
pub(super) struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Default for Highlighter {
    fn default() -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        Self {
            syntax_set: SyntaxSet::load_defaults_nonewlines(),
            theme: theme_set.themes.remove(THEME_NAME).unwrap_or_default(),
        }
    }
}

impl Highlighter {
    /// Highlights text for a content-type style mode, falling back to plain text
    pub fn highlight(&self, text: &str, mode: &str) -> Vec<Line<'static>> {
        let syntax = self
            .syntax_set
            .find_syntax_by_name(syntax_name(mode))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        text.lines()
            .map(|line| match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => Line::from(
                    ranges
                        .into_iter()
                        .map(|(style, text)| {
                            let fg = style.foreground;
                            Span::styled(text.to_string(), Style::new().fg(Color::Rgb(fg.r, fg.g, fg.b)))
                        })
                        .collect::<Vec<_>>(),
                ),
                Err(error) => {
                    log::debug!("Highlighting failed: {error}");
                    Line::from(line.to_string())
                }
            })
            .collect()
    }
}

/// Maps a content-type style mode to a syntect syntax name
pub fn syntax_name(mode: &str) -> &'static str {
    let media_type = charset::media_type(mode).to_ascii_lowercase();
    if media_type.contains("json") {
        "JSON"
    } else if media_type.contains("html") {
        "HTML"
    } else if media_type.contains("xml") {
        "XML"
    } else if media_type.contains("javascript") || media_type.contains("ecmascript") {
        "JavaScript"
    } else if media_type.contains("css") {
        "CSS"
    } else if media_type.contains("yaml") {
        "YAML"
    } else if media_type.contains("markdown") {
        "Markdown"
    } else {
        "Plain Text"
    }
}

/// The text shown in source view, after prettifying and filtering
#[derive(Debug, PartialEq, Eq)]
pub struct SourceText {
    pub text: String,
    pub filter_error: Option<FilterError>,
}

/// Pretty-prints JSON bodies and applies the filter to them; other modes pass through
pub fn source_text(text: &str, mode: &str, filter: &str, indent_size: usize) -> SourceText {
    if mode != JSON_MODE {
        return SourceText {
            text: text.to_string(),
            filter_error: None,
        };
    }

    let filter = filter.trim();
    if !filter.is_empty() {
        match filter::apply(text, filter) {
            Ok(matches) => {
                return SourceText {
                    text: pretty_json(&matches, indent_size).unwrap_or_else(|| text.to_string()),
                    filter_error: None,
                }
            }
            Err(error) => {
                log::debug!("Filter \"{filter}\" failed: {error}");
                return SourceText {
                    text: prettify(text, indent_size),
                    filter_error: Some(error),
                };
            }
        }
    }
    SourceText {
        text: prettify(text, indent_size),
        filter_error: None,
    }
}

fn prettify(text: &str, indent_size: usize) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|value| pretty_json(&value, indent_size))
        .unwrap_or_else(|| text.to_string())
}

fn pretty_json(value: &Value, indent_size: usize) -> Option<String> {
    let indent = " ".repeat(indent_size);
    let mut buffer = vec![];
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer).ok()?;
    String::from_utf8(buffer).ok()
}

/// Syntax-highlighted, read-only view of the body
#[derive(Default)]
pub(super) struct Source {
    text_pane: TextPane,
}

impl Source {
    pub fn init(
        &mut self,
        highlighter: &Highlighter,
        text: &str,
        mode: &str,
        filter: &str,
        editor: &EditorSettings,
        malformed: bool,
    ) {
        let source = source_text(text, mode, filter, editor.editor_indent_size);
        let detail = match &source.filter_error {
            Some(error) => format!("{} - {error}", charset::media_type(mode)),
            None if !filter.trim().is_empty() && mode == JSON_MODE => {
                format!("{} - {}", charset::media_type(mode), filter.trim())
            }
            None => charset::media_type(mode).to_string(),
        };
        let lines = highlighter.highlight(&source.text, mode);
        let plain = source.text.lines().map(str::to_string).collect();
        self.text_pane.init(
            preview_pane::pane_title("Source", &detail, malformed),
            lines,
            plain,
            TextOptions {
                wrap: editor.editor_line_wrapping,
                key_map: editor.editor_key_map,
                links: true,
                style: Style::default(),
            },
        );
    }

    pub fn clear(&mut self) {
        self.text_pane.clear();
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.text_pane.set_wrap(wrap);
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        self.text_pane.handle_key_event(key_event);
    }

    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) -> std::io::Result<()> {
        self.text_pane.handle_mouse_event(mouse_event)
    }

    #[cfg(test)]
    pub fn title(&self) -> &str {
        self.text_pane.title()
    }
}

impl PreviewPane for Source {
    fn render(&mut self, area: Rect, frame: &mut Frame<'_>, has_focus: bool) {
        self.text_pane.render(area, frame, has_focus);
    }
}
