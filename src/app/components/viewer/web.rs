/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

//! A text-only rendering of HTML bodies for the friendly preview.

use crossterm::event::{KeyEvent, MouseEvent};
use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::response::EditorSettings;

use super::preview_pane::{self, PreviewPane};
use super::text_pane::{TextOptions, TextPane};

const SKIPPED_TAGS: [&str; 3] = ["script", "style", "template"];
const BLOCK_TAGS: [&str; 32] = [
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "title", "tr", "ul",
];

#[derive(Default)]
struct TextBuilder {
    lines: Vec<String>,
    line: String,
    pre_depth: usize,
}

impl TextBuilder {
    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.line);
        let line = line.trim_end();
        if !line.is_empty() {
            self.lines.push(line.to_string());
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.pre_depth > 0 {
            let mut parts = text.split('\n');
            if let Some(first) = parts.next() {
                self.line.push_str(first);
            }
            for part in parts {
                self.lines.push(std::mem::take(&mut self.line).trim_end().to_string());
                self.line.push_str(part);
            }
            return;
        }
        for ch in text.chars() {
            if ch.is_whitespace() {
                if !self.line.is_empty() && !self.line.ends_with(' ') {
                    self.line.push(' ');
                }
            } else {
                self.line.push(ch);
            }
        }
    }

    fn open_tag(&mut self, name: &str) {
        if BLOCK_TAGS.contains(&name) {
            self.break_line();
        }
        match name {
            "li" => self.line.push_str("• "),
            "hr" => self.lines.push("────────".to_string()),
            "pre" => self.pre_depth += 1,
            "td" | "th" if !self.line.is_empty() => self.line.push_str("  "),
            _ => {}
        }
    }

    fn close_tag(&mut self, name: &str) {
        if name == "pre" {
            self.pre_depth = self.pre_depth.saturating_sub(1);
        }
        if BLOCK_TAGS.contains(&name) {
            self.break_line();
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.break_line();
        self.lines
    }
}

/// Renders HTML as lines of plain text
pub fn html_text(html: &str) -> Vec<String> {
    let parse_options = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), parse_options).one(html);
    if !dom.errors.is_empty() {
        log::debug!("HTML parsed with {} errors", dom.errors.len());
    }

    let mut builder = TextBuilder::default();
    walk(&dom.document, &mut builder);
    builder.finish()
}

fn walk(node: &Handle, builder: &mut TextBuilder) {
    match node.data {
        NodeData::Text { ref contents } => builder.push_text(&contents.borrow()),
        NodeData::Element { ref name, .. } => {
            let tag = &*name.local;
            if SKIPPED_TAGS.contains(&tag) {
                return;
            }
            builder.open_tag(tag);
            for child in node.children.borrow().iter() {
                walk(child, builder);
            }
            builder.close_tag(tag);
            return;
        }
        _ => {}
    }
    for child in node.children.borrow().iter() {
        walk(child, builder);
    }
}

/// Friendly preview of an HTML body
#[derive(Default)]
pub(super) struct Web {
    text_pane: TextPane,
}

impl Web {
    pub fn init(&mut self, html: &str, content_type: &str, editor: &EditorSettings, malformed: bool) {
        self.text_pane.init_plain(
            preview_pane::pane_title("Preview", content_type, malformed),
            &html_text(html).join("\n"),
            TextOptions {
                wrap: true,
                key_map: editor.editor_key_map,
                links: false,
                ..TextOptions::default()
            },
        );
    }

    pub fn clear(&mut self) {
        self.text_pane.clear();
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        self.text_pane.handle_key_event(key_event);
    }

    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) -> std::io::Result<()> {
        self.text_pane.handle_mouse_event(mouse_event)
    }
}

impl PreviewPane for Web {
    fn render(&mut self, area: Rect, frame: &mut Frame<'_>, has_focus: bool) {
        self.text_pane.render(area, frame, has_focus);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn renders_blocks_as_lines() {
        let html = r#"<!DOCTYPE html>
            <html><head><title>Hello</title>
            <style>body { color: red }</style></head>
            <body>
              <h1>Welcome</h1>
              <p>Some   <b>bold</b>
                 text</p>
              <ul><li>one</li><li>two</li></ul>
              <script>alert("<p>no</p>")</script>
              <!-- <p>hidden</p> -->
            </body></html>"#;
        assert_eq!(
            html_text(html),
            vec!["Hello", "Welcome", "Some bold text", "• one", "• two"]
        );
    }

    #[test]
    fn keeps_preformatted_text() {
        let html = "<pre>a\n  b</pre><p>c</p>";
        assert_eq!(html_text(html), vec!["a", "  b", "c"]);
    }

    #[test]
    fn separates_table_cells() {
        let html = "<table><tr><td>a</td><td>b</td></tr><tr><th>c</th></tr></table>";
        assert_eq!(html_text(html), vec!["a  b", "c"]);
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(
            html_text("<p>caf&eacute; &mdash; &hellip; &lt;b&gt; &#233;&#xE9;</p>"),
            vec!["café — … <b> éé"]
        );
        assert_eq!(html_text("<p>AT&T &bogus; &</p>"), vec!["AT&T &bogus; &"]);
    }

    #[test]
    fn tolerates_stray_angle_brackets() {
        assert_eq!(
            html_text("<p>1 < 2 and 3 > 2</p><p>ok</p>"),
            vec!["1 < 2 and 3 > 2", "ok"]
        );
    }

    #[test]
    fn ignores_markup_inside_attributes() {
        assert_eq!(html_text(r#"<p title="a>b">x</p>"#), vec!["x"]);
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(html_text("just text"), vec!["just text"]);
        assert!(html_text("").is_empty());
    }
}
