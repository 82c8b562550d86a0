/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use ratatui::prelude::Line;
use ratatui::Frame;

use crate::app::styles;
use crate::response::EditorSettings;

use super::preview_pane::{self, PreviewPane};
use super::text_pane::{TextOptions, TextPane};

/// Shows a failed request, or a response that couldn't be read
#[derive(Default)]
pub(super) struct Failure {
    text_pane: TextPane,
}

impl Failure {
    /// A request that failed upstream
    pub fn init(&mut self, url: &str, status_code: u16, text: &str, editor: &EditorSettings) {
        let mut plain = vec![];
        if !url.is_empty() {
            plain.push(url.to_string());
        }
        if status_code != 0 {
            plain.push(format!("Status {status_code}"));
        }
        if !plain.is_empty() {
            plain.push(String::new());
        }
        plain.extend(text.lines().map(str::to_string));
        self.set_lines("Error", plain, editor);
    }

    /// A response whose body couldn't be decoded
    pub fn init_message(&mut self, message: &str, editor: &EditorSettings) {
        self.set_lines("Unreadable Response", vec![message.to_string()], editor);
    }

    fn set_lines(&mut self, label: &str, plain: Vec<String>, editor: &EditorSettings) {
        let lines = plain
            .iter()
            .map(|line| Line::styled(line.clone(), styles::ERROR_STYLE))
            .collect();
        self.text_pane.init(
            preview_pane::pane_title(label, "", false),
            lines,
            plain,
            TextOptions {
                wrap: editor.editor_line_wrapping,
                key_map: editor.editor_key_map,
                links: true,
                style: styles::ERROR_STYLE,
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
    pub fn line_count(&self) -> usize {
        self.text_pane.line_count()
    }
}

impl PreviewPane for Failure {
    fn render(&mut self, area: Rect, frame: &mut Frame<'_>, has_focus: bool) {
        self.text_pane.render(area, frame, has_focus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_url_and_status_before_the_error() {
        let mut failure = Failure::default();
        let editor = EditorSettings::default();
        failure.init("http://localhost", 502, "bad gateway\nupstream down", &editor);
        assert_eq!(failure.line_count(), 5);

        failure.init("", 0, "ECONNREFUSED", &editor);
        assert_eq!(failure.line_count(), 1);
    }
}
