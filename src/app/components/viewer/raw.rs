/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::response::EditorSettings;

use super::preview_pane::{self, PreviewPane};
use super::text_pane::{TextOptions, TextPane};

/// The decoded body as plain text
#[derive(Default)]
pub(super) struct Raw {
    text_pane: TextPane,
}

impl Raw {
    pub fn init(&mut self, text: &str, editor: &EditorSettings, malformed: bool) {
        self.text_pane.init_plain(
            preview_pane::pane_title("Raw", "", malformed),
            text,
            TextOptions {
                wrap: editor.editor_line_wrapping,
                key_map: editor.editor_key_map,
                ..TextOptions::default()
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
}

impl PreviewPane for Raw {
    fn render(&mut self, area: Rect, frame: &mut Frame<'_>, has_focus: bool) {
        self.text_pane.render(area, frame, has_focus);
    }
}
