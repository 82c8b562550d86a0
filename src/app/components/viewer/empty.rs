/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use ratatui::layout::Rect;
use ratatui::prelude::Line;
use ratatui::Frame;

use crate::app::styles;

use super::message_pane::MessagePane;
use super::preview_pane::PreviewPane;

#[derive(Default)]
pub(super) struct Empty;

impl MessagePane for Empty {
    fn title(&self) -> String {
        "[Empty]".to_string()
    }

    fn lines(&self) -> Vec<Line<'static>> {
        vec![Line::styled(
            "No body returned in response",
            styles::FAINT_STYLE,
        )]
    }
}

impl PreviewPane for Empty {
    fn render(&mut self, area: Rect, frame: &mut Frame<'_>, has_focus: bool) {
        self.render_message(area, frame, has_focus);
    }
}
