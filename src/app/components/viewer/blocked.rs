/*
 * Copyright (c) 2024-2026 Paul Sobolik
 * Created 2024-04-02
 */

use ratatui::layout::Rect;
use ratatui::prelude::{Line, Span};
use ratatui::Frame;

use crate::app::styles;

use super::message_pane::MessagePane;
use super::preview_pane::PreviewPane;

/// Shown instead of a response that is over the size limit
#[derive(Default)]
pub(super) struct Blocked {
    limit_mb: u64,
}

impl Blocked {
    pub fn init(&mut self, limit_mb: u64) {
        self.limit_mb = limit_mb;
    }
}

impl MessagePane for Blocked {
    fn title(&self) -> String {
        "[Large Response]".to_string()
    }

    fn lines(&self) -> Vec<Line<'static>> {
        vec![
            Line::styled(
                format!(
                    " Response body over {}MB hidden to prevent unresponsiveness ",
                    self.limit_mb
                ),
                styles::BLOCKED_STYLE,
            ),
            Line::default(),
            Line::from(vec![
                Span::styled("[s]", styles::ACTION_STYLE),
                Span::raw(" Show Response    "),
                Span::styled("[a]", styles::ACTION_STYLE),
                Span::styled(" Always Show", styles::FAINT_STYLE),
            ]),
        ]
    }
}

impl PreviewPane for Blocked {
    fn render(&mut self, area: Rect, frame: &mut Frame<'_>, has_focus: bool) {
        self.render_message(area, frame, has_focus);
    }
}
