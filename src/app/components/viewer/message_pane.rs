/*
 * Copyright (c) 2024-2026 Paul Sobolik
 * Created 2024-04-03
 */

use ratatui::layout::{Alignment, Rect};
use ratatui::prelude::Line;
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::components;

/// A pane that shows a short centered notice instead of the body
pub trait MessagePane {
    fn title(&self) -> String;
    fn lines(&self) -> Vec<Line<'static>>;

    fn render_message(&self, area: Rect, frame: &mut Frame<'_>, has_focus: bool) {
        let block = components::component_block(has_focus).title(self.title());
        frame.render_widget(block, area);
        if area.width < 4 || area.height < 4 {
            return;
        }
        frame.render_widget(
            Paragraph::new(self.lines())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false }),
            Rect::new(area.x + 2, area.y + 2, area.width - 4, area.height - 3),
        );
    }
}
