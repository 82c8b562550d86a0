/*
 * Copyright (c) 2024-2026 Paul Sobolik
 * Created 2024-03-17
 */

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use ratatui::widgets::{Block, BorderType, Padding};
use ratatui::Frame;

use crate::app::styles;

pub(crate) mod filter_bar;
pub(crate) mod head;
pub(crate) mod viewer;

pub(crate) trait Component {
    fn set_area(&mut self, area: Rect);
    fn has_focus(&self) -> bool;
    fn set_focus(&mut self, focus: bool);
    fn hit_test(&self, x: u16, y: u16) -> bool;
    async fn handle_mouse_event(&mut self, mouse_event: MouseEvent) -> std::io::Result<()>;
    async fn handle_key_event(&mut self, key_event: KeyEvent) -> std::io::Result<()>;
    fn render(&mut self, area: Rect, frame: &mut Frame<'_>);
}

/// Returns a ratatui::widgets::Block styled according to whether or not the component has focus
pub(crate) fn component_block<'a>(has_focus: bool) -> Block<'a> {
    if has_focus {
        Block::bordered()
            .border_type(BorderType::Double)
            .border_style(styles::FOCUSED_BLOCK_STYLE)
            .padding(Padding::horizontal(1))
    } else {
        Block::bordered().padding(Padding::horizontal(1))
    }
}
