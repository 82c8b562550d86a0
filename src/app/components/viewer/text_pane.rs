/*
 * Copyright (c) 2024-2026 Paul Sobolik
 * Created 2024-04-03
 */

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Margin, Rect};
use ratatui::prelude::{Line, Span, Style};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::components;
use crate::response::KeyMap;
use crate::util;

use super::preview_pane::PreviewPane;

/// How a text pane behaves
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct TextOptions {
    pub wrap: bool,
    pub key_map: KeyMap,
    // Clicking a link opens it
    pub links: bool,
    pub style: Style,
}

/// A scrolling, read-only text view shared by the text-based panes
#[derive(Default)]
pub(super) struct TextPane {
    area: Rect,
    inner_area: Rect,

    title: String,
    // Styled lines for display, plain lines for measuring and link lookup
    lines: Vec<Line<'static>>,
    plain: Vec<String>,
    options: TextOptions,

    widest_line_len: usize,
    horizontal_scrollbar_state: ScrollbarState,
    vertical_scrollbar_state: ScrollbarState,
    horizontal_offset: usize,
    vertical_offset: usize,
}

impl TextPane {
    pub fn init(
        &mut self,
        title: String,
        lines: Vec<Line<'static>>,
        plain: Vec<String>,
        options: TextOptions,
    ) {
        self.title = title;
        self.widest_line_len = Self::widest_line_length(&plain);
        self.lines = lines;
        self.plain = plain;
        self.options = options;
        self.horizontal_offset = 0;
        self.vertical_offset = 0;

        self.set_horizontal_scrollbar_state();
        self.set_vertical_scrollbar_state();
    }

    /// Shows plain text, one line per source line
    pub fn init_plain(&mut self, title: String, text: &str, options: TextOptions) {
        let plain: Vec<String> = text.lines().map(str::to_string).collect();
        let lines = plain
            .iter()
            .map(|line| Line::styled(line.clone(), options.style))
            .collect();
        self.init(title, lines, plain, options);
    }

    pub fn clear(&mut self) {
        self.init(String::new(), vec![], vec![], TextOptions::default());
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn line_count(&self) -> usize {
        self.plain.len()
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        self.options.wrap = wrap;
        self.horizontal_offset = 0;
        self.set_horizontal_scrollbar_state();
    }

    pub fn set_area(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        self.area = area;
        // Give the content some horizontal padding
        self.inner_area = area.inner(&Margin {
            vertical: 1,
            horizontal: 2,
        });
        self.vertical_offset = self.vertical_offset.min(self.vertical_page_limit());
        self.horizontal_offset = self.horizontal_offset.min(self.horizontal_page_limit());
        self.set_horizontal_scrollbar_state();
        self.set_vertical_scrollbar_state();
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if util::is_up_key(key_event, self.options.key_map) {
            self.scroll_up();
        } else if util::is_down_key(key_event, self.options.key_map) {
            self.scroll_down();
        } else {
            match key_event.code {
                KeyCode::Home => {
                    if self.can_scroll_vertically() && key_event.modifiers == KeyModifiers::CONTROL
                    {
                        // Scroll to top
                        self.vertical_offset = 0;
                        self.vertical_scrollbar_state.first();
                    } else if self.can_scroll_horizontally()
                        && key_event.modifiers != KeyModifiers::CONTROL
                    {
                        // Go to beginning of line
                        self.horizontal_offset = 0;
                        self.horizontal_scrollbar_state.first();
                    }
                }
                KeyCode::End => {
                    if self.can_scroll_vertically() && key_event.modifiers == KeyModifiers::CONTROL
                    {
                        // Scroll to bottom
                        self.vertical_offset = self.vertical_page_limit();
                        self.vertical_scrollbar_state.last();
                    } else if self.can_scroll_horizontally()
                        && key_event.modifiers != KeyModifiers::CONTROL
                    {
                        // Scroll to end of line
                        self.horizontal_offset = self.horizontal_page_limit();
                        self.horizontal_scrollbar_state.last();
                    }
                }
                KeyCode::PageUp => {
                    if self.can_scroll_vertically() {
                        let frame_height = self.inner_area.height as usize;
                        self.vertical_offset = self.vertical_offset.saturating_sub(frame_height);
                        self.vertical_scrollbar_state =
                            self.vertical_scrollbar_state.position(self.vertical_offset);
                    }
                }
                KeyCode::PageDown => {
                    if self.can_scroll_vertically() {
                        let frame_height = self.inner_area.height as usize;
                        self.vertical_offset =
                            (self.vertical_offset + frame_height).min(self.vertical_page_limit());
                        self.vertical_scrollbar_state =
                            self.vertical_scrollbar_state.position(self.vertical_offset);
                    }
                }
                KeyCode::Left => {
                    if self.can_scroll_horizontally() && self.horizontal_offset > 0 {
                        self.horizontal_offset -= 1;
                        self.horizontal_scrollbar_state.prev();
                    }
                }
                KeyCode::Right => {
                    if self.can_scroll_horizontally()
                        && self.horizontal_offset < self.horizontal_page_limit()
                    {
                        self.horizontal_offset += 1;
                        self.horizontal_scrollbar_state.next();
                    }
                }
                _ => {}
            }
        }
    }

    pub fn handle_mouse_event(&mut self, mouse_event: MouseEvent) -> std::io::Result<()> {
        match mouse_event.kind {
            MouseEventKind::ScrollUp => self.scroll_up(),
            MouseEventKind::ScrollDown => self.scroll_down(),
            MouseEventKind::Down(MouseButton::Left) if self.options.links => {
                if let Some(link) = self.link_at(mouse_event.column, mouse_event.row) {
                    util::open_link(link)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Returns the link displayed at a screen position
    pub fn link_at(&self, x: u16, y: u16) -> Option<&str> {
        if self.options.wrap || !util::is_in_rect(x, y, self.inner_area) {
            return None;
        }
        let line = self.vertical_offset + (y - self.inner_area.y) as usize;
        let column = self.horizontal_offset + (x - self.inner_area.x) as usize;
        self.plain
            .get(line)
            .and_then(|text| util::find_link(text, column))
    }

    fn scroll_up(&mut self) {
        if self.can_scroll_vertically() && self.vertical_offset > 0 {
            self.vertical_offset -= 1;
            self.vertical_scrollbar_state.prev();
        }
    }

    fn scroll_down(&mut self) {
        if self.can_scroll_vertically() && self.vertical_offset < self.vertical_page_limit() {
            self.vertical_offset += 1;
            self.vertical_scrollbar_state.next();
        }
    }

    fn can_scroll_horizontally(&self) -> bool {
        !self.options.wrap && self.widest_line_len > self.inner_area.width as usize
    }

    fn can_scroll_vertically(&self) -> bool {
        self.plain.len() > self.inner_area.height as usize
    }

    fn vertical_page_limit(&self) -> usize {
        <Self as PreviewPane>::page_limit(self.plain.len(), self.inner_area.height as usize)
    }

    fn horizontal_page_limit(&self) -> usize {
        <Self as PreviewPane>::page_limit(self.widest_line_len, self.inner_area.width as usize)
    }

    fn set_horizontal_scrollbar_state(&mut self) {
        let frame_width = self.inner_area.width as usize;
        let line_width = if self.options.wrap || self.widest_line_len <= frame_width {
            0
        } else {
            self.widest_line_len
        };
        self.horizontal_scrollbar_state = ScrollbarState::new(line_width)
            .position(self.horizontal_offset)
            .viewport_content_length(frame_width);
    }

    fn set_vertical_scrollbar_state(&mut self) {
        let height = self.inner_area.height as usize;
        let len = if self.plain.len() <= height {
            0
        } else {
            self.plain.len()
        };
        self.vertical_scrollbar_state = ScrollbarState::new(len)
            .position(self.vertical_offset)
            .viewport_content_length(height);
    }

    fn widest_line_length(lines: &[String]) -> usize {
        lines
            .iter()
            .map(|line| line.width())
            .max()
            .unwrap_or_default()
    }
}

/// Cuts a line down to the display columns `start..start + width`
fn visible_columns(line: &Line<'static>, start: usize, width: usize) -> Line<'static> {
    let end = start + width;
    let mut spans = vec![];
    let mut column = 0;
    for span in &line.spans {
        if column >= end {
            break;
        }
        let mut content = String::new();
        for ch in span.content.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if column >= start && column + ch_width <= end {
                content.push(ch);
            } else if column < start && column + ch_width > start {
                // A wide character cut by the left edge
                content.push(' ');
            }
            column += ch_width;
            if column >= end {
                break;
            }
        }
        if !content.is_empty() {
            spans.push(Span::styled(content, span.style));
        }
    }
    let mut visible = Line::from(spans);
    visible.style = line.style;
    visible.alignment = line.alignment;
    visible
}

impl PreviewPane for TextPane {
    fn render(&mut self, area: Rect, frame: &mut Frame<'_>, has_focus: bool) {
        self.set_area(area);

        let block = components::component_block(has_focus).title(self.title.clone());
        // Only the lines on screen go to the paragraph, so it never scrolls vertically
        let visible = self
            .lines
            .iter()
            .skip(self.vertical_offset)
            .take(self.inner_area.height as usize);
        let paragraph = if self.options.wrap {
            Paragraph::new(visible.cloned().collect::<Vec<_>>()).wrap(Wrap { trim: false })
        } else {
            let width = self.inner_area.width as usize;
            Paragraph::new(
                visible
                    .map(|line| visible_columns(line, self.horizontal_offset, width))
                    .collect::<Vec<_>>(),
            )
        };
        frame.render_widget(block, self.area);
        frame.render_widget(paragraph, self.inner_area);

        let vertical_scrollbar = Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight);
        frame.render_stateful_widget(
            vertical_scrollbar,
            self.area.inner(&Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut self.vertical_scrollbar_state,
        );

        let horizontal_scrollbar =
            Scrollbar::default().orientation(ScrollbarOrientation::HorizontalBottom);
        frame.render_stateful_widget(
            horizontal_scrollbar,
            self.area.inner(&Margin {
                vertical: 0,
                horizontal: 1,
            }),
            &mut self.horizontal_scrollbar_state,
        );
    }
}
