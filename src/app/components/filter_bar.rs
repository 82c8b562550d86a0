/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedSender;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::app::{components, styles};
use crate::tui::Event;
use crate::util;

use super::Component;

/// Single-line editor for the response filter
#[derive(Default)]
pub struct FilterBar {
    has_focus: bool,
    area: Rect,
    event_tx: Option<UnboundedSender<Event>>,

    input: Input,
    // The filter last applied, restored when an edit is abandoned
    applied: String,
}

impl Component for FilterBar {
    fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    fn has_focus(&self) -> bool {
        self.has_focus
    }

    fn set_focus(&mut self, focus: bool) {
        self.has_focus = focus;
    }

    fn hit_test(&self, x: u16, y: u16) -> bool {
        util::is_in_rect(x, y, self.area)
    }

    async fn handle_mouse_event(&mut self, _mouse_event: MouseEvent) -> std::io::Result<()> {
        Ok(())
    }

    async fn handle_key_event(&mut self, key_event: KeyEvent) -> std::io::Result<()> {
        match key_event.code {
            KeyCode::Char('u') if key_event.modifiers == KeyModifiers::CONTROL => self.input.reset(),
            KeyCode::Enter => {
                self.applied = self.input.value().to_string();
                self.send(Event::FilterChanged(self.applied.clone()));
                self.send(Event::FilterClosed);
            }
            KeyCode::Esc => {
                // Abandon the edit
                self.set_filter(&self.applied.clone());
                self.send(Event::FilterClosed);
            }
            _ => {
                self.input.handle_event(&CrosstermEvent::Key(key_event));
            }
        }
        Ok(())
    }

    fn render(&mut self, area: Rect, frame: &mut Frame<'_>) {
        self.area = area;
        let block = components::component_block(self.has_focus).title("[Filter ($.path)]");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Keep the cursor in view
        let scroll = self.input.visual_scroll(inner.width.saturating_sub(1) as usize);
        let paragraph = if self.input.value().is_empty() && !self.has_focus {
            Paragraph::new("Tab to filter JSON responses").style(styles::FAINT_STYLE)
        } else {
            Paragraph::new(self.input.value()).scroll((0, scroll as u16))
        };
        frame.render_widget(paragraph, inner);

        if self.has_focus && inner.width > 0 && inner.height > 0 {
            let x = inner.x + self.input.visual_cursor().saturating_sub(scroll) as u16;
            frame.set_cursor(x.min(inner.right() - 1), inner.y);
        }
    }
}

impl FilterBar {
    pub fn set_event_tx(&mut self, event_tx: Option<UnboundedSender<Event>>) {
        self.event_tx = event_tx;
    }

    /// Replaces both the edited and applied filter
    pub fn set_filter(&mut self, filter: &str) {
        self.input = Input::new(filter.to_string());
        self.applied = filter.to_string();
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        self.input.value()
    }

    fn send(&self, event: Event) {
        if let Some(event_tx) = &self.event_tx {
            if event_tx.send(event).is_err() {
                log::warn!("Event channel closed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode::Char;
    use tokio::sync::mpsc;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn type_text(filter_bar: &mut FilterBar, text: &str) {
        for ch in text.chars() {
            filter_bar.handle_key_event(key(Char(ch))).await.unwrap();
        }
    }

    #[tokio::test]
    async fn edits_text_at_cursor() {
        let mut filter_bar = FilterBar::default();
        type_text(&mut filter_bar, "$.ab").await;
        filter_bar.handle_key_event(key(KeyCode::Left)).await.unwrap();
        filter_bar.handle_key_event(key(KeyCode::Backspace)).await.unwrap();
        type_text(&mut filter_bar, "é").await;
        assert_eq!(filter_bar.text(), "$.éb");
        assert_eq!(filter_bar.input.cursor(), 3);

        filter_bar.handle_key_event(key(KeyCode::Home)).await.unwrap();
        filter_bar.handle_key_event(key(KeyCode::Delete)).await.unwrap();
        assert_eq!(filter_bar.text(), ".éb");
    }

    #[tokio::test]
    async fn enter_applies_filter() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let mut filter_bar = FilterBar::default();
        filter_bar.set_event_tx(Some(event_tx));
        type_text(&mut filter_bar, "$.a").await;
        filter_bar.handle_key_event(key(KeyCode::Enter)).await.unwrap();

        assert!(matches!(event_rx.recv().await, Some(Event::FilterChanged(filter)) if filter == "$.a"));
        assert!(matches!(event_rx.recv().await, Some(Event::FilterClosed)));
    }

    #[tokio::test]
    async fn escape_restores_applied_filter() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let mut filter_bar = FilterBar::default();
        filter_bar.set_event_tx(Some(event_tx));
        filter_bar.set_filter("$.a");
        type_text(&mut filter_bar, ".b").await;
        filter_bar.handle_key_event(key(KeyCode::Esc)).await.unwrap();

        assert_eq!(filter_bar.text(), "$.a");
        assert!(matches!(event_rx.recv().await, Some(Event::FilterClosed)));
    }

    #[tokio::test]
    async fn control_u_clears_the_edit() {
        let mut filter_bar = FilterBar::default();
        filter_bar.set_filter("$.a");
        filter_bar
            .handle_key_event(KeyEvent::new(Char('u'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        assert_eq!(filter_bar.text(), "");
        type_text(&mut filter_bar, "$.b").await;
        assert_eq!(filter_bar.text(), "$.b");
    }
}
