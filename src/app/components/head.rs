/*
 * Copyright (c) 2024-2026 Paul Sobolik
 * Created 2024-03-17
 */

use chrono::{DateTime, Local};
use ratatui::prelude::{Line, Span};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};

use crate::app::styles;
use crate::response::{PreviewMode, ResponseViewModel};
use crate::util;

/// One-line summary of the response being viewed
#[derive(Default)]
pub struct Head {
    status_code: u16,
    url: String,
    content_type: String,
    bytes: u64,
    preview_mode: Option<PreviewMode>,
    loaded_at: Option<DateTime<Local>>,
}

impl Head {
    pub fn set_response(&mut self, response: Option<&ResponseViewModel>) {
        match response {
            Some(response) => {
                self.status_code = response.status_code;
                self.url = response.url.clone();
                self.content_type = response.content_type.clone();
                self.bytes = response.bytes;
                self.preview_mode = Some(response.preview_mode);
                self.loaded_at = Some(Local::now());
            }
            None => *self = Self::default(),
        }
    }

    pub fn set_preview_mode(&mut self, preview_mode: Option<PreviewMode>) {
        self.preview_mode = preview_mode;
    }

    fn summary(&self) -> String {
        let mut parts = vec![];
        if !self.content_type.is_empty() {
            parts.push(self.content_type.clone());
        }
        parts.push(util::size_string(self.bytes));
        if let Some(preview_mode) = self.preview_mode {
            parts.push(preview_mode.to_string());
        }
        if let Some(loaded_at) = self.loaded_at {
            parts.push(format!("{}", loaded_at.format("%Y-%m-%d %H:%M")));
        }
        parts.join(" - ")
    }

    pub fn render(&mut self, area: Rect, frame: &mut Frame) {
        if self.loaded_at.is_none() {
            frame.render_widget(Paragraph::new("[No response]"), area);
            return;
        }
        let status = if self.status_code == 0 {
            String::new()
        } else {
            format!("{} ", self.status_code)
        };
        let status_style = match self.status_code {
            0..=299 => styles::STATUS_OK_STYLE,
            300..=399 => styles::STATUS_REDIRECT_STYLE,
            _ => styles::STATUS_ERROR_STYLE,
        };
        let summary = format!(" [{}]", self.summary());

        // Trim the URL so that the whole line fits the width of the window
        let used = status.chars().count() + summary.chars().count() + 2;
        let url = util::clip_text(&self.url, (area.width as usize).saturating_sub(used).max(1));
        let line = Line::from(vec![
            Span::raw("["),
            Span::styled(status, status_style),
            Span::raw(url),
            Span::raw("]"),
            Span::raw(summary),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_response() {
        let mut response = ResponseViewModel::from_raw_body(b"{}", "application/json");
        response.preview_mode = PreviewMode::Source;
        let mut head = Head::default();
        head.set_response(Some(&response));
        assert!(head
            .summary()
            .starts_with("application/json - 2 B - Source - "));

        head.set_preview_mode(Some(PreviewMode::Raw));
        assert!(head.summary().contains(" - Raw - "));

        head.set_response(None);
        assert_eq!(head.summary(), "0 B");
    }
}
