/*
 * Copyright (c) 2024-2026 Paul Sobolik
 * Created 2024-04-03
 */

use ratatui::layout::Rect;
use ratatui::Frame;

pub trait PreviewPane {
    fn render(&mut self, area: Rect, frame: &mut Frame<'_>, has_focus: bool);

    fn page_limit(total_size: usize, page_size: usize) -> usize {
        total_size.saturating_sub(page_size)
    }
}

/// Formats a pane title like "[Source - application/json]"
pub fn pane_title(label: &str, detail: &str, malformed: bool) -> String {
    let mut title = if detail.is_empty() {
        format!("[{label}")
    } else {
        format!("[{label} - {detail}")
    };
    if malformed {
        title.push_str(" - malformed text");
    }
    title.push(']');
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_titles() {
        assert_eq!(pane_title("Raw", "", false), "[Raw]");
        assert_eq!(
            pane_title("Source", "text/plain", true),
            "[Source - text/plain - malformed text]"
        );
    }
}
