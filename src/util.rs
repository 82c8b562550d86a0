/*
 * Copyright (c) 2024-2026 Paul Sobolik
 * Created 2024-03-17
 */

use crossterm::{
    event::KeyCode::Char,
    event::{KeyCode, KeyEvent, KeyModifiers},
};
use number_prefix::NumberPrefix;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::response::KeyMap;

/// Shortens a string from the front so it fits in `width` characters
pub fn clip_text(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        let start = len - width + 1;
        format!("…{}", text.chars().skip(start).collect::<String>())
    } else {
        text.to_string()
    }
}

pub fn is_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

pub fn is_up_key(key_event: KeyEvent, key_map: KeyMap) -> bool {
    key_event.code == KeyCode::Up
        || match key_map {
            KeyMap::Vim => Char('k') == key_event.code && key_event.modifiers == KeyModifiers::NONE,
            _ => Char('p') == key_event.code && key_event.modifiers == KeyModifiers::CONTROL,
        }
}

pub fn is_down_key(key_event: KeyEvent, key_map: KeyMap) -> bool {
    key_event.code == KeyCode::Down
        || match key_map {
            KeyMap::Vim => Char('j') == key_event.code && key_event.modifiers == KeyModifiers::NONE,
            _ => Char('n') == key_event.code && key_event.modifiers == KeyModifiers::CONTROL,
        }
}

pub fn size_string(bytes: u64) -> String {
    // Not meant to be precise...
    match NumberPrefix::decimal(bytes as f64) {
        NumberPrefix::Standalone(bytes) => format!("{bytes} B"),
        NumberPrefix::Prefixed(prefix, n) => {
            format!("{:.0} {}B", n, prefix.symbol())
        }
    }
}

/// Returns the http(s) link that covers display column `column` of `line`, if any
pub fn find_link(line: &str, column: usize) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = next_link_start(&line[search_from..]) {
        let start = search_from + offset;
        let len = line[start..]
            .find(|ch: char| ch.is_whitespace() || matches!(ch, '"' | '\'' | '<' | '>' | '`'))
            .unwrap_or(line.len() - start);
        let end = start + len;
        let first = line[..start].width();
        let last = first + line[start..end].width();
        if (first..last).contains(&column) {
            return Some(line[start..end].trim_end_matches(&[',', '.', ')', ']', '}', ';'][..]));
        }
        search_from = end;
    }
    None
}

fn next_link_start(text: &str) -> Option<usize> {
    ["http://", "https://"]
        .iter()
        .filter_map(|scheme| text.find(scheme))
        .min()
}

/// Opens a link with whatever the desktop has registered for it
pub fn open_link(link: &str) -> std::io::Result<()> {
    log::info!("Opening {link}");
    open::that(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_from_the_front() {
        assert_eq!(clip_text("abcdef", 10), "abcdef");
        assert_eq!(clip_text("abcdef", 4), "…def");
    }

    #[test]
    fn key_maps_add_their_own_movement_keys() {
        let k = KeyEvent::new(Char('k'), KeyModifiers::NONE);
        let ctrl_p = KeyEvent::new(Char('p'), KeyModifiers::CONTROL);
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);

        assert!(is_up_key(up, KeyMap::Default));
        assert!(is_up_key(up, KeyMap::Vim));
        assert!(is_up_key(k, KeyMap::Vim));
        assert!(!is_up_key(k, KeyMap::Default));
        assert!(is_up_key(ctrl_p, KeyMap::Emacs));
        assert!(!is_up_key(ctrl_p, KeyMap::Vim));

        let j = KeyEvent::new(Char('j'), KeyModifiers::NONE);
        let ctrl_n = KeyEvent::new(Char('n'), KeyModifiers::CONTROL);
        assert!(is_down_key(j, KeyMap::Vim));
        assert!(is_down_key(ctrl_n, KeyMap::Sublime));
        assert!(!is_down_key(j, KeyMap::Emacs));
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(size_string(12), "12 B");
        assert_eq!(size_string(12_345), "12 kB");
        assert_eq!(size_string(6_000_000), "6 MB");
    }

    #[test]
    fn finds_link_under_column() {
        let line = r#"  "next": "https://example.com/page?2", see http://a.b."#;
        assert_eq!(find_link(line, 11), Some("https://example.com/page?2"));
        assert_eq!(find_link(line, 36), Some("https://example.com/page?2"));
        assert_eq!(find_link(line, 5), None);
        assert_eq!(find_link(line, 46), Some("http://a.b"));
        assert_eq!(find_link("no links here", 3), None);
    }

    #[test]
    fn counts_wide_characters_as_two_columns() {
        let line = "名前: http://x.io";
        assert_eq!(find_link(line, 4), None);
        assert_eq!(find_link(line, 6), Some("http://x.io"));
        assert_eq!(find_link(line, 16), Some("http://x.io"));
        assert_eq!(find_link(line, 17), None);
    }

    #[test]
    fn tests_rect_membership() {
        let rect = Rect::new(2, 2, 3, 3);
        assert!(is_in_rect(2, 2, rect));
        assert!(is_in_rect(4, 4, rect));
        assert!(!is_in_rect(5, 4, rect));
        assert!(!is_in_rect(1, 3, rect));
    }
}
