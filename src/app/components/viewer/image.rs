/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use ratatui::layout::Rect;
use ratatui::prelude::Line;
use ratatui::Frame;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::StatefulImage;

use crate::app::{components, styles};
use crate::util;

use super::message_pane::MessagePane;
use super::preview_pane::PreviewPane;

/// Finds out how the terminal can draw images
pub fn terminal_picker() -> Option<Picker> {
    match Picker::from_termios() {
        Ok(mut picker) => {
            picker.guess_protocol();
            log::info!("Images will be drawn in the terminal");
            Some(picker)
        }
        Err(error) => {
            log::info!("Images will be described, not drawn: {error:?}");
            None
        }
    }
}

/// Draws an image body, or describes it when it can't be drawn
#[derive(Default)]
pub(super) struct Image {
    media_type: String,
    data_uri: String,
    size: usize,
    dimensions: Option<(u32, u32)>,
    decode_error: Option<String>,
    protocol: Option<Box<dyn StatefulProtocol>>,
}

impl Image {
    pub fn init(&mut self, media_type: &str, data_uri: &str, bytes: &[u8], picker: Option<&mut Picker>) {
        self.media_type = media_type.to_string();
        self.data_uri = data_uri.to_string();
        self.size = bytes.len();
        self.dimensions = None;
        self.decode_error = None;
        self.protocol = None;

        match image::load_from_memory(bytes) {
            Ok(picture) => {
                self.dimensions = Some((picture.width(), picture.height()));
                if let Some(picker) = picker {
                    self.protocol = Some(picker.new_resize_protocol(picture));
                }
            }
            Err(error) => {
                log::warn!("Couldn't decode {media_type} image: {error}");
                self.decode_error = Some(error.to_string());
            }
        }
    }

    fn clipped_uri(&self) -> String {
        const MAX_URI_LEN: usize = 60;
        if self.data_uri.chars().count() > MAX_URI_LEN {
            let head: String = self.data_uri.chars().take(MAX_URI_LEN - 1).collect();
            format!("{head}…")
        } else {
            self.data_uri.clone()
        }
    }

    fn description(&self) -> String {
        match self.dimensions {
            Some((width, height)) => format!(
                " {} image, {width} × {height}, {} ",
                self.media_type,
                util::size_string(self.size as u64)
            ),
            None => format!(" {} image, {} ", self.media_type, util::size_string(self.size as u64)),
        }
    }
}

impl MessagePane for Image {
    fn title(&self) -> String {
        match self.dimensions {
            Some((width, height)) => format!("[Image - {} - {width} × {height}]", self.media_type),
            None => format!("[Image - {}]", self.media_type),
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::styled(self.description(), styles::IMAGE_STYLE)];
        if let Some(error) = &self.decode_error {
            lines.push(Line::styled(format!("Can't display: {error}"), styles::ERROR_STYLE));
        }
        lines.push(Line::default());
        lines.push(Line::styled(self.clipped_uri(), styles::FAINT_STYLE));
        lines
    }
}

impl PreviewPane for Image {
    fn render(&mut self, area: Rect, frame: &mut Frame<'_>, has_focus: bool) {
        let title = self.title();
        match self.protocol.as_mut() {
            Some(protocol) => {
                let block = components::component_block(has_focus).title(title);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                frame.render_stateful_widget(StatefulImage::new(None), inner, protocol);
            }
            None => self.render_message(area, frame, has_focus),
        }
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;

    use super::*;

    // A 1 × 1 PNG
    const PIXEL_PNG: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn text(lines: Vec<Line<'static>>) -> String {
        lines
            .iter()
            .map(|line| line.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn clips_long_data_uris() {
        let mut image = Image::default();
        let uri = format!("data:image/png;base64,{}", "A".repeat(100));
        image.init("image/png", &uri, &[0; 75], None);
        let clipped = image.clipped_uri();
        assert_eq!(clipped.chars().count(), 60);
        assert!(clipped.starts_with("data:image/png;base64,AAA"));
        assert!(clipped.ends_with('…'));
        assert_eq!(image.title(), "[Image - image/png]");
    }

    #[test]
    fn describes_images_when_there_is_no_picker() {
        let bytes = BASE64.decode(PIXEL_PNG).unwrap();
        let uri = format!("data:image/png;base64,{PIXEL_PNG}");
        let mut image = Image::default();
        image.init("image/png", &uri, &bytes, None);

        assert!(image.protocol.is_none());
        assert_eq!(image.dimensions, Some((1, 1)));
        assert_eq!(image.title(), "[Image - image/png - 1 × 1]");
        let text = text(image.lines());
        assert!(text.contains("image/png image, 1 × 1"));
        assert!(!text.contains("Can't display"));
    }

    #[test]
    fn describes_bytes_that_do_not_decode() {
        let mut image = Image::default();
        image.init("image/png", "data:image/png;base64,iVBO", b"\x89PNG", None);

        assert!(image.protocol.is_none());
        assert_eq!(image.dimensions, None);
        assert!(text(image.lines()).contains("Can't display"));
    }
}
