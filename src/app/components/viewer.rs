/*
 * Copyright (c) 2024-2026 Paul Sobolik
 * Created 2024-03-18
 */

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};
use ratatui_image::picker::Picker;

use blocked::Blocked;
use empty::Empty;
use failure::Failure;
use self::image::Image;
use preview_pane::PreviewPane;
use raw::Raw;
use render_plan::RenderPlan;
use size_guard::SizeGuard;
use source::{Highlighter, Source};
use web::Web;

use crate::response::{EditorSettings, PreviewMode, ResponseViewModel};
use crate::session::Session;
use crate::util;

use super::Component;

mod blocked;
mod empty;
mod failure;
mod filter;
mod image;
mod message_pane;
mod preview_pane;
mod raw;
mod render_plan;
mod size_guard;
mod source;
mod text_pane;
mod web;

pub use size_guard::LARGE_RESPONSE_MB;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PreviewType {
    Failure,
    Blocked,
    Empty,
    Image,
    Web,
    Raw,
    Source,
}

/// Shows the body of a response, picking a pane from its content-type and preview mode
pub struct Viewer {
    has_focus: bool,
    area: Rect,

    response: Option<ResponseViewModel>,
    guard: SizeGuard,
    preview_type: Option<PreviewType>,
    highlighter: Highlighter,
    // How images are drawn, if the terminal can show them
    picker: Option<Picker>,

    blocked_pane: Blocked,
    empty_pane: Empty,
    failure_pane: Failure,
    image_pane: Image,
    raw_pane: Raw,
    source_pane: Source,
    web_pane: Web,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(LARGE_RESPONSE_MB)
    }
}

impl Component for Viewer {
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

    async fn handle_mouse_event(&mut self, mouse_event: MouseEvent) -> std::io::Result<()> {
        match self.preview_type {
            Some(PreviewType::Failure) => self.failure_pane.handle_mouse_event(mouse_event),
            Some(PreviewType::Web) => self.web_pane.handle_mouse_event(mouse_event),
            Some(PreviewType::Raw) => self.raw_pane.handle_mouse_event(mouse_event),
            Some(PreviewType::Source) => self.source_pane.handle_mouse_event(mouse_event),
            _ => Ok(()),
        }
    }

    async fn handle_key_event(&mut self, key_event: KeyEvent) -> std::io::Result<()> {
        match self.preview_type {
            Some(PreviewType::Failure) => self.failure_pane.handle_key_event(key_event),
            Some(PreviewType::Web) => self.web_pane.handle_key_event(key_event),
            Some(PreviewType::Raw) => self.raw_pane.handle_key_event(key_event),
            Some(PreviewType::Source) => self.source_pane.handle_key_event(key_event),
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self, area: Rect, frame: &mut Frame<'_>) {
        self.area = area;
        let has_focus = self.has_focus;

        if let Some(preview_type) = self.preview_type {
            match preview_type {
                PreviewType::Failure => self.failure_pane.render(area, frame, has_focus),
                PreviewType::Blocked => self.blocked_pane.render(area, frame, has_focus),
                PreviewType::Empty => self.empty_pane.render(area, frame, has_focus),
                PreviewType::Image => self.image_pane.render(area, frame, has_focus),
                PreviewType::Web => self.web_pane.render(area, frame, has_focus),
                PreviewType::Raw => self.raw_pane.render(area, frame, has_focus),
                PreviewType::Source => self.source_pane.render(area, frame, has_focus),
            }
        }
    }
}

impl Viewer {
    pub fn new(limit_mb: u64) -> Self {
        Self {
            has_focus: false,
            area: Rect::default(),
            response: None,
            guard: SizeGuard::new(limit_mb),
            preview_type: None,
            highlighter: Highlighter::default(),
            picker: None,
            blocked_pane: Blocked::default(),
            empty_pane: Empty,
            failure_pane: Failure::default(),
            image_pane: Image::default(),
            raw_pane: Raw::default(),
            source_pane: Source::default(),
            web_pane: Web::default(),
        }
    }

    /// Asks the terminal how it can draw images; call before entering raw mode
    pub fn detect_image_support(&mut self) {
        self.picker = self::image::terminal_picker();
    }

    pub fn response(&self) -> Option<&ResponseViewModel> {
        self.response.as_ref()
    }

    /// Shows a new response; the size guard is checked again
    pub fn load(&mut self, response: ResponseViewModel, session: &Session) {
        self.guard.evaluate(response.bytes, session);
        self.response = Some(response);
        self.refresh();
    }

    /// Shows an error instead of a response
    pub fn set_error(&mut self, message: &str) {
        self.clear();
        self.failure_pane
            .init_message(message, &EditorSettings::default());
        self.preview_type = Some(PreviewType::Failure);
    }

    pub fn is_blocking(&self) -> bool {
        self.preview_type == Some(PreviewType::Blocked)
    }

    /// Shows the current large response anyway
    pub fn dismiss_blocker(&mut self) {
        if self.is_blocking() {
            log::info!("Showing large response");
            self.guard.dismiss();
            self.refresh();
        }
    }

    /// Shows the current large response and stops blocking any others this session
    pub fn disable_blocker(&mut self, session: &mut Session) {
        session.set_always_show_large_responses();
        self.dismiss_blocker();
    }

    pub fn preview_mode(&self) -> Option<PreviewMode> {
        self.response.as_ref().map(|response| response.preview_mode)
    }

    pub fn set_preview_mode(&mut self, preview_mode: PreviewMode) {
        if let Some(response) = self.response.as_mut() {
            if response.preview_mode != preview_mode {
                response.preview_mode = preview_mode;
                self.refresh();
            }
        }
    }

    pub fn cycle_preview_mode(&mut self) {
        if let Some(preview_mode) = self.preview_mode() {
            self.set_preview_mode(preview_mode.next());
        }
    }

    pub fn toggle_wrap(&mut self) {
        if let Some(response) = self.response.as_mut() {
            let wrap = !response.editor.editor_line_wrapping;
            response.editor.editor_line_wrapping = wrap;
            self.failure_pane.set_wrap(wrap);
            self.raw_pane.set_wrap(wrap);
            self.source_pane.set_wrap(wrap);
        }
    }

    pub fn filter(&self) -> &str {
        self.response
            .as_ref()
            .map(|response| response.filter.as_str())
            .unwrap_or_default()
    }

    pub fn set_filter(&mut self, filter: &str) {
        if let Some(response) = self.response.as_mut() {
            if response.filter != filter {
                response.filter = filter.to_string();
                if self.preview_type == Some(PreviewType::Source) {
                    self.refresh();
                }
            }
        }
    }

    fn clear(&mut self) {
        self.preview_type = None;

        self.failure_pane.clear();
        self.raw_pane.clear();
        self.source_pane.clear();
        self.web_pane.clear();
    }

    // Rebuilds the panes from the current response
    fn refresh(&mut self) {
        self.clear();
        let Some(response) = self.response.as_ref() else {
            return;
        };
        let editor = response.editor.clone();
        match RenderPlan::build(response, &self.guard) {
            Ok(plan) => {
                log::debug!("Showing {} view", plan.name());
                let preview_type = self.show(plan, &editor);
                self.preview_type = Some(preview_type);
            }
            Err(error) => {
                log::warn!("Couldn't decode response body: {error}");
                self.set_error(&error.to_string());
            }
        }
    }

    fn show(&mut self, plan: RenderPlan, editor: &EditorSettings) -> PreviewType {
        match plan {
            RenderPlan::Error {
                url,
                status_code,
                text,
            } => {
                self.failure_pane.init(&url, status_code, &text, editor);
                PreviewType::Failure
            }
            RenderPlan::Blocked { limit_mb } => {
                self.blocked_pane.init(limit_mb);
                PreviewType::Blocked
            }
            RenderPlan::Empty => PreviewType::Empty,
            RenderPlan::Image {
                media_type,
                data_uri,
                bytes,
            } => {
                self.image_pane
                    .init(&media_type, &data_uri, &bytes, self.picker.as_mut());
                PreviewType::Image
            }
            RenderPlan::Web {
                html,
                content_type,
                malformed,
            } => {
                self.web_pane.init(&html, &content_type, editor, malformed);
                PreviewType::Web
            }
            RenderPlan::Raw { text, malformed } => {
                self.raw_pane.init(&text, editor, malformed);
                PreviewType::Raw
            }
            RenderPlan::Source {
                text,
                mode,
                filter,
                editor,
                malformed,
            } => {
                self.source_pane
                    .init(&self.highlighter, &text, &mode, &filter, &editor, malformed);
                PreviewType::Source
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    const LARGE: u64 = (LARGE_RESPONSE_MB + 1) * 1024 * 1024;

    fn response(body: &[u8], content_type: &str, preview_mode: PreviewMode) -> ResponseViewModel {
        let mut response = ResponseViewModel::from_raw_body(body, content_type);
        response.preview_mode = preview_mode;
        response
    }

    fn large_response() -> ResponseViewModel {
        let mut response = response(b"big", "text/plain", PreviewMode::Raw);
        response.bytes = LARGE;
        response
    }

    fn screen(viewer: &mut Viewer) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|frame| viewer.render(frame.size(), frame))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn blocks_large_responses_until_dismissed() {
        let session = Session::default();
        let mut viewer = Viewer::default();
        viewer.load(large_response(), &session);
        assert!(viewer.is_blocking());
        assert!(screen(&mut viewer)
            .contains("Response body over 5MB hidden to prevent unresponsiveness"));

        viewer.dismiss_blocker();
        assert_eq!(viewer.preview_type, Some(PreviewType::Raw));
        assert!(screen(&mut viewer).contains("big"));

        // A new response is checked again
        viewer.load(large_response(), &session);
        assert!(viewer.is_blocking());
    }

    #[test]
    fn always_show_lasts_for_the_session() {
        let mut session = Session::default();
        let mut viewer = Viewer::default();
        viewer.load(large_response(), &session);
        viewer.disable_blocker(&mut session);
        assert!(!viewer.is_blocking());
        assert!(session.always_show_large_responses());

        viewer.load(large_response(), &session);
        assert!(!viewer.is_blocking());

        let mut other_viewer = Viewer::default();
        other_viewer.load(large_response(), &session);
        assert!(!other_viewer.is_blocking());
    }

    #[test]
    fn shows_empty_notice_in_every_mode() {
        let session = Session::default();
        let mut viewer = Viewer::default();
        viewer.load(response(b"", "text/html", PreviewMode::Friendly), &session);
        for _ in 0..3 {
            assert_eq!(viewer.preview_type, Some(PreviewType::Empty));
            assert!(screen(&mut viewer).contains("No body returned in response"));
            viewer.cycle_preview_mode();
        }
    }

    #[test]
    fn switches_panes_with_preview_mode() {
        let session = Session::default();
        let mut viewer = Viewer::default();
        viewer.load(
            response(b"<p>Hello</p>", "text/html", PreviewMode::Friendly),
            &session,
        );
        assert_eq!(viewer.preview_type, Some(PreviewType::Web));
        let friendly = screen(&mut viewer);
        assert!(friendly.contains("Hello"));
        assert!(!friendly.contains("<p>"));

        viewer.set_preview_mode(PreviewMode::Raw);
        assert_eq!(viewer.preview_type, Some(PreviewType::Raw));
        assert!(screen(&mut viewer).contains("<p>Hello</p>"));

        viewer.set_preview_mode(PreviewMode::Source);
        assert_eq!(viewer.preview_type, Some(PreviewType::Source));
        assert!(screen(&mut viewer).contains("[Source - text/html]"));
    }

    #[test]
    fn shows_images_in_friendly_mode() {
        let session = Session::default();
        let mut viewer = Viewer::default();
        viewer.load(response(b"\x89PNG", "image/png", PreviewMode::Friendly), &session);
        assert_eq!(viewer.preview_type, Some(PreviewType::Image));
        assert!(screen(&mut viewer).contains("data:image/png;base64,iVBORw=="));
    }

    #[test]
    fn filters_json_in_source_mode() {
        let session = Session::default();
        let mut viewer = Viewer::default();
        viewer.load(
            response(br#"{"a":{"b":"found"}}"#, "text/plain", PreviewMode::Source),
            &session,
        );
        viewer.set_filter("$.a.b");
        assert_eq!(viewer.filter(), "$.a.b");
        let screen = screen(&mut viewer);
        assert!(screen.contains("\"found\""));
        assert!(screen.contains("$.a.b"));
    }

    #[test]
    fn shows_upstream_errors() {
        let session = Session::default();
        let mut viewer = Viewer::default();
        let mut failed = response(b"socket hang up", "", PreviewMode::Friendly);
        failed.error = true;
        failed.url = "http://localhost:9".to_string();
        viewer.load(failed, &session);
        assert_eq!(viewer.preview_type, Some(PreviewType::Failure));
        let screen = screen(&mut viewer);
        assert!(screen.contains("socket hang up"));
        assert!(screen.contains("http://localhost:9"));
    }

    #[test]
    fn shows_undecodable_bodies_as_errors() {
        let session = Session::default();
        let mut viewer = Viewer::default();
        let mut broken = response(b"", "text/plain", PreviewMode::Raw);
        broken.body = "@@@".to_string();
        viewer.load(broken, &session);
        assert_eq!(viewer.preview_type, Some(PreviewType::Failure));
        assert!(screen(&mut viewer).contains("not valid base64"));
    }
}
