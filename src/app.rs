/*
 * Copyright (c) 2023-2026 Paul Sobolik
 * Created 2024-03-18
 */
use std::path::PathBuf;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::KeyCode::Char,
    event::{KeyCode, KeyEvent, KeyModifiers},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::components::{filter_bar::FilterBar, head::Head, viewer::Viewer, Component};
use crate::errors::ViewerError;
use crate::options::Options;
use crate::response::{KeyMap, PreviewMode, ResponseViewModel};
use crate::session::Session;
use crate::tui::Event;

pub use components::viewer::LARGE_RESPONSE_MB;

mod components;
mod styles;

struct FrameSet {
    head: Rect,
    viewer: Rect,
    filter_bar: Rect,
}

/// Where the response is read from, so it can be read again
struct ResponseSource {
    path: PathBuf,
    raw: bool,
    content_type: String,
}

/// Preferences from the command line that win over the ones saved with the response
#[derive(Default)]
struct Overrides {
    mode: Option<PreviewMode>,
    key_map: Option<KeyMap>,
    wrap: bool,
    indent: Option<usize>,
}

impl Overrides {
    fn apply(&self, response: &mut ResponseViewModel) {
        if let Some(mode) = self.mode {
            response.preview_mode = mode;
        }
        if let Some(key_map) = self.key_map {
            response.editor.editor_key_map = key_map;
        }
        if self.wrap {
            response.editor.editor_line_wrapping = true;
        }
        if let Some(indent) = self.indent {
            response.editor.editor_indent_size = indent;
        }
    }
}

pub struct App {
    pub should_quit: bool,
    error: Option<String>,
    session: Session,
    source: ResponseSource,
    overrides: Overrides,

    // Components
    head: Head,
    viewer: Viewer,
    filter_bar: FilterBar,
}

impl App {
    pub fn new(options: &Options) -> Self {
        let mut session = Session::default();
        if options.always_show_large {
            session.set_always_show_large_responses();
        }
        Self {
            should_quit: false,
            error: None,
            session,
            source: ResponseSource {
                path: options.response.clone(),
                raw: options.raw,
                content_type: options.content_type.clone(),
            },
            overrides: Overrides {
                mode: options.mode,
                key_map: options.key_map,
                wrap: options.wrap,
                indent: options.indent,
            },
            head: Head::default(),
            viewer: Viewer::new(options.large_response_mb),
            filter_bar: FilterBar::default(),
        }
    }

    pub fn set_event_tx(&mut self, event_tx: Option<UnboundedSender<Event>>) {
        self.filter_bar.set_event_tx(event_tx);
    }

    pub fn detect_image_support(&mut self) {
        self.viewer.detect_image_support();
    }

    /// Reads the response file and shows it
    pub async fn load_response(&mut self) {
        match self.read_response().await {
            Ok(mut response) => {
                self.overrides.apply(&mut response);
                self.viewer.load(response, &self.session);
                self.head.set_response(self.viewer.response());
                self.filter_bar.set_filter(self.viewer.filter());
            }
            Err(error) => {
                let message = format!("{}: {error}", self.source.path.display());
                log::error!("Couldn't load {message}");
                self.viewer.set_error(&message);
                self.head.set_response(None);
                self.error = Some(message);
            }
        }
    }

    async fn read_response(&self) -> Result<ResponseViewModel, ViewerError> {
        if self.source.raw {
            ResponseViewModel::load_raw(&self.source.path, &self.source.content_type).await
        } else {
            ResponseViewModel::load(&self.source.path).await
        }
    }

    pub async fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event).await,
            Event::Init(width, height) => self.handle_init_event(width, height),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event).await,
            Event::Resize(width, height) => self.handle_resize_event(width, height),
            Event::FilterChanged(filter) => self.viewer.set_filter(&filter),
            Event::FilterClosed => self.focus_viewer(),
            _ => {}
        }
    }

    fn handle_init_event(&mut self, width: u16, height: u16) {
        self.handle_resize_event(width, height);
        self.viewer.set_focus(true);
        self.filter_bar.set_focus(false);
    }

    fn maybe_clear_error(&mut self) -> bool {
        // If there's an error showing, clear it.
        self.error.take().is_some()
    }

    async fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        // If there's an error showing, any mouse down will clear it and quit processing the event.
        // Any other mouse event will be ignored.
        if self.error.is_some() {
            if let MouseEventKind::Down(..) = mouse_event.kind {
                self.maybe_clear_error();
            }
            return;
        }

        // A left mouse click may change focused pane, but won't quit processing the event.
        if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
            if self.viewer.hit_test(mouse_event.column, mouse_event.row) {
                self.focus_viewer();
            } else if self.filter_bar.hit_test(mouse_event.column, mouse_event.row) {
                self.focus_filter_bar();
            }
        }
        // The wheel scrolls the viewer wherever it has focus.
        let result = if self.viewer.hit_test(mouse_event.column, mouse_event.row) {
            self.viewer.handle_mouse_event(mouse_event).await
        } else if self.filter_bar.has_focus() {
            self.filter_bar.handle_mouse_event(mouse_event).await
        } else {
            Ok(())
        };
        if let Err(error) = result {
            self.error = Some(error.to_string());
        }
    }

    // Handle a key event, or send it to the focused pane
    async fn handle_key_event(&mut self, key_event: KeyEvent) {
        // Ctrl+C closes the app, regardless of state
        if Char('c') == key_event.code && key_event.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }
        // If there is an error showing, clear it and don't process the event.
        if self.maybe_clear_error() {
            return;
        }
        if key_event.code == KeyCode::Tab {
            self.toggle_focus();
            return;
        }
        if self.filter_bar.has_focus() {
            if let Err(error) = self.filter_bar.handle_key_event(key_event).await {
                self.error = Some(error.to_string());
            }
            return;
        }
        match key_event.code {
            KeyCode::Esc | Char('q') => self.quit(),
            Char('/') => self.focus_filter_bar(),
            Char('1') => self.set_preview_mode(PreviewMode::Friendly),
            Char('2') => self.set_preview_mode(PreviewMode::Raw),
            Char('3') => self.set_preview_mode(PreviewMode::Source),
            Char('m') => {
                self.viewer.cycle_preview_mode();
                self.head.set_preview_mode(self.viewer.preview_mode());
            }
            Char('w') => self.viewer.toggle_wrap(),
            Char('r') => self.load_response().await,
            Char('s') if self.viewer.is_blocking() => self.viewer.dismiss_blocker(),
            Char('a') if self.viewer.is_blocking() => self.viewer.disable_blocker(&mut self.session),
            _ => {
                if let Err(error) = self.viewer.handle_key_event(key_event).await {
                    self.error = Some(error.to_string());
                }
            }
        }
    }

    fn handle_resize_event(&mut self, width: u16, height: u16) {
        let area = Rect::new(0, 0, width, height);
        let frame_set = Self::calculate_frames(area);
        self.viewer.set_area(frame_set.viewer);
        self.filter_bar.set_area(frame_set.filter_bar);
    }

    fn quit(&mut self) {
        self.should_quit = true;
    }

    fn set_preview_mode(&mut self, preview_mode: PreviewMode) {
        self.viewer.set_preview_mode(preview_mode);
        self.head.set_preview_mode(self.viewer.preview_mode());
    }

    fn toggle_focus(&mut self) {
        if self.viewer.has_focus() {
            self.focus_filter_bar()
        } else {
            self.focus_viewer()
        }
    }

    fn focus_viewer(&mut self) {
        if !self.viewer.has_focus() {
            self.viewer.set_focus(true);
            self.filter_bar.set_focus(false);
        }
    }

    fn focus_filter_bar(&mut self) {
        if !self.filter_bar.has_focus() {
            self.viewer.set_focus(false);
            self.filter_bar.set_focus(true);
        }
    }

    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let area = frame.size();
        let frame_set = Self::calculate_frames(area);

        self.head.render(frame_set.head, frame);
        self.viewer.render(frame_set.viewer, frame);
        self.filter_bar.render(frame_set.filter_bar, frame);
        if let Some(error) = &self.error {
            Self::render_error_popup(error, frame, area);
        }
    }

    fn render_error_popup(error: &str, frame: &mut Frame, frame_size: Rect) {
        let text = Paragraph::new(Text::from(error))
            .style(styles::ERROR_STYLE)
            .wrap(Wrap { trim: true });
        let block = Block::bordered().title("Error");

        let error_len = (error.chars().count() as u16).min(frame_size.width.saturating_sub(4));
        let area = Self::centered_rect(error_len + 4, 3, frame_size);
        let error_area = Self::centered_rect(error_len, 1, area);

        frame.render_widget(Clear, area); // This clears the background underneath the popup
        frame.render_widget(block, area);
        frame.render_widget(text, error_area);
    }

    fn centered_rect(width: u16, height: u16, rect: Rect) -> Rect {
        let vert_margin = rect.height.saturating_sub(height) / 2;
        let horiz_margin = rect.width.saturating_sub(width) / 2;
        let vert_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(vert_margin),
                Constraint::Length(height),
                Constraint::Length(vert_margin),
            ])
            .split(rect);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(horiz_margin),
                Constraint::Length(width),
                Constraint::Length(horiz_margin),
            ])
            .split(vert_layout[1])[1]
    }

    fn calculate_frames(frame_rect: Rect) -> FrameSet {
        let root = Layout::default()
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(frame_rect);

        FrameSet {
            head: root[0],
            viewer: root[1],
            filter_bar: root[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    const LARGE: usize = 2 * 1024 * 1024;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    async fn app_for(args: &[&str], body: &[u8]) -> (App, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body).unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let mut argv = vec!["rrv", path.as_str()];
        argv.extend_from_slice(args);
        let options = Options::try_parse_from(argv).unwrap();
        let mut app = App::new(&options);
        app.load_response().await;
        app.handle_event(Event::Init(80, 24)).await;
        (app, file)
    }

    #[tokio::test]
    async fn applies_command_line_overrides() {
        let (app, _file) = app_for(
            &["--raw", "--content-type", "text/html", "--mode", "raw", "--wrap"],
            b"<p>hi</p>",
        )
        .await;
        let response = app.viewer.response().unwrap();
        assert_eq!(response.preview_mode, PreviewMode::Raw);
        assert!(response.editor.editor_line_wrapping);
        assert_eq!(response.content_type, "text/html");
    }

    #[tokio::test]
    async fn switches_preview_modes_with_keys() {
        let (mut app, _file) = app_for(&["--raw"], b"text").await;
        app.handle_event(key(Char('3'))).await;
        assert_eq!(app.viewer.preview_mode(), Some(PreviewMode::Source));
        app.handle_event(key(Char('m'))).await;
        assert_eq!(app.viewer.preview_mode(), Some(PreviewMode::Friendly));
        app.handle_event(key(Char('2'))).await;
        assert_eq!(app.viewer.preview_mode(), Some(PreviewMode::Raw));
    }

    #[tokio::test]
    async fn size_guard_keys_act_on_blocked_responses() {
        let body = vec![b'x'; LARGE];
        let (mut app, _file) = app_for(&["--raw", "--large-response-mb", "1"], &body).await;
        assert!(app.viewer.is_blocking());
        app.handle_event(key(Char('s'))).await;
        assert!(!app.viewer.is_blocking());
        assert!(!app.session.always_show_large_responses());

        // Reloading checks the size again
        app.handle_event(key(Char('r'))).await;
        assert!(app.viewer.is_blocking());
        app.handle_event(key(Char('a'))).await;
        assert!(!app.viewer.is_blocking());
        assert!(app.session.always_show_large_responses());

        app.handle_event(key(Char('r'))).await;
        assert!(!app.viewer.is_blocking());
    }

    #[tokio::test]
    async fn always_show_option_disables_the_guard() {
        let body = vec![b'x'; LARGE];
        let (app, _file) = app_for(
            &["--raw", "--large-response-mb", "1", "--always-show-large"],
            &body,
        )
        .await;
        assert!(!app.viewer.is_blocking());
    }

    #[tokio::test]
    async fn filter_events_update_the_viewer() {
        let (mut app, _file) = app_for(&["--raw", "--mode", "source"], br#"{"a":1}"#).await;
        app.handle_event(key(KeyCode::Tab)).await;
        assert!(app.filter_bar.has_focus());
        app.handle_event(Event::FilterChanged("$.a".to_string())).await;
        app.handle_event(Event::FilterClosed).await;
        assert_eq!(app.viewer.filter(), "$.a");
        assert!(app.viewer.has_focus());
    }

    #[tokio::test]
    async fn load_errors_show_a_popup_until_a_key_is_pressed() {
        let (mut app, _file) = app_for(&[], b"{ not a response").await;
        assert!(app.error.is_some());
        app.handle_event(key(Char('q'))).await;
        assert!(app.error.is_none());
        assert!(!app.should_quit);
        app.handle_event(key(Char('q'))).await;
        assert!(app.should_quit);
    }
}
