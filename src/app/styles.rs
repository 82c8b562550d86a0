/*
 * Copyright (c) 2024-2026 Paul Sobolik
 * Created 2024-03-18
 */

use ratatui::prelude::{Color, Modifier, Style};

pub(crate) const BLOCKED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);
pub(crate) const ACTION_STYLE: Style = Style::new().fg(Color::LightBlue).add_modifier(Modifier::BOLD);
pub(crate) const FAINT_STYLE: Style = Style::new().fg(Color::DarkGray);
pub(crate) const IMAGE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);
pub(crate) const ERROR_STYLE: Style = Style::new().fg(Color::Red);
pub(crate) const FOCUSED_BLOCK_STYLE: Style = Style::new()
    .fg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);
pub(crate) const STATUS_OK_STYLE: Style = Style::new().fg(Color::Green);
pub(crate) const STATUS_REDIRECT_STYLE: Style = Style::new().fg(Color::Yellow);
pub(crate) const STATUS_ERROR_STYLE: Style = Style::new().fg(Color::Red);
