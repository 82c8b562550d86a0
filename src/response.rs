/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use std::fmt::{Display, Formatter};
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::errors::ViewerError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    #[default]
    Friendly,
    Raw,
    Source,
}

impl PreviewMode {
    pub fn next(self) -> Self {
        match self {
            PreviewMode::Friendly => PreviewMode::Raw,
            PreviewMode::Raw => PreviewMode::Source,
            PreviewMode::Source => PreviewMode::Friendly,
        }
    }
}

impl Display for PreviewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            PreviewMode::Friendly => "Preview",
            PreviewMode::Raw => "Raw",
            PreviewMode::Source => "Source",
        };
        write!(f, "{}", str)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KeyMap {
    #[default]
    Default,
    Vim,
    Emacs,
    Sublime,
}

fn default_indent_size() -> usize {
    2
}

fn default_encoding() -> String {
    "base64".to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    #[serde(default = "default_indent_size")]
    pub editor_indent_size: usize,
    #[serde(default)]
    pub editor_key_map: KeyMap,
    #[serde(default)]
    pub editor_line_wrapping: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            editor_indent_size: default_indent_size(),
            editor_key_map: KeyMap::default(),
            editor_line_wrapping: false,
        }
    }
}

/// A response as handed to the viewer
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseViewModel {
    pub body: String,
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub preview_mode: PreviewMode,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub status_code: u16,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub filter: String,
    #[serde(flatten)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub error: bool,
}

impl ResponseViewModel {
    /// Wraps a raw body in a view model
    pub fn from_raw_body(body: &[u8], content_type: &str) -> Self {
        Self {
            body: BASE64.encode(body),
            encoding: default_encoding(),
            content_type: content_type.to_string(),
            preview_mode: PreviewMode::default(),
            bytes: body.len() as u64,
            status_code: 0,
            url: String::new(),
            filter: String::new(),
            editor: EditorSettings::default(),
            error: false,
        }
    }

    /// Reads a view model from a JSON file
    pub async fn load(path: &Path) -> Result<Self, ViewerError> {
        let contents = fs::read_to_string(path).await?;
        let response: Self = serde_json::from_str(&contents)?;
        log::info!(
            "Loaded {} ({}, {} bytes)",
            path.display(),
            response.content_type,
            response.bytes
        );
        Ok(response)
    }

    /// Reads a raw body file and wraps it in a view model
    pub async fn load_raw(path: &Path, content_type: &str) -> Result<Self, ViewerError> {
        let body = fs::read(path).await?;
        log::info!("Loaded raw body {} ({} bytes)", path.display(), body.len());
        Ok(Self::from_raw_body(&body, content_type))
    }

    /// Decodes the payload into the raw body bytes according to its encoding tag
    pub fn body_bytes(&self) -> Result<Vec<u8>, ViewerError> {
        match self.encoding.to_ascii_lowercase().as_str() {
            "base64" => {
                let compact: String = self.body.split_whitespace().collect();
                Ok(BASE64.decode(compact)?)
            }
            "utf8" | "utf-8" => Ok(self.body.as_bytes().to_vec()),
            // One byte per character, high bits dropped
            "latin1" | "binary" | "ascii" => Ok(self.body.chars().map(|ch| ch as u32 as u8).collect()),
            "hex" => decode_hex(&self.body),
            other => Err(ViewerError::UnknownEncoding(other.to_string())),
        }
    }
}

fn decode_hex(hex: &str) -> Result<Vec<u8>, ViewerError> {
    let hex = hex.trim();
    if hex.len() % 2 != 0 {
        return Err(ViewerError::Hex);
    }
    (0..hex.len())
        .step_by(2)
        .map(|index| {
            hex.get(index..index + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or(ViewerError::Hex)
        })
        .collect()
}
