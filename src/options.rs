/*
 * Copyright (c) 2023-2026 Paul Sobolik
 * Created 2023-12-19
 */

use std::path::PathBuf;

use clap::Parser;

use crate::app::LARGE_RESPONSE_MB;
use crate::response::{KeyMap, PreviewMode};

#[derive(Debug, Parser)]
#[command(version, long_about("A terminal viewer for saved HTTP responses"))]
pub struct Options {
    /// Response file (JSON), or a raw body file with --raw
    pub(crate) response: PathBuf,

    /// Treat the file as a raw response body
    #[arg(long)]
    pub(crate) raw: bool,

    /// Content-type of a raw response body
    #[arg(long, default_value = "text/plain")]
    pub(crate) content_type: String,

    /// Preview mode, overriding the one saved with the response
    #[arg(long, value_enum)]
    pub(crate) mode: Option<PreviewMode>,

    /// Movement keys to use when scrolling
    #[arg(long, value_enum)]
    pub(crate) key_map: Option<KeyMap>,

    /// Wrap long lines
    #[arg(long)]
    pub(crate) wrap: bool,

    /// Indent size for prettified JSON
    #[arg(long)]
    pub(crate) indent: Option<usize>,

    /// Hide response bodies larger than this many megabytes
    #[arg(long, default_value_t = LARGE_RESPONSE_MB)]
    pub(crate) large_response_mb: u64,

    /// Never hide large response bodies
    #[arg(long)]
    pub(crate) always_show_large: bool,

    /// Write a log to this file (filtered by RRV_LOG, default "info")
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,
}
