/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use std::fs::File;
use std::path::Path;

use color_eyre::eyre::Result;
use env_logger::{Env, Target};

pub const LOG_ENV: &str = "RRV_LOG";

/// Sends log records to a file. The terminal belongs to the UI, so without a file nothing is logged.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    log::info!("{} {} started", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    Ok(())
}
