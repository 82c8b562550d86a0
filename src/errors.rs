/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid response file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Response body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Response body is not valid hex")]
    Hex,
    #[error("Unsupported body encoding \"{0}\"")]
    UnknownEncoding(String),
}
