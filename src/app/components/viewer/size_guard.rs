/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

use crate::session::Session;

/// Responses larger than this many megabytes are hidden until the user asks for them
pub const LARGE_RESPONSE_MB: u64 = 5;

#[derive(Debug)]
pub struct SizeGuard {
    limit_mb: u64,
    blocking: bool,
}

impl Default for SizeGuard {
    fn default() -> Self {
        Self::new(LARGE_RESPONSE_MB)
    }
}

impl SizeGuard {
    pub fn new(limit_mb: u64) -> Self {
        Self {
            limit_mb,
            blocking: false,
        }
    }

    pub fn limit_mb(&self) -> u64 {
        self.limit_mb
    }

    fn limit_bytes(&self) -> u64 {
        self.limit_mb.saturating_mul(1024 * 1024)
    }

    /// Decides whether a newly loaded response should be hidden.
    /// A previous dismissal does not carry over.
    pub fn evaluate(&mut self, bytes: u64, session: &Session) {
        self.blocking = !session.always_show_large_responses() && bytes > self.limit_bytes();
        if self.blocking {
            log::info!("Hiding {bytes} byte response (limit {} MB)", self.limit_mb);
        }
    }

    /// Shows the current response anyway
    pub fn dismiss(&mut self) {
        self.blocking = false;
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking
    }
}
