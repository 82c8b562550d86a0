/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

/// State that outlives any single response
#[derive(Debug, Default)]
pub struct Session {
    always_show_large_responses: bool,
}

impl Session {
    pub fn always_show_large_responses(&self) -> bool {
        self.always_show_large_responses
    }

    /// Stops the size guard from blocking for the rest of the session
    pub fn set_always_show_large_responses(&mut self) {
        if !self.always_show_large_responses {
            log::info!("Large responses will always be shown");
        }
        self.always_show_large_responses = true;
    }
}
