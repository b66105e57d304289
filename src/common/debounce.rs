// src/common/debounce.rs

use std::time::Duration;

use crate::common::{
    error::AppError,
    sequence::{RequestSequencer, Ticket},
};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(200);

/// Server-side debounce for free-text search. Each call waits out the quiet
/// window; only the last call of a burst for the same key gets through.
#[derive(Clone)]
pub struct SearchDebouncer {
    window: Duration,
    sequencer: RequestSequencer,
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            sequencer: RequestSequencer::new(),
        }
    }

    /// Resolves once the window has elapsed with no newer call for `key`.
    pub async fn settle(&self, key: impl Into<String>) -> Result<Ticket, AppError> {
        let ticket = self.sequencer.issue(key);
        tokio::time::sleep(self.window).await;

        if self.sequencer.is_current(&ticket) {
            Ok(ticket)
        } else {
            Err(AppError::Superseded)
        }
    }

    /// Publishes the search result unless a newer query arrived meanwhile.
    pub fn finish<T>(&self, ticket: Ticket, value: T) -> Result<T, AppError> {
        self.sequencer.finish(ticket, value)
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}
