// src/common/sequence.rs

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use dashmap::DashMap;

use crate::common::error::AppError;

/// Hands out monotonic tickets per key. Only the most recent ticket for a key
/// may publish its result, so a slow, older response can never overwrite the
/// state produced by a newer one.
#[derive(Clone, Default)]
pub struct RequestSequencer {
    next: Arc<AtomicU64>,
    latest: Arc<DashMap<String, u64>>,
}

/// A claim on the latest slot for a key. Dropping it, finished or not,
/// releases the slot unless a newer ticket has taken it over.
#[derive(Debug)]
pub struct Ticket {
    key: String,
    seq: u64,
    latest: Arc<DashMap<String, u64>>,
}

impl Ticket {
    pub fn key(&self) -> &str {
        &self.key
    }

    fn release(&self) -> bool {
        self.latest
            .remove_if(&self.key, |_, latest| *latest == self.seq)
            .is_some()
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        self.release();
    }
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, key: impl Into<String>) -> Ticket {
        let key = key.into();
        // Sequence numbers are global so a key can be dropped and reissued safely.
        let seq = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest.insert(key.clone(), seq);
        Ticket {
            key,
            seq,
            latest: Arc::clone(&self.latest),
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest
            .get(&ticket.key)
            .is_some_and(|latest| *latest == ticket.seq)
    }

    /// Publishes `value` if the ticket is still the latest for its key.
    pub fn finish<T>(&self, ticket: Ticket, value: T) -> Result<T, AppError> {
        if ticket.release() {
            Ok(value)
        } else {
            tracing::debug!(key = %ticket.key, seq = ticket.seq, "response superseded");
            Err(AppError::Superseded)
        }
    }

    pub fn in_flight(&self) -> usize {
        self.latest.len()
    }
}
