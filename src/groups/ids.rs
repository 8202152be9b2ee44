//! Creation-time identifiers

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Issues ids derived from the current time in Unix milliseconds
///
/// Ids are strictly increasing: a request landing in the same millisecond
/// as the previous one gets the next integer instead of a duplicate.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id as a decimal string
    pub fn next_id(&self) -> String {
        self.next_millis(Utc::now().timestamp_millis()).to_string()
    }

    /// Next id value given the current time `now`
    pub fn next_millis(&self, now: i64) -> i64 {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}
