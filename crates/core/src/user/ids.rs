//! Surrogate id assignment.
//!
//! Ids are wall-clock milliseconds, bumped past the last id handed out by the
//! same generator. Two creations within one millisecond therefore get
//! distinct ids inside a process; separate processes can still collide.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use super::types::UserId;

/// Monotonic, timestamp-based id generator. Shared by all requests of a process.
#[derive(Debug, Default)]
pub struct UserIdGenerator {
    last: AtomicI64,
}

impl UserIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the current time.
    pub fn next_id(&self) -> UserId {
        self.next_id_at(Utc::now().timestamp_millis())
    }

    /// Next id given `now_ms`: `now_ms`, or one past the previous id if the
    /// clock has not advanced.
    pub fn next_id_at(&self, now_ms: i64) -> UserId {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(last + 1);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }
}
