//! Record identifier generation

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Hands out strictly increasing record ids.
///
/// Ids track wall-clock milliseconds but never repeat: two calls inside the
/// same millisecond get consecutive values, and a floor keeps new ids above
/// anything already persisted.
#[derive(Debug, Default)]
pub struct RecordIdGenerator {
    last: AtomicU64,
}

impl RecordIdGenerator {
    /// Create a new generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id
    pub fn next_id(&self) -> u64 {
        self.next_above(0)
    }

    /// Next id that is also strictly greater than `floor`
    pub fn next_above(&self, floor: u64) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut current = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now
                .max(current.saturating_add(1))
                .max(floor.saturating_add(1));
            match self.last.compare_exchange(
                current,
                candidate,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return candidate,
                Err(actual) => current = actual,
            }
        }
    }
}
