//! Clock port.
//!
//! The throttle wrapper asks a `Clock` for the current time instead of reading
//! the wall clock directly, so tests can drive time by hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Source of "current time in milliseconds".
pub trait Clock: Send + Sync {
    /// Milliseconds since an arbitrary but fixed epoch.
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by `chrono::Utc::now()` (milliseconds since the Unix epoch).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        // Pre-1970 clocks clamp to zero
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Hand-driven clock for deterministic tests.
///
/// Shared between the code under test and the test through `Arc<ManualClock>`.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    pub fn new(start_ms: u64) -> Self {
        ManualClock {
            now: AtomicU64::new(start_ms),
        }
    }

    /// Sets the current reading.
    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now
            .fetch_add(duration_to_millis(by), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Converts a `Duration` to whole milliseconds, saturating at `u64::MAX`.
pub fn duration_to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
