//! Call outcome statistics.
//!
//! Thread-safe counters that debounce and throttle wrappers can share to report
//! what happened to each invocation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// What a wrapper did with one invocation (or one timer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum CallOutcome {
    /// Debounce ran the function synchronously (immediate mode, first call of a burst).
    Immediate,
    /// Debounce stored the arguments and armed a timer.
    Scheduled,
    /// A pending debounce timer was replaced by a newer call.
    Superseded,
    /// A debounce timer fired and ran the function.
    Fired,
    /// A pending debounce execution was discarded by `cancel`.
    Cancelled,
    /// Throttle ran the function.
    Executed,
    /// Throttle dropped the call because the interval had not elapsed.
    Dropped,
}

impl CallOutcome {
    /// Returns a human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallOutcome::Immediate => "immediate",
            CallOutcome::Scheduled => "scheduled",
            CallOutcome::Superseded => "superseded",
            CallOutcome::Fired => "fired",
            CallOutcome::Cancelled => "cancelled",
            CallOutcome::Executed => "executed",
            CallOutcome::Dropped => "dropped",
        }
    }
}

impl std::fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thread-safe outcome counters.
///
/// Every `CallOutcome` is initialized to zero on creation, so lookups never miss.
/// Share across wrappers with `Arc<CallStats>`.
#[derive(Debug)]
pub struct CallStats {
    counts: HashMap<CallOutcome, AtomicUsize>,
}

impl CallStats {
    /// Creates a tracker with all counters at zero.
    pub fn new() -> Self {
        let counts = CallOutcome::iter()
            .map(|outcome| (outcome, AtomicUsize::new(0)))
            .collect();
        CallStats { counts }
    }

    /// Increments the counter for `outcome`.
    pub fn record(&self, outcome: CallOutcome) {
        if let Some(counter) = self.counts.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Current count for `outcome`.
    pub fn get(&self, outcome: CallOutcome) -> usize {
        self.counts
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of times the wrapped function actually ran.
    pub fn runs(&self) -> usize {
        self.get(CallOutcome::Immediate) + self.get(CallOutcome::Fired) + self.get(CallOutcome::Executed)
    }

    /// Sum of all counters.
    pub fn total(&self) -> usize {
        CallOutcome::iter().map(|o| self.get(o)).sum()
    }

    /// Logs the non-zero counters at info level.
    pub fn log_summary(&self) {
        if self.total() == 0 {
            log::info!("No calls recorded");
            return;
        }
        log::info!("=== Call summary ({} function runs) ===", self.runs());
        for outcome in CallOutcome::iter() {
            let count = self.get(outcome);
            if count > 0 {
                log::info!("  {:12} {:>8}", outcome.as_str(), count);
            }
        }
    }
}

impl Default for CallStats {
    fn default() -> Self {
        Self::new()
    }
}
