//! Throttle wrapper.
//!
//! Runs a function at most once per interval, measured from its own last run.
//! Calls arriving sooner are dropped: nothing is queued and there is no trailing run.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::clock::{duration_to_millis, Clock};
use super::lock;
use super::stats::{CallOutcome, CallStats};
use crate::config::DEFAULT_THROTTLE_INTERVAL_MS;

/// Throttle settings.
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Minimum time between two runs. Zero lets every call through.
    pub interval: Duration,
    /// Optional shared outcome counters.
    pub stats: Option<Arc<CallStats>>,
}

impl ThrottleConfig {
    /// Throttle with the given interval.
    pub fn new(interval: Duration) -> Self {
        ThrottleConfig {
            interval,
            stats: None,
        }
    }

    /// Attaches outcome counters.
    pub fn stats(mut self, stats: Arc<CallStats>) -> Self {
        self.stats = Some(stats);
        self
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_THROTTLE_INTERVAL_MS))
    }
}

struct Shared<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    interval_ms: u64,
    clock: Arc<dyn Clock>,
    /// Timestamp of the last actual run; `None` until the first one.
    last_run_ms: Mutex<Option<u64>>,
    stats: Option<Arc<CallStats>>,
}

/// A throttled function. Clones share the same last-run timestamp.
pub struct Throttled<A> {
    shared: Arc<Shared<A>>,
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Throttled {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Wraps `func` so that it runs at most once per `config.interval`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use jmni_until::rate_limit::{throttle, ManualClock, ThrottleConfig};
///
/// let clock = Arc::new(ManualClock::new(0));
/// let on_scroll = throttle(|_: ()| {}, ThrottleConfig::new(Duration::from_millis(1000)), clock.clone());
///
/// assert!(on_scroll.call(()));   // t=0
/// clock.set(500);
/// assert!(!on_scroll.call(()));  // t=500, dropped
/// clock.set(1200);
/// assert!(on_scroll.call(()));   // t=1200
/// ```
pub fn throttle<A, F>(func: F, config: ThrottleConfig, clock: Arc<dyn Clock>) -> Throttled<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled {
        shared: Arc::new(Shared {
            func: Box::new(func),
            interval_ms: duration_to_millis(config.interval),
            clock,
            last_run_ms: Mutex::new(None),
            stats: config.stats,
        }),
    }
}

impl<A> Throttled<A> {
    /// Runs the function now if the interval has elapsed since its last run.
    ///
    /// Returns `true` when the function ran. The first call always runs.
    pub fn call(&self, args: A) -> bool {
        let shared = &self.shared;
        let now = shared.clock.now_ms();

        let run = {
            let mut last = lock(&shared.last_run_ms);
            let due = match *last {
                // A clock that steps backwards counts as zero elapsed
                Some(prev) => now.saturating_sub(prev) >= shared.interval_ms,
                None => true,
            };
            if due {
                *last = Some(now);
            }
            due
        };

        if run {
            shared.record(CallOutcome::Executed);
            (shared.func)(args);
        } else {
            log::trace!("throttle: dropped call at {}ms", now);
            shared.record(CallOutcome::Dropped);
        }
        run
    }

    /// Timestamp of the last run, if any.
    pub fn last_run_ms(&self) -> Option<u64> {
        *lock(&self.shared.last_run_ms)
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.shared.interval_ms)
    }
}

impl<A> Shared<A> {
    fn record(&self, outcome: CallOutcome) {
        if let Some(stats) = &self.stats {
            stats.record(outcome);
        }
    }
}
