//! Rate-limiting wrappers.
//!
//! - `debounce`: collapse a burst of calls into one run after a quiet period
//! - `throttle`: run at most once per interval, dropping the rest
//!
//! Time is injected: throttle reads a `Clock`, debounce arms timers through a
//! `Scheduler`. Production code uses `SystemClock` and `TokioScheduler`; tests use
//! `ManualClock` and `ManualScheduler` to step time deterministically.
//!
//! Wrappers keep their state behind a mutex and never hold it while the wrapped
//! function runs, so they can be shared across threads and a panicking function
//! leaves them usable.

mod clock;
mod debounce;
mod scheduler;
mod stats;
mod throttle;

use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-export public API
pub use clock::{duration_to_millis, Clock, ManualClock, SystemClock};
pub use debounce::{debounce, DebounceConfig, Debounced};
pub use scheduler::{ManualScheduler, Scheduler, Task, TimerId, TokioScheduler};
pub use stats::{CallOutcome, CallStats};
pub use throttle::{throttle, ThrottleConfig, Throttled};

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
