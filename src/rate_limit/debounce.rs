//! Debounce wrapper.
//!
//! Delays running a function until calls have been quiet for a configured delay.
//! Only the latest call's arguments are used.
//!
//! In immediate mode the first call of a burst runs synchronously and opens a
//! quiet window; later calls inside the window behave like the plain mode, and
//! when the window closes (with or without a deferred run) the next call is a
//! first call again.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::lock;
use super::scheduler::{Scheduler, TimerId};
use super::stats::{CallOutcome, CallStats};
use crate::config::DEFAULT_DEBOUNCE_DELAY_MS;

/// Debounce settings.
#[derive(Debug, Clone)]
pub struct DebounceConfig {
    /// Quiet period that must elapse before a deferred run.
    pub delay: Duration,
    /// Run the first call of each burst synchronously.
    pub immediate: bool,
    /// Optional shared outcome counters.
    pub stats: Option<Arc<CallStats>>,
}

impl DebounceConfig {
    /// Plain (trailing) debounce with the given delay.
    pub fn new(delay: Duration) -> Self {
        DebounceConfig {
            delay,
            immediate: false,
            stats: None,
        }
    }

    /// Sets immediate mode.
    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Attaches outcome counters.
    pub fn stats(mut self, stats: Arc<CallStats>) -> Self {
        self.stats = Some(stats);
        self
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_DELAY_MS))
    }
}

struct DebounceState<A> {
    /// At most one timer is ever outstanding.
    pending: Option<TimerId>,
    first_call: bool,
    /// Bumped whenever the outstanding timer is replaced or cancelled; a timer
    /// whose generation no longer matches is stale and does nothing.
    generation: u64,
    latest: Option<A>,
}

struct Shared<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    config: DebounceConfig,
    scheduler: Arc<dyn Scheduler>,
    state: Mutex<DebounceState<A>>,
}

impl<A> Shared<A> {
    fn record(&self, outcome: CallOutcome) {
        if let Some(stats) = &self.config.stats {
            stats.record(outcome);
        }
    }
}

/// A debounced function.
///
/// Clones share the same state, so one clone can be handed to an event source
/// while another keeps the ability to `cancel`.
pub struct Debounced<A> {
    shared: Arc<Shared<A>>,
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Debounced {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Wraps `func` so that bursts of calls collapse into one run.
///
/// Timers go through `scheduler`; pass a `TokioScheduler` for real time or a
/// `ManualScheduler` in tests.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
/// use jmni_until::rate_limit::{debounce, DebounceConfig, ManualScheduler};
///
/// let scheduler = Arc::new(ManualScheduler::new());
/// let last = Arc::new(AtomicUsize::new(0));
/// let sink = Arc::clone(&last);
/// let save = debounce(
///     move |n: usize| sink.store(n, Ordering::SeqCst),
///     DebounceConfig::new(Duration::from_millis(100)),
///     scheduler.clone(),
/// );
///
/// save.call(1);
/// save.call(2);
/// scheduler.advance(Duration::from_millis(100));
/// assert_eq!(last.load(Ordering::SeqCst), 2);
/// ```
pub fn debounce<A, F>(func: F, config: DebounceConfig, scheduler: Arc<dyn Scheduler>) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        shared: Arc::new(Shared {
            func: Box::new(func),
            config,
            scheduler,
            state: Mutex::new(DebounceState {
                pending: None,
                first_call: true,
                generation: 0,
                latest: None,
            }),
        }),
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Invokes the debounced function.
    ///
    /// Any outstanding timer is cancelled. In immediate mode, a first call runs
    /// `func` on the caller's thread before returning; otherwise `args` are kept
    /// and a new timer is armed.
    pub fn call(&self, args: A) {
        let shared = &self.shared;
        let mut state = lock(&shared.state);

        if let Some(id) = state.pending.take() {
            shared.scheduler.cancel(id);
            if state.latest.is_some() {
                shared.record(CallOutcome::Superseded);
            }
        }
        state.generation += 1;

        if shared.config.immediate && state.first_call {
            state.first_call = false;
            state.latest = None;
            Self::arm(shared, &mut state);
            drop(state);

            log::trace!("debounce: immediate run");
            shared.record(CallOutcome::Immediate);
            (shared.func)(args);
            return;
        }

        state.latest = Some(args);
        Self::arm(shared, &mut state);
        shared.record(CallOutcome::Scheduled);
    }

    /// Discards any pending run and resets first-call state.
    pub fn cancel(&self) {
        let shared = &self.shared;
        let mut state = lock(&shared.state);

        if let Some(id) = state.pending.take() {
            shared.scheduler.cancel(id);
        }
        if state.latest.take().is_some() {
            log::debug!("debounce: pending run cancelled");
            shared.record(CallOutcome::Cancelled);
        }
        state.generation += 1;
        state.first_call = true;
    }

    /// True while a deferred run of the function is waiting for its timer.
    pub fn is_pending(&self) -> bool {
        let state = lock(&self.shared.state);
        state.pending.is_some() && state.latest.is_some()
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.shared.config.delay
    }

    fn arm(shared: &Arc<Shared<A>>, state: &mut DebounceState<A>) {
        let generation = state.generation;
        let owner = Arc::clone(shared);
        let id = shared.scheduler.schedule(
            shared.config.delay,
            Box::new(move || Self::fire(&owner, generation)),
        );
        state.pending = Some(id);
    }

    fn fire(shared: &Arc<Shared<A>>, generation: u64) {
        let mut state = lock(&shared.state);
        if state.generation != generation {
            return;
        }
        state.pending = None;
        state.first_call = true;
        let args = state.latest.take();
        drop(state);

        match args {
            Some(args) => {
                log::trace!("debounce: deferred run");
                shared.record(CallOutcome::Fired);
                (shared.func)(args);
            }
            None => log::trace!("debounce: quiet window closed"),
        }
    }
}
