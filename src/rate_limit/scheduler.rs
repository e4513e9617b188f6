//! Scheduler port: "run this after N milliseconds" and "cancel that".
//!
//! Two implementations:
//! - `TokioScheduler` spawns a sleeping task per timer on a tokio runtime.
//! - `ManualScheduler` keeps a virtual timeline that tests advance explicitly.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::clock::{duration_to_millis, Clock, ManualClock};
use super::lock;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled task, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Numeric value, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Host timer facility.
pub trait Scheduler: Send + Sync {
    /// Runs `task` once `delay` has elapsed. Never runs it synchronously,
    /// even for a zero delay.
    fn schedule(&self, delay: Duration, task: Task) -> TimerId;

    /// Cancels a scheduled task. Returns `false` if it already ran or was
    /// already cancelled.
    fn cancel(&self, id: TimerId) -> bool;
}

/// Real-time scheduler on a tokio runtime.
///
/// Each timer is a spawned task sleeping for the delay. Cancelling removes the
/// timer from the registry and aborts the task; a task that wakes up and no
/// longer finds itself registered does nothing, so a cancel that races the
/// wake-up still wins.
pub struct TokioScheduler {
    handle: Handle,
    next_id: AtomicU64,
    timers: Arc<Mutex<HashMap<TimerId, JoinHandle<()>>>>,
}

impl TokioScheduler {
    /// Creates a scheduler spawning onto `handle`.
    pub fn new(handle: Handle) -> Self {
        TokioScheduler {
            handle,
            next_id: AtomicU64::new(1),
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates a scheduler on the runtime of the calling context.
    ///
    /// Returns `None` outside a tokio runtime.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Number of timers that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        lock(&self.timers).len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let timers = Arc::clone(&self.timers);

        // Registry lock is held across spawn + insert so a zero-delay timer
        // cannot look itself up before it is registered.
        let mut registry = lock(&self.timers);
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            let still_scheduled = lock(&timers).remove(&id).is_some();
            if still_scheduled {
                task();
            }
        });
        registry.insert(id, join);
        log::trace!("scheduled timer {} in {:?}", id.get(), delay);
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        match lock(&self.timers).remove(&id) {
            Some(join) => {
                join.abort();
                log::trace!("cancelled timer {}", id.get());
                true
            }
            None => false,
        }
    }
}

struct ManualEntry {
    id: TimerId,
    due_ms: u64,
    task: Task,
}

#[derive(Default)]
struct ManualQueue {
    next_id: u64,
    entries: Vec<ManualEntry>,
}

/// Virtual-time scheduler for deterministic tests.
///
/// Nothing runs until `advance` or `run_pending` is called. Due tasks run in
/// deadline order, ties in scheduling order, and the shared clock reads each
/// task's deadline while it runs. Tasks scheduled by a running task are
/// picked up in the same `advance` call if they fall due within it.
///
/// A panicking task propagates out of `advance`; the queue stays usable.
pub struct ManualScheduler {
    clock: Arc<ManualClock>,
    queue: Mutex<ManualQueue>,
}

impl ManualScheduler {
    /// Creates a scheduler with its own clock starting at zero.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(ManualClock::new(0)))
    }

    /// Creates a scheduler driving an existing clock.
    pub fn with_clock(clock: Arc<ManualClock>) -> Self {
        ManualScheduler {
            clock,
            queue: Mutex::new(ManualQueue::default()),
        }
    }

    /// The clock this scheduler advances.
    pub fn clock(&self) -> Arc<ManualClock> {
        Arc::clone(&self.clock)
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        lock(&self.queue).entries.len()
    }

    /// Runs every task already due (including zero-delay tasks) without moving time.
    pub fn run_pending(&self) -> usize {
        self.advance(Duration::ZERO)
    }

    /// Moves virtual time forward by `by`, running each task that falls due.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.clock.now_ms().saturating_add(duration_to_millis(by));
        let mut ran = 0;

        while let Some(entry) = self.pop_due(target) {
            if entry.due_ms > self.clock.now_ms() {
                self.clock.set(entry.due_ms);
            }
            log::trace!("firing timer {} at {}ms", entry.id.get(), entry.due_ms);
            (entry.task)();
            ran += 1;
        }

        self.clock.set(target.max(self.clock.now_ms()));
        ran
    }

    fn pop_due(&self, target: u64) -> Option<ManualEntry> {
        let mut queue = lock(&self.queue);
        let position = queue
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= target)
            .min_by_key(|(_, e)| (e.due_ms, e.id))
            .map(|(i, _)| i)?;
        Some(queue.entries.remove(position))
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let due_ms = self.clock.now_ms().saturating_add(duration_to_millis(delay));
        let mut queue = lock(&self.queue);
        queue.next_id += 1;
        let id = TimerId(queue.next_id);
        queue.entries.push(ManualEntry { id, due_ms, task });
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        let mut queue = lock(&self.queue);
        let before = queue.entries.len();
        queue.entries.retain(|e| e.id != id);
        queue.entries.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn recorder() -> (Arc<StdMutex<Vec<String>>>, impl Fn(&str) -> Task) {
        let log = Arc::new(StdMutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let make = move |label: &str| -> Task {
            let sink = Arc::clone(&sink);
            let label = label.to_string();
            Box::new(move || sink.lock().unwrap().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_manual_runs_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        scheduler.schedule(Duration::from_millis(30), task("c"));
        scheduler.schedule(Duration::from_millis(10), task("a"));
        scheduler.schedule(Duration::from_millis(20), task("b"));

        assert_eq!(scheduler.advance(Duration::from_millis(25)), 2);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
        assert_eq!(scheduler.now_ms(), 25);

        assert_eq!(scheduler.advance(Duration::from_millis(5)), 1);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_manual_ties_run_in_scheduling_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        scheduler.schedule(Duration::from_millis(10), task("first"));
        scheduler.schedule(Duration::from_millis(10), task("second"));
        scheduler.advance(Duration::from_millis(10));

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_manual_zero_delay_is_not_synchronous() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        scheduler.schedule(Duration::ZERO, task("tick"));
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["tick"]);
    }

    #[test]
    fn test_manual_cancel() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();

        let id = scheduler.schedule(Duration::from_millis(10), task("never"));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        scheduler.advance(Duration::from_secs(1));
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_manual_clock_reads_deadline_during_task() {
        let scheduler = Arc::new(ManualScheduler::new());
        let seen = Arc::new(AtomicU64::new(0));
        let clock = scheduler.clock();
        let seen_in_task = Arc::clone(&seen);

        scheduler.schedule(
            Duration::from_millis(40),
            Box::new(move || seen_in_task.store(clock.now_ms(), Ordering::SeqCst)),
        );
        scheduler.advance(Duration::from_millis(100));

        assert_eq!(seen.load(Ordering::SeqCst), 40);
        assert_eq!(scheduler.now_ms(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_fires_after_delay() {
        let scheduler = TokioScheduler::current().expect("inside runtime");
        let (log, task) = recorder();

        scheduler.schedule(Duration::from_millis(50), task("done"));
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_millis(49)).await;
        assert!(log.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*log.lock().unwrap(), vec!["done"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_cancel() {
        let scheduler = TokioScheduler::current().expect("inside runtime");
        let (log, task) = recorder();

        let id = scheduler.schedule(Duration::from_millis(50), task("never"));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_tokio_scheduler_outside_runtime() {
        assert!(TokioScheduler::current().is_none());
    }
}
