//! jmni_until library: small general-purpose helpers
//!
//! This library provides rate-limiting wrappers (debounce and throttle), deep
//! structural equality over dynamic values, and a handful of independent helpers
//! for arrays, dates, strings, numbers, URL query strings, User-Agent detection
//! and HMAC request signing.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use jmni_until::{debounce, DebounceConfig, ManualScheduler};
//!
//! let scheduler = Arc::new(ManualScheduler::new());
//! let search = debounce(
//!     |query: String| println!("searching for {query}"),
//!     DebounceConfig::new(Duration::from_millis(300)),
//!     scheduler.clone(),
//! );
//!
//! search.call("r".to_string());
//! search.call("ru".to_string());
//! search.call("rust".to_string());
//! scheduler.advance(Duration::from_millis(300)); // prints "searching for rust" once
//! ```
//!
//! # Time
//!
//! The wrappers never read the system clock or spawn timers on their own; they
//! go through the [`Clock`] and [`Scheduler`] ports. Use [`SystemClock`] and
//! [`TokioScheduler`] in applications, [`ManualClock`] and [`ManualScheduler`]
//! in tests.

#![warn(missing_docs)]

pub mod array;
pub mod config;
pub mod date;
pub mod equality;
pub mod error_handling;
pub mod initialization;
pub mod number;
pub mod query;
pub mod rate_limit;
pub mod signature;
pub mod string;
pub mod user_agent;

// Re-export public API
pub use equality::{is_equal, Value};
pub use error_handling::{Result, UtilError};
pub use rate_limit::{
    debounce, throttle, CallOutcome, CallStats, Clock, DebounceConfig, Debounced, ManualClock,
    ManualScheduler, Scheduler, SystemClock, ThrottleConfig, Throttled, TokioScheduler,
};
