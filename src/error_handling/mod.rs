//! Error handling.
//!
//! This module provides the error types shared by the crate:
//! - `UtilError` for the parsing and formatting helpers
//! - `InitializationError` for logger setup
//!
//! The debounce/throttle wrappers and `is_equal` are total and have no error type;
//! a panic in a wrapped function propagates to whoever invoked it.

mod types;

// Re-export public API
pub use types::{InitializationError, Result, UtilError};
