//! Application configuration and constants.
//!
//! This module provides:
//! - Default values for the helpers (date format, time zone, secret key, ...)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{CaseStyle, Cli, Command, LogFormat, LogLevel};
