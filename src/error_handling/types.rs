//! Error type definitions.
//!
//! This module defines the error types returned by the utility functions and by
//! application setup.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors produced by the utility helpers.
///
/// The rate-limiting wrappers and the deep-equality comparator are total and never
/// return these; only the parsing and formatting helpers do.
#[derive(Error, Debug)]
pub enum UtilError {
    /// The date input could not be parsed or is out of range.
    #[error("Invalid date input: {0}")]
    InvalidDate(String),

    /// The time zone name is not a known IANA zone.
    #[error("Invalid timezone: \"{0}\"")]
    InvalidTimezone(String),

    /// The text is not a finite number.
    #[error("Invalid Input: {0:?} is not a number")]
    InvalidNumber(String),

    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// The HMAC key was rejected.
    #[error("Invalid signing key: {0}")]
    InvalidKey(String),
}

impl UtilError {
    /// Returns a short, stable label for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            UtilError::InvalidDate(_) => "invalid date",
            UtilError::InvalidTimezone(_) => "invalid timezone",
            UtilError::InvalidNumber(_) => "invalid number",
            UtilError::InvalidUrl(_) => "invalid url",
            UtilError::InvalidPattern(_) => "invalid pattern",
            UtilError::InvalidKey(_) => "invalid key",
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, UtilError>;
