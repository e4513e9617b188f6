//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DEFAULT_DATE_FORMAT, DEFAULT_DEBOUNCE_DELAY_MS, DEFAULT_SECRET_KEY, DEFAULT_THROTTLE_INTERVAL_MS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Case conversion performed by the `case` subcommand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CaseStyle {
    /// Uppercase the first character
    Capitalize,
    /// `snake_case` to `camelCase`
    Camel,
    /// `camelCase` to `snake_case`
    Snake,
}

/// Command-line interface of the `jmni` binary.
#[derive(Debug, Parser)]
#[command(name = "jmni", version, about = "Small front-end style utilities from the command line")]
pub struct Cli {
    /// Log level (overrides RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the `jmni` binary.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Format a timestamp (epoch millis or date string)
    Date {
        /// Epoch milliseconds, RFC 3339 or `yyyy-MM-dd[ HH:mm:ss]`; defaults to now
        input: Option<String>,
        /// Format template
        #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
        format: String,
        /// IANA time zone (e.g. Asia/Shanghai); local time when omitted
        #[arg(long)]
        timezone: Option<String>,
    },
    /// Print the local UTC offset as `UTC±hh:mm`
    TzOffset,
    /// Convert the case of a string
    Case {
        /// Conversion to apply
        #[arg(value_enum)]
        style: CaseStyle,
        /// Input text
        text: String,
    },
    /// Pad a number to at least two digits
    Pad {
        /// Numeric text
        value: String,
    },
    /// Generate a unique identifier
    Uid,
    /// Generate a random base-36 string
    Random {
        /// Number of characters
        #[arg(default_value_t = 8)]
        length: usize,
    },
    /// Read a query parameter from a URL or search string
    Query {
        /// URL or `?a=1&b=2` search string
        url: String,
        /// Parameter name; prints every pair when omitted
        key: Option<String>,
    },
    /// Classify a user-agent string
    Device {
        /// User-Agent header value
        user_agent: String,
    },
    /// Generate a timestamp/nonce/signature triple
    Sign {
        /// HMAC secret
        #[arg(long, default_value = DEFAULT_SECRET_KEY)]
        secret: String,
        /// Print as a query string instead of JSON
        #[arg(long)]
        query: bool,
    },
    /// Verify a timestamp/nonce/signature triple
    Verify {
        /// HMAC secret
        #[arg(long, default_value = DEFAULT_SECRET_KEY)]
        secret: String,
        /// Millisecond timestamp
        timestamp: i64,
        /// Hex nonce
        nonce: String,
        /// Hex signature
        signature: String,
    },
    /// Echo stdin lines, passing at most one per interval
    Throttle {
        /// Interval in milliseconds
        #[arg(long, default_value_t = DEFAULT_THROTTLE_INTERVAL_MS)]
        interval_ms: u64,
    },
    /// Echo a stdin line only after input has been quiet for the delay
    Debounce {
        /// Delay in milliseconds
        #[arg(long, default_value_t = DEFAULT_DEBOUNCE_DELAY_MS)]
        delay_ms: u64,
        /// Echo the first line of each burst immediately
        #[arg(long)]
        immediate: bool,
    },
}
