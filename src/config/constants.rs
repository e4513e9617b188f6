//! Configuration constants.
//!
//! Defaults shared by the helpers and the CLI.

/// Default template used by `format_date`.
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";

/// Default IANA time zone for `format_with_timezone`.
pub const DEFAULT_TIMEZONE: &str = "Asia/Shanghai";

/// Default HMAC secret used by `generate_signature` when none is supplied.
pub const DEFAULT_SECRET_KEY: &str = "jmni-until";

/// Length of the hex nonce in a signature (16 hex chars = 64 bits).
pub const SIGNATURE_NONCE_LEN: usize = 16;

/// Number of random base-36 characters appended to a UID.
pub const UID_RANDOM_LEN: usize = 8;

/// Debounce delay in milliseconds used by the CLI when none is given.
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 300;

/// Throttle interval in milliseconds used by the CLI when none is given.
pub const DEFAULT_THROTTLE_INTERVAL_MS: u64 = 1000;
