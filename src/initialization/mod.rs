//! Application initialization.
//!
//! The library itself needs no setup; this module only configures logging for
//! the `jmni` binary and for embedding applications that want the same output.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
