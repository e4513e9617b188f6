//! Logger initialization.
//!
//! Configures `env_logger` with either colored plain-text lines or one JSON
//! object per line.

use std::io::{IsTerminal, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides it for this crate and the
/// `jmni` binary, so `RUST_LOG=debug` still works for quick debugging while
/// `--log-level` keeps explicit control.
///
/// Colors are only emitted when stderr is a terminal.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a global logger is already set.
///
/// # Examples
///
/// ```bash
/// # Use RUST_LOG for quick debugging
/// RUST_LOG=debug jmni sign
///
/// # Override with CLI args (takes precedence)
/// RUST_LOG=debug jmni --log-level info throttle --interval-ms 500
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=jmni_until::rate_limit=trace jmni debounce
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(std::io::stderr().is_terminal());

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_module("jmni_until", level);
    builder.filter_module("jmni", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.target().cyan(),
                    level_badge(record.level()),
                    record.args()
                )
            });
        }
    }

    // try_init: tests may initialize the logger more than once
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Renders one structured log line.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}

fn level_badge(level: Level) -> ColoredString {
    let label = level.as_str();
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.purple(),
    }
}
