//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `jmni_until` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use jmni_until::config::{CaseStyle, Cli, Command};
use jmni_until::date::{format_date, format_date_in, format_timezone_offset, DateInput};
use jmni_until::initialization::init_logger_with;
use jmni_until::number::pad_zero_str;
use jmni_until::query::{query_param, query_params};
use jmni_until::signature::{generate_signature, verify_signature, SignatureParams};
use jmni_until::string::{camel_to_snake, capitalize, generate_uid, random_string, snake_to_camel};
use jmni_until::user_agent::{device_kind, is_mobile};
use jmni_until::{
    debounce, throttle, CallStats, DebounceConfig, SystemClock, ThrottleConfig, TokioScheduler,
    UtilError,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli.command).await {
        eprintln!("jmni error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Date {
            input,
            format,
            timezone,
        } => {
            let input = parse_date_input(input);
            let text = match timezone {
                Some(name) => {
                    let tz: chrono_tz::Tz = name
                        .parse()
                        .map_err(|_| UtilError::InvalidTimezone(name.clone()))?;
                    format_date_in(input, &format, &tz)?
                }
                None => format_date(input, &format)?,
            };
            println!("{}", text);
        }
        Command::TzOffset => println!("{}", format_timezone_offset()),
        Command::Case { style, text } => {
            let converted = match style {
                CaseStyle::Capitalize => capitalize(&text),
                CaseStyle::Camel => snake_to_camel(&text),
                CaseStyle::Snake => camel_to_snake(&text),
            };
            println!("{}", converted);
        }
        Command::Pad { value } => println!("{}", pad_zero_str(&value)?),
        Command::Uid => println!("{}", generate_uid()),
        Command::Random { length } => println!("{}", random_string(length)),
        Command::Query { url, key } => match key {
            Some(key) => match query_param(&url, &key) {
                Some(value) => println!("{}", value),
                None => bail!("query parameter {:?} not found", key),
            },
            None => {
                for (k, v) in query_params(&url) {
                    println!("{}={}", k, v);
                }
            }
        },
        Command::Device { user_agent } => {
            println!(
                "{} (mobile: {})",
                device_kind(&user_agent),
                is_mobile(&user_agent)
            );
        }
        Command::Sign { secret, query } => {
            let params = generate_signature(&secret).context("Failed to sign")?;
            if query {
                println!("{}", params.to_query());
            } else {
                println!("{}", serde_json::to_string_pretty(&params)?);
            }
        }
        Command::Verify {
            secret,
            timestamp,
            nonce,
            signature,
        } => {
            let params = SignatureParams {
                timestamp,
                nonce,
                signature,
            };
            if !verify_signature(&secret, &params) {
                bail!("signature does not match");
            }
            println!("valid");
        }
        Command::Throttle { interval_ms } => echo_throttled(interval_ms).await?,
        Command::Debounce {
            delay_ms,
            immediate,
        } => echo_debounced(delay_ms, immediate).await?,
    }
    Ok(())
}

/// Epoch millis when the text is an integer, a date string otherwise, now when absent.
fn parse_date_input(input: Option<String>) -> DateInput {
    match input {
        Some(text) => match text.trim().parse::<i64>() {
            Ok(ms) => DateInput::Millis(ms),
            Err(_) => DateInput::Text(text),
        },
        None => DateInput::Instant(chrono::Utc::now()),
    }
}

async fn echo_throttled(interval_ms: u64) -> Result<()> {
    let stats = Arc::new(CallStats::new());
    let echo = throttle(
        |line: String| println!("{}", line),
        ThrottleConfig::new(Duration::from_millis(interval_ms)).stats(Arc::clone(&stats)),
        Arc::new(SystemClock),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        echo.call(line);
    }

    stats.log_summary();
    Ok(())
}

async fn echo_debounced(delay_ms: u64, immediate: bool) -> Result<()> {
    let delay = Duration::from_millis(delay_ms);
    let stats = Arc::new(CallStats::new());
    let scheduler = TokioScheduler::current().context("No tokio runtime")?;
    let echo = debounce(
        |line: String| println!("{}", line),
        DebounceConfig::new(delay)
            .immediate(immediate)
            .stats(Arc::clone(&stats)),
        Arc::new(scheduler),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        echo.call(line);
    }

    // Let the last burst settle before exiting
    while echo.is_pending() {
        tokio::time::sleep(delay.max(Duration::from_millis(10))).await;
    }

    stats.log_summary();
    Ok(())
}
