//! Date formatting.
//!
//! Templates use `yyyy yy MM M dd d HH H hh h mm m ss s`; longer tokens win, so
//! `MM` is never read as two `M`. Any other text is copied verbatim.

use std::sync::LazyLock;

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike,
    Utc,
};
use regex::{Captures, Regex};

use crate::config::{DEFAULT_DATE_FORMAT, DEFAULT_TIMEZONE};
use crate::error_handling::{Result, UtilError};

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("yyyy|yy|MM|dd|HH|hh|mm|ss|M|d|H|h|m|s").expect("static token pattern")
});

/// Something that names a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// RFC 3339, `yyyy-MM-dd HH:mm[:ss]`, `yyyy-MM-ddTHH:mm[:ss]` or `yyyy-MM-dd`.
    ///
    /// Date-times without an offset are local time; a bare date is UTC midnight.
    Text(String),
    /// An instant.
    Instant(DateTime<Utc>),
}

impl DateInput {
    /// Resolves the input to an instant.
    ///
    /// # Errors
    ///
    /// `UtilError::InvalidDate` when the text cannot be parsed or the
    /// timestamp is out of range.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        match self {
            DateInput::Millis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .ok_or_else(|| UtilError::InvalidDate(ms.to_string())),
            DateInput::Text(text) => parse_text(text.trim())
                .ok_or_else(|| UtilError::InvalidDate(text.clone())),
            DateInput::Instant(instant) => Ok(*instant),
        }
    }
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for layout in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, layout) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl From<i64> for DateInput {
    fn from(ms: i64) -> Self {
        DateInput::Millis(ms)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(instant: DateTime<Utc>) -> Self {
        DateInput::Instant(instant)
    }
}

/// Formats `input` in the local time zone.
///
/// ```
/// use jmni_until::date::format_date;
///
/// let text = format_date("2025-04-28 10:00:00", "yyyy/MM/dd").unwrap();
/// assert_eq!(text, "2025/04/28");
/// ```
pub fn format_date(input: impl Into<DateInput>, format: &str) -> Result<String> {
    format_date_in(input, format, &Local)
}

/// Formats `input` in the time zone `tz`.
pub fn format_date_in<Tz: TimeZone>(
    input: impl Into<DateInput>,
    format: &str,
    tz: &Tz,
) -> Result<String> {
    let instant = input.into().to_utc()?;
    Ok(render(&instant.with_timezone(tz), format))
}

fn render<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String {
    let year = date.year().to_string();
    let hour12 = match date.hour() % 12 {
        0 => 12,
        h => h,
    };

    TOKEN
        .replace_all(format, |caps: &Captures| match &caps[0] {
            "yyyy" => year.clone(),
            "yy" => year
                .chars()
                .skip(year.chars().count().saturating_sub(2))
                .collect(),
            "MM" => format!("{:02}", date.month()),
            "M" => date.month().to_string(),
            "dd" => format!("{:02}", date.day()),
            "d" => date.day().to_string(),
            "HH" => format!("{:02}", date.hour()),
            "H" => date.hour().to_string(),
            "hh" => format!("{:02}", hour12),
            "h" => hour12.to_string(),
            "mm" => format!("{:02}", date.minute()),
            "m" => date.minute().to_string(),
            "ss" => format!("{:02}", date.second()),
            "s" => date.second().to_string(),
            other => other.to_string(),
        })
        .into_owned()
}

/// The machine's current UTC offset as `UTC±hh:mm`.
pub fn format_timezone_offset() -> String {
    format_offset(Local::now().offset().fix())
}

/// Renders an offset as `UTC±hh:mm`. A zero offset is `UTC+00:00`.
pub fn format_offset(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    format!("UTC{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

/// Formats `input` as `yyyy-MM-dd HH:mm:ss` in the IANA zone `timezone`.
///
/// # Errors
///
/// `UtilError::InvalidDate` for unparseable input (checked first), then
/// `UtilError::InvalidTimezone` for an unknown zone name.
///
/// ```
/// use jmni_until::date::format_with_timezone;
///
/// let text = format_with_timezone("2025-04-16T06:00:00Z", "UTC").unwrap();
/// assert_eq!(text, "2025-04-16 06:00:00");
/// ```
pub fn format_with_timezone(input: impl Into<DateInput>, timezone: &str) -> Result<String> {
    let instant = input.into().to_utc()?;
    let tz: chrono_tz::Tz = timezone.parse().map_err(|_| {
        log::warn!("unknown time zone {:?}", timezone);
        UtilError::InvalidTimezone(timezone.to_string())
    })?;
    Ok(render(&instant.with_timezone(&tz), DEFAULT_DATE_FORMAT))
}

/// `format_with_timezone` in the default zone (Asia/Shanghai).
pub fn format_with_default_timezone(input: impl Into<DateInput>) -> Result<String> {
    format_with_timezone(input, DEFAULT_TIMEZONE)
}
