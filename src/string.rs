//! Identifier generation and case conversion.

use rand::Rng;

use crate::config::UID_RANDOM_LEN;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Unique-enough identifier: the current time in base 36 followed by random
/// base-36 characters.
///
/// Identifiers generated later sort after earlier ones as long as the
/// timestamp part keeps the same width (until the year 2059).
pub fn generate_uid() -> String {
    let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
    format!("{}{}", to_base36(now), random_string(UID_RANDOM_LEN))
}

/// `len` random characters from `[0-9a-z]`.
pub fn random_string(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect()
}

/// Uppercases the first character and leaves the rest untouched.
///
/// ```
/// use jmni_until::string::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `snake_case` to `camelCase`: each `_` followed by a lowercase ASCII letter
/// becomes that letter uppercased. Other underscores are kept.
pub fn snake_to_camel(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('_', Some(next)) if next.is_ascii_lowercase() => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// `camelCase` to `snake_case`: each uppercase ASCII letter becomes `_` plus
/// its lowercase form, including a leading one.
pub fn camel_to_snake(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
