//! Two-digit zero padding.

use crate::error_handling::{Result, UtilError};

/// Pads a number to at least two characters with a leading zero.
///
/// ```
/// use jmni_until::number::pad_zero;
///
/// assert_eq!(pad_zero(5), "05");
/// assert_eq!(pad_zero(15), "15");
/// ```
pub fn pad_zero(n: i64) -> String {
    format!("{:02}", n)
}

/// Pads numeric text the same way as [`pad_zero`].
///
/// The text is trimmed and read as a number first, so `"007"` becomes `"07"` and
/// `"1.50"` becomes `"1.5"`. Empty text counts as zero. Magnitudes of at least
/// `1e21` or below `1e-6` print in exponent form with a signed exponent, so
/// `"1e21"` becomes `"1e+21"` and `"0.0000001"` becomes `"1e-7"`.
///
/// # Errors
///
/// `UtilError::InvalidNumber` when the text is not a finite number. The
/// rejection is also logged at error level.
pub fn pad_zero_str(text: &str) -> Result<String> {
    let trimmed = text.trim();
    let value = if trimmed.is_empty() {
        Some(0.0)
    } else {
        trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
    };

    match value {
        Some(n) => {
            // -0 prints as 0
            let n = if n == 0.0 { 0.0 } else { n };
            Ok(format!("{:0>2}", number_to_text(n)))
        }
        None => {
            log::error!("Invalid Input: {:?} is not a number", text);
            Err(UtilError::InvalidNumber(text.to_string()))
        }
    }
}

/// Shortest text for `n`, switching to exponent form outside `[1e-6, 1e21)`.
fn number_to_text(n: f64) -> String {
    let abs = n.abs();
    if abs >= 1e21 || (abs != 0.0 && abs < 1e-6) {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        }
    } else {
        n.to_string()
    }
}
