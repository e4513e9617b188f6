use super::value::Value;

/// Deep structural equality.
///
/// Rules, first match wins:
/// 1. The same value (by address) is equal to itself.
/// 2. Numbers compare by value; two NaNs are equal.
/// 3. If either side is `Null` or `Undefined`, both must be the same sentinel.
/// 4. Values of different type categories are unequal.
/// 5. Arrays: same length and pairwise equal elements.
/// 6. Dates: same instant.
/// 7. Patterns: same `/source/flags` text.
/// 8. Objects: same key set and equal values per key.
/// 9. Booleans and strings compare by value; opaque values by identity.
///
/// # Examples
///
/// ```
/// use jmni_until::equality::{is_equal, Value};
///
/// let a = Value::object([("x", Value::from(1)), ("y", Value::array([2, 3]))]);
/// let b = Value::object([("y", Value::array([2, 3])), ("x", Value::from(1))]);
/// assert!(is_equal(&a, &b));
/// assert!(is_equal(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
/// assert!(!is_equal(&Value::Null, &Value::Undefined));
/// ```
pub fn is_equal(a: &Value, b: &Value) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }

    if let (Value::Number(x), Value::Number(y)) = (a, b) {
        return x == y || (x.is_nan() && y.is_nan());
    }

    if a.is_nullish() || b.is_nullish() {
        return matches!(
            (a, b),
            (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined)
        );
    }

    if a.type_name() != b.type_name() {
        return false;
    }

    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| is_equal(x, y))
        }
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::Pattern(x), Value::Pattern(y)) => x.to_string() == y.to_string(),
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| is_equal(x, y)))
        }
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Opaque(x), Value::Opaque(y)) => x.ptr_eq(y),
        _ => false,
    }
}
