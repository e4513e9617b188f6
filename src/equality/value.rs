use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use regex::{Regex, RegexBuilder};

use crate::error_handling::UtilError;

/// A dynamically typed value as handled by script-style code.
///
/// `PartialEq` is structural and goes through [`is_equal`](super::is_equal),
/// so `NaN == NaN` holds for values even though it does not for `f64`.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absent value.
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number, always a double.
    Number(f64),
    /// String.
    String(String),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Plain key/value mapping; key order is irrelevant.
    Object(BTreeMap<String, Value>),
    /// Point in time.
    Date(DateTime<Utc>),
    /// Regular expression.
    Pattern(Pattern),
    /// Function, map, set or any other value compared by identity only.
    Opaque(Opaque),
}

impl Value {
    /// Name of the type category used when comparing values of different kinds.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Date(_) => "date",
            Value::Pattern(_) => "regexp",
            Value::Opaque(o) => o.kind(),
        }
    }

    /// True for `Null` and `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Builds an object from key/value pairs.
    pub fn object<K, V, I>(entries: I) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds an array from anything convertible into values.
    pub fn array<V, I>(items: I) -> Value
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Date from epoch milliseconds; `None` when out of range.
    pub fn date_from_millis(ms: i64) -> Option<Value> {
        Utc.timestamp_millis_opt(ms).single().map(Value::Date)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        super::is_equal(self, other)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Pattern(p)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::Opaque(o)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items),
            serde_json::Value::Object(map) => Value::object(map),
        }
    }
}

/// Canonical flag order, matching how regex literals print their flags.
const FLAG_ORDER: &str = "dgimsuvy";

/// A regular expression kept as source text plus flags.
///
/// Flags are normalized into canonical order and deduplicated, so
/// `Pattern::new("a", "ig")` prints as `/a/gi`. A bare `/` in the source is
/// stored escaped, so `a/b` and `a\/b` are the same pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    flags: String,
}

impl Pattern {
    /// Creates a pattern. Unknown flag characters are dropped.
    pub fn new(source: impl Into<String>, flags: &str) -> Self {
        let flags = FLAG_ORDER.chars().filter(|f| flags.contains(*f)).collect();
        Pattern {
            source: escape_slashes(&source.into()),
            flags,
        }
    }

    /// Pattern source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Normalized flags.
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Compiles the pattern, honoring the `i`, `m` and `s` flags.
    pub fn compile(&self) -> Result<Regex, UtilError> {
        let regex = RegexBuilder::new(&self.source)
            .case_insensitive(self.flags.contains('i'))
            .multi_line(self.flags.contains('m'))
            .dot_matches_new_line(self.flags.contains('s'))
            .build()?;
        Ok(regex)
    }
}

/// Escapes every `/` that is neither already escaped nor inside a `[...]` class.
fn escape_slashes(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut escaped = false;
    let mut in_class = false;
    for c in source.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.source.is_empty() {
            "(?:)"
        } else {
            &self.source
        };
        write!(f, "/{}/{}", source, self.flags)
    }
}

/// A value with no structural comparison; equal only to clones of itself.
#[derive(Clone)]
pub struct Opaque {
    kind: Arc<str>,
    inner: Arc<dyn Any + Send + Sync>,
}

impl Opaque {
    /// Wraps `value` under the category name `kind` (e.g. `"function"`, `"map"`).
    pub fn new<T: Any + Send + Sync>(kind: &str, value: T) -> Self {
        Opaque {
            kind: Arc::from(kind),
            inner: Arc::new(value),
        }
    }

    /// Category name.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Identity comparison.
    pub fn ptr_eq(&self, other: &Opaque) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }

    /// Borrows the wrapped value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.kind)
    }
}
