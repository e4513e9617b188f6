// Shared test helpers for recording wrapped-function calls and building values.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::{Arc, Mutex};

use jmni_until::Value;

/// Collects every argument a wrapped function was called with.
#[derive(Clone)]
#[allow(dead_code)] // Used by other test files
pub struct Recorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

#[allow(dead_code)] // Used by other test files
impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Recorder {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A closure suitable for `debounce`/`throttle` that records its argument.
    pub fn sink(&self) -> impl Fn(T) + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        move |value: T| calls.lock().expect("recorder poisoned").push(value)
    }

    /// Snapshot of recorded calls.
    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().expect("recorder poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().expect("recorder poisoned").len()
    }
}

/// `{ "user": { "name": "ada", "tags": ["x", "y"] }, "n": [1, [2, 3]] }`
#[allow(dead_code)] // Used by other test files
pub fn sample_document() -> Value {
    Value::object([
        (
            "user",
            Value::object([
                ("name", Value::from("ada")),
                ("tags", Value::array(["x", "y"])),
            ]),
        ),
        (
            "n",
            Value::array([Value::from(1), Value::array([2, 3])]),
        ),
    ])
}
