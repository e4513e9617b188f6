//! Structural equality.
//!
//! `is_equal` compares two dynamic `Value`s by content: sequences element by
//! element, mappings key by key (order irrelevant), dates by instant and patterns
//! by their `/source/flags` text. NaN equals NaN. Functions and other opaque
//! values are only equal to themselves.
//!
//! `Value` is an owned tree, so cyclic inputs cannot be built and the recursion
//! always terminates.

mod deep_equal;
mod value;

pub use deep_equal::is_equal;
pub use value::{Opaque, Pattern, Value};
