//! Total, optional-chained lookups over untyped JSON.
//!
//! Every function here answers "what is at this path, if anything". A missing
//! key, an out-of-range index or a step through a non-object all produce
//! `None` (or `Value::Null` for the owned variant) instead of an error.

use std::sync::OnceLock;

use serde_json::{Map, Value};

/// Follow `path` through nested objects.
///
/// Returns `None` as soon as a key is missing or an intermediate value is not
/// an object. An empty path returns `value` itself.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.as_object()?.get(*key))
}

/// Owned variant of [`lookup`]: the value at `path`, or `Value::Null`.
pub fn field(value: &Value, path: &[&str]) -> Value {
    lookup(value, path).cloned().unwrap_or(Value::Null)
}

/// First element of the array stored under `key`.
///
/// Falls back to an empty object when `value` is not an object, the key is
/// absent, the stored value is not an array, or the array is empty.
pub fn first_element<'a>(value: &'a Value, key: &str) -> &'a Value {
    lookup(value, &[key])
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .unwrap_or(empty_object())
}

fn empty_object() -> &'static Value {
    static EMPTY: OnceLock<Value> = OnceLock::new();
    EMPTY.get_or_init(|| Value::Object(Map::new()))
}
