//! Canonical JSON.
//!
//! Keys sorted at every depth, compact `,`/`:` separators, no whitespace,
//! UTF-8 output. Hashes of state locks and audit events are taken over this
//! form only.

use serde::Serialize;
use serde_json::{Map, Value};

/// Serialize `value` into its canonical JSON string.
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    serde_json::to_string(&sort_keys(value))
}

/// Rebuild every object with lexicographically sorted keys.
///
/// Holds regardless of whether `serde_json` was built with `preserve_order`.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, sort_keys(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
