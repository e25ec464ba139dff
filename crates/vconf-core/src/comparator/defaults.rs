//! Default filling applied before comparison.
//!
//! Controllers often describe a setting with a handful of optional keys. Filling
//! absent keys from a defaults document on both sides keeps an omitted key from
//! being reported as drift.

use serde_json::Value;

/// Recursively insert keys from `defaults` that are absent from `target`.
///
/// Nested mappings are merged. Values already present in `target` (including
/// an explicit `null`, sequences and scalars) are left untouched. Non-mapping
/// targets are not modified.
pub fn fill_defaults(target: &mut Value, defaults: &Value) {
    if let (Value::Object(target), Value::Object(defaults)) = (target, defaults) {
        for (key, default) in defaults {
            match target.get_mut(key) {
                Some(existing) => fill_defaults(existing, default),
                None => {
                    target.insert(key.clone(), default.clone());
                }
            }
        }
    }
}

/// Non-mutating form of [`fill_defaults`].
pub fn with_defaults(value: &Value, defaults: &Value) -> Value {
    let mut filled = value.clone();
    fill_defaults(&mut filled, defaults);
    filled
}
