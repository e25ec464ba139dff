//! Comparison engine.
//!
//! The core entry point is [`get_non_compliant_configs`], which compares two
//! `serde_json::Value`s with default options and produces a [`ConfigDiff`].

use crate::comparator::defaults::with_defaults;
use crate::comparator::model::{CompareOptions, ConfigDiff, ListComparison};
use serde_json::{Map, Number, Value};

/// Compute the non-compliant portions of `current` against `desired`.
///
/// Sequences are compared as sets. Mappings are compared key-wise over the
/// union of both key sets; a key missing on one side is reported only on the
/// side that has it.
pub fn get_non_compliant_configs(current: &Value, desired: &Value) -> ConfigDiff {
    Comparator::default().diff(current, desired)
}

/// Stateless comparator parameterised by [`CompareOptions`].
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    options: CompareOptions,
}

impl Comparator {
    pub fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    /// Comparator whose sequences of mappings are paired by `key`.
    pub fn by_identifier(key: impl Into<String>) -> Self {
        Self::new(CompareOptions::default().with_list_comparison(ListComparison::Identifier {
            key: key.into(),
        }))
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Diff `current` against `desired`.
    pub fn diff(&self, current: &Value, desired: &Value) -> ConfigDiff {
        match self.diff_value(current, desired) {
            Some((current, desired)) => ConfigDiff::between(current, desired),
            None => ConfigDiff::none(),
        }
    }

    /// Diff after filling keys missing from either side from `defaults`.
    pub fn diff_with_defaults(&self, current: &Value, desired: &Value, defaults: &Value) -> ConfigDiff {
        self.diff(&with_defaults(current, defaults), &with_defaults(desired, defaults))
    }

    /// True when `current` and `desired` are equivalent.
    pub fn is_compliant(&self, current: &Value, desired: &Value) -> bool {
        self.diff_value(current, desired).is_none()
    }

    fn equivalent(&self, a: &Value, b: &Value) -> bool {
        self.diff_value(a, b).is_none()
    }

    fn diff_value(&self, current: &Value, desired: &Value) -> Option<(Value, Value)> {
        match (current, desired) {
            (Value::Object(c), Value::Object(d)) => self.diff_objects(c, d),
            (Value::Array(c), Value::Array(d)) => self.diff_arrays(c, d),
            // Shape mismatch: report both values whole
            (Value::Object(_) | Value::Array(_), _) | (_, Value::Object(_) | Value::Array(_)) => {
                Some((current.clone(), desired.clone()))
            }
            _ if scalars_equal(current, desired) => None,
            _ => Some((current.clone(), desired.clone())),
        }
    }

    fn diff_objects(
        &self,
        current: &Map<String, Value>,
        desired: &Map<String, Value>,
    ) -> Option<(Value, Value)> {
        let mut current_diff = Map::new();
        let mut desired_diff = Map::new();

        for (key, current_value) in current {
            match desired.get(key) {
                Some(desired_value) => {
                    if let Some((c, d)) = self.diff_value(current_value, desired_value) {
                        current_diff.insert(key.clone(), c);
                        desired_diff.insert(key.clone(), d);
                    }
                }
                None => {
                    current_diff.insert(key.clone(), current_value.clone());
                }
            }
        }
        for (key, desired_value) in desired {
            if !current.contains_key(key) {
                desired_diff.insert(key.clone(), desired_value.clone());
            }
        }

        if current_diff.is_empty() && desired_diff.is_empty() {
            None
        } else {
            Some((Value::Object(current_diff), Value::Object(desired_diff)))
        }
    }

    fn diff_arrays(&self, current: &[Value], desired: &[Value]) -> Option<(Value, Value)> {
        match &self.options.list_comparison {
            ListComparison::AsSet => self.diff_arrays_as_set(current, desired),
            ListComparison::Identifier { key } => {
                self.diff_arrays_by_identifier(key, current, desired)
            }
            ListComparison::Ordered => self.diff_arrays_ordered(current, desired),
        }
    }

    fn diff_arrays_as_set(&self, current: &[Value], desired: &[Value]) -> Option<(Value, Value)> {
        let current_only = self.unmatched(current, desired);
        let desired_only = self.unmatched(desired, current);
        if current_only.is_empty() && desired_only.is_empty() {
            None
        } else {
            Some((Value::Array(current_only), Value::Array(desired_only)))
        }
    }

    /// Elements of `from` with no equivalent in `against`, deduplicated, in
    /// discovery order.
    fn unmatched(&self, from: &[Value], against: &[Value]) -> Vec<Value> {
        let mut out: Vec<Value> = Vec::new();
        for item in from {
            if against.iter().any(|other| self.equivalent(item, other)) {
                continue;
            }
            if out.iter().any(|seen| self.equivalent(seen, item)) {
                continue;
            }
            out.push(item.clone());
        }
        out
    }

    fn diff_arrays_ordered(&self, current: &[Value], desired: &[Value]) -> Option<(Value, Value)> {
        let same = current.len() == desired.len()
            && current
                .iter()
                .zip(desired)
                .all(|(c, d)| self.equivalent(c, d));
        if same {
            None
        } else {
            Some((Value::Array(current.to_vec()), Value::Array(desired.to_vec())))
        }
    }

    fn diff_arrays_by_identifier(
        &self,
        key: &str,
        current: &[Value],
        desired: &[Value],
    ) -> Option<(Value, Value)> {
        let keyed = current
            .iter()
            .chain(desired)
            .all(|item| item.is_object() && item.get(key).is_some());
        if !keyed {
            return self.diff_arrays_as_set(current, desired);
        }

        let mut claimed = vec![false; desired.len()];
        let mut current_diff = Vec::new();
        let mut desired_diff = Vec::new();

        for current_item in current {
            let identifier = &current_item[key];
            let partner = desired
                .iter()
                .enumerate()
                .find(|(i, d)| !claimed[*i] && self.equivalent(&d[key], identifier));
            match partner {
                Some((index, desired_item)) => {
                    claimed[index] = true;
                    if let Some((c, d)) = self.diff_value(current_item, desired_item) {
                        current_diff.push(tag_identifier(c, key, identifier));
                        desired_diff.push(tag_identifier(d, key, identifier));
                    }
                }
                None => current_diff.push(current_item.clone()),
            }
        }
        for (index, desired_item) in desired.iter().enumerate() {
            if !claimed[index] {
                desired_diff.push(desired_item.clone());
            }
        }

        if current_diff.is_empty() && desired_diff.is_empty() {
            None
        } else {
            Some((Value::Array(current_diff), Value::Array(desired_diff)))
        }
    }
}

/// Keep the identifier on a partial element so readers can tell which
/// instance drifted.
fn tag_identifier(partial: Value, key: &str, identifier: &Value) -> Value {
    match partial {
        Value::Object(mut map) => {
            map.insert(key.to_string(), identifier.clone());
            Value::Object(map)
        }
        other => other,
    }
}

fn scalars_equal(current: &Value, desired: &Value) -> bool {
    match (current, desired) {
        (Value::Number(c), Value::Number(d)) => numbers_equal(c, d),
        _ => current == desired,
    }
}

/// Integers compare exactly; anything involving a float compares as `f64`.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if a.is_f64() || b.is_f64() {
        if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
            return x == y;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_and_float_forms_are_equal() {
        assert!(get_non_compliant_configs(&json!(1), &json!(1.0)).is_empty());
        assert!(!get_non_compliant_configs(&json!(1), &json!(1.5)).is_empty());
    }

    #[test]
    fn test_negative_and_large_unsigned_differ() {
        let diff = get_non_compliant_configs(&json!(-1), &json!(u64::MAX));
        assert_eq!(diff.current, Some(json!(-1)));
        assert_eq!(diff.desired, Some(json!(u64::MAX)));
    }

    #[test]
    fn test_strings_are_case_sensitive() {
        let diff = get_non_compliant_configs(&json!("TLSv1.2"), &json!("tlsv1.2"));
        assert!(!diff.is_empty());
    }

    #[test]
    fn test_null_versus_false_differs() {
        let diff = get_non_compliant_configs(&json!(null), &json!(false));
        assert_eq!(diff.into_parts(), (Some(json!(null)), Some(json!(false))));
    }

    #[test]
    fn test_shape_mismatch_reports_whole_values() {
        let diff = get_non_compliant_configs(&json!({"a": 1}), &json!(5));
        assert_eq!(diff.current, Some(json!({"a": 1})));
        assert_eq!(diff.desired, Some(json!(5)));

        let diff = get_non_compliant_configs(&json!([1]), &json!({"a": 1}));
        assert_eq!(diff.current, Some(json!([1])));
        assert_eq!(diff.desired, Some(json!({"a": 1})));
    }

    #[test]
    fn test_tag_identifier_ignores_non_objects() {
        assert_eq!(tag_identifier(json!(3), "name", &json!("x")), json!(3));
        assert_eq!(
            tag_identifier(json!({"v": 1}), "name", &json!("x")),
            json!({"v": 1, "name": "x"})
        );
    }
}
