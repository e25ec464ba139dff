#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use serde_json::{json, Value};
use vconf_core::comparator::get_non_compliant_configs;

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn config_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(Value::Array),
            btree_map("[a-e]", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_value_is_compliant_with_itself(value in config_value()) {
        prop_assert!(get_non_compliant_configs(&value, &value).is_empty());
    }

    #[test]
    fn prop_sequence_order_never_matters(
        (items, shuffled) in vec(any::<i32>(), 0..12)
            .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle()))
    ) {
        let diff = get_non_compliant_configs(&json!(items), &json!(shuffled));
        prop_assert!(diff.is_empty());
    }

    #[test]
    fn prop_unequal_integers_report_exact_pair(x in any::<i64>(), y in any::<i64>()) {
        prop_assume!(x != y);
        let diff = get_non_compliant_configs(&json!(x), &json!(y));
        prop_assert_eq!(diff.current, Some(json!(x)));
        prop_assert_eq!(diff.desired, Some(json!(y)));
    }

    #[test]
    fn prop_emptiness_is_symmetric(a in config_value(), b in config_value()) {
        prop_assert_eq!(
            get_non_compliant_configs(&a, &b).is_empty(),
            get_non_compliant_configs(&b, &a).is_empty()
        );
    }

    #[test]
    fn prop_flat_mapping_diff_matches_equality(
        a in btree_map("[a-d]", 0i64..3, 0..4),
        b in btree_map("[a-d]", 0i64..3, 0..4),
    ) {
        let diff = get_non_compliant_configs(&json!(a), &json!(b));
        prop_assert_eq!(diff.is_empty(), a == b);

        // Every reported key is one whose values differ
        if let Some(Value::Object(current)) = diff.current {
            for key in current.keys() {
                prop_assert_ne!(a.get(key), b.get(key));
            }
        }
    }
}
