use manifest_condition::{eval_condition, Context};
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<f32>().prop_filter("finite", |f| f.is_finite()).prop_map(|f| json!(f)),
        "[a-z.~/ ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 24, 5, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            proptest::collection::btree_map(
                // Include the operator keywords so random maps sometimes
                // look like half-formed condition nodes.
                prop_oneof![
                    "[a-z.]{0,6}".prop_map(String::from),
                    Just("op".to_string()),
                    Just("field".to_string()),
                    Just("value".to_string()),
                    Just("conditions".to_string()),
                    Just("condition".to_string()),
                    Just("left".to_string()),
                    Just("right".to_string()),
                    Just("ref".to_string()),
                ],
                inner,
                0..5
            )
            .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    // The evaluator is a total function: any JSON-serializable node and
    // any record shape produce a bool, never a panic.
    #[test]
    fn prop_eval_never_panics(node in arb_json(), record in arb_json()) {
        let ctx = Context::new(record);
        let _ = eval_condition(&node, &ctx);
    }

    // Unrecognized or structurally broken nodes are always false.
    #[test]
    fn prop_non_object_nodes_are_false(node in arb_json()) {
        prop_assume!(!node.is_object());
        let ctx = Context::new(json!({}));
        prop_assert!(!eval_condition(&node, &ctx));
    }

    // Double negation is identity for decodable nodes.
    #[test]
    fn prop_not_not_is_identity(field in "[a-z]{1,4}", record in arb_json()) {
        let ctx = Context::new(record);
        let inner = json!({"op": "exists", "field": field});
        let doubled = json!({"op": "not", "condition": {"op": "not", "condition": inner}});
        prop_assert_eq!(
            eval_condition(&inner, &ctx),
            eval_condition(&doubled, &ctx)
        );
    }
}

#[test]
fn row_filter_example() {
    // The shape a list view sends when filtering rows.
    let filter = json!({"op": "and", "conditions": [
        {"op": "in", "field": "status", "value": ["open", "blocked"]},
        {"op": "not", "condition": {"op": "exists", "field": "archived_at"}},
        {"op": "or", "conditions": [
            {"op": "gte", "field": "priority", "value": 3},
            {"op": "contains", "field": "tags", "value": "urgent"},
        ]},
    ]});

    let rows = [
        (json!({"status": "open", "priority": 4, "tags": []}), true),
        (json!({"status": "open", "priority": 1, "tags": ["urgent"]}), true),
        (json!({"status": "done", "priority": 9, "tags": []}), false),
        (
            json!({"status": "open", "priority": 9, "archived_at": "2024-01-01"}),
            false,
        ),
        (json!({"status": "blocked", "priority": 1, "tags": []}), false),
    ];
    for (record, expected) in rows {
        let ctx = Context::new(record.clone());
        assert_eq!(eval_condition(&filter, &ctx), expected, "record {record}");
    }
}
