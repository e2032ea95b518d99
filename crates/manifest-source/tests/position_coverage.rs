use manifest_json_pointer::format_json_pointer;
use manifest_source::{build_position_index, parse};
use proptest::prelude::*;
use serde_json::Value;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-z~/ .]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            proptest::collection::btree_map("[a-z~/0-9]{0,5}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Every pointer reachable in `value`, in document order.
fn enumerate_pointers(value: &Value, path: &mut Vec<String>, out: &mut Vec<String>) {
    out.push(format_json_pointer(path));
    match value {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(i.to_string());
                enumerate_pointers(item, path, out);
                path.pop();
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                path.push(key.clone());
                enumerate_pointers(item, path, out);
                path.pop();
            }
        }
        _ => {}
    }
}

proptest! {
    // For any syntactically valid text, every enumerable pointer of the
    // parsed value appears in that text's position index.
    #[test]
    fn prop_index_covers_every_pointer(value in arb_json()) {
        for text in [
            serde_json::to_string(&value).unwrap(),
            serde_json::to_string_pretty(&value).unwrap(),
        ] {
            let parsed = parse(&text).unwrap();
            prop_assert_eq!(&parsed.value, &value);

            let mut pointers = Vec::new();
            enumerate_pointers(&parsed.value, &mut Vec::new(), &mut pointers);
            for pointer in &pointers {
                prop_assert!(
                    parsed.positions.contains_key(pointer),
                    "missing {:?} for text {:?}",
                    pointer,
                    text
                );
            }
        }
    }

    #[test]
    fn prop_positions_are_one_based_and_in_bounds(value in arb_json()) {
        let text = serde_json::to_string_pretty(&value).unwrap();
        let line_count = text.lines().count() as u32;
        let index = build_position_index(&text).unwrap();
        for (pointer, pos) in &index {
            prop_assert!(pos.line >= 1 && pos.line <= line_count.max(1), "{pointer}: {pos:?}");
            prop_assert!(pos.col >= 1, "{pointer}: {pos:?}");
        }
    }
}

#[test]
fn index_matches_editor_coordinates() {
    let text = r#"{
  "modules": [
    {"id": "m1", "title": "Home"},
    {"id": "m2"}
  ]
}"#;
    let parsed = parse(text).unwrap();
    let pos = parsed.positions.get("/modules/1/id").unwrap();
    assert_eq!((pos.line, pos.col), (4, 12));
}
