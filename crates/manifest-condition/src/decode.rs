//! Total decoder from the JSON wire shape to [`ConditionNode`].
//!
//! Wire shape:
//! `{"op", "field"?, "value"?, "left"?, "right"?, "conditions"?, "condition"?}`.
//! `field`/`value` is sugar for `left: {field}, right: literal`. Nothing
//! here returns an error: malformed input decodes to `Invalid`.

use serde_json::{Map, Value};

use crate::types::{ConditionNode, Operand};

impl ConditionNode {
    /// Decode a wire node. Total: any JSON value is accepted, anything
    /// that is not a recognizable condition becomes `Invalid`.
    pub fn decode(node: &Value) -> ConditionNode {
        let Some(map) = node.as_object() else {
            return ConditionNode::Invalid;
        };
        let Some(op) = map.get("op").and_then(Value::as_str) else {
            return ConditionNode::Invalid;
        };
        match op {
            "eq" => decode_comparison(map, |left, right| ConditionNode::Eq { left, right }),
            "neq" => decode_comparison(map, |left, right| ConditionNode::Neq { left, right }),
            "gt" => decode_comparison(map, |left, right| ConditionNode::Gt { left, right }),
            "gte" => decode_comparison(map, |left, right| ConditionNode::Gte { left, right }),
            "lt" => decode_comparison(map, |left, right| ConditionNode::Lt { left, right }),
            "lte" => decode_comparison(map, |left, right| ConditionNode::Lte { left, right }),
            "in" => decode_comparison(map, |left, right| ConditionNode::In { left, right }),
            "contains" => {
                decode_comparison(map, |left, right| ConditionNode::Contains { left, right })
            }
            "exists" => decode_exists(map),
            "and" => decode_branch(map, |conditions| ConditionNode::And { conditions }),
            "or" => decode_branch(map, |conditions| ConditionNode::Or { conditions }),
            "not" => ConditionNode::Not {
                condition: Box::new(ConditionNode::decode(
                    map.get("condition").unwrap_or(&Value::Null),
                )),
            },
            _ => ConditionNode::Invalid,
        }
    }
}

fn decode_comparison(
    map: &Map<String, Value>,
    build: impl FnOnce(Operand, Operand) -> ConditionNode,
) -> ConditionNode {
    if map.contains_key("left") || map.contains_key("right") {
        return build(
            decode_operand(map.get("left")),
            decode_operand(map.get("right")),
        );
    }
    let Some(field) = map.get("field").and_then(Value::as_str) else {
        return ConditionNode::Invalid;
    };
    let right = match map.get("value") {
        Some(v) => Operand::Literal(v.clone()),
        None => Operand::Undefined,
    };
    build(Operand::Field(field.to_string()), right)
}

fn decode_exists(map: &Map<String, Value>) -> ConditionNode {
    if let Some(field) = map.get("field").and_then(Value::as_str) {
        return ConditionNode::Exists {
            target: Operand::Field(field.to_string()),
        };
    }
    if map.contains_key("left") {
        return ConditionNode::Exists {
            target: decode_operand(map.get("left")),
        };
    }
    ConditionNode::Invalid
}

fn decode_branch(
    map: &Map<String, Value>,
    build: impl FnOnce(Vec<ConditionNode>) -> ConditionNode,
) -> ConditionNode {
    let Some(conditions) = map.get("conditions").and_then(Value::as_array) else {
        return ConditionNode::Invalid;
    };
    build(conditions.iter().map(ConditionNode::decode).collect())
}

fn decode_operand(value: Option<&Value>) -> Operand {
    match value {
        None => Operand::Undefined,
        Some(Value::Object(map)) if map.contains_key("ref") => {
            match map.get("ref").and_then(Value::as_str) {
                Some(path) => Operand::Ref(path.to_string()),
                // A ref that isn't a string addresses nothing.
                None => Operand::Undefined,
            }
        }
        Some(v) => Operand::Literal(v.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_value_sugar() {
        let node = ConditionNode::decode(&json!({"op": "eq", "field": "y", "value": 5}));
        assert_eq!(
            node,
            ConditionNode::Eq {
                left: Operand::Field("y".to_string()),
                right: Operand::Literal(json!(5)),
            }
        );
    }

    #[test]
    fn left_right_refs() {
        let node = ConditionNode::decode(&json!({
            "op": "gt",
            "left": {"ref": "record.score"},
            "right": {"ref": "candidate.score"},
        }));
        assert_eq!(
            node,
            ConditionNode::Gt {
                left: Operand::Ref("record.score".to_string()),
                right: Operand::Ref("candidate.score".to_string()),
            }
        );
    }

    #[test]
    fn missing_value_is_undefined() {
        let node = ConditionNode::decode(&json!({"op": "eq", "field": "y"}));
        assert_eq!(
            node,
            ConditionNode::Eq {
                left: Operand::Field("y".to_string()),
                right: Operand::Undefined,
            }
        );
    }

    #[test]
    fn branch_children_decode_totally() {
        let node = ConditionNode::decode(&json!({
            "op": "or",
            "conditions": [{"op": "exists", "field": "a"}, "garbage"],
        }));
        let ConditionNode::Or { conditions } = node else {
            panic!("expected Or");
        };
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[1], ConditionNode::Invalid);
    }

    #[test]
    fn not_without_condition() {
        let node = ConditionNode::decode(&json!({"op": "not"}));
        assert_eq!(
            node,
            ConditionNode::Not {
                condition: Box::new(ConditionNode::Invalid),
            }
        );
    }

    #[test]
    fn malformed_shapes() {
        for node in [json!(null), json!([]), json!({"op": 1}), json!({"op": "xor"})] {
            assert_eq!(ConditionNode::decode(&node), ConditionNode::Invalid);
        }
    }

    #[test]
    fn non_string_ref_is_undefined() {
        let node = ConditionNode::decode(&json!({"op": "eq", "left": {"ref": 5}, "right": 1}));
        assert_eq!(
            node,
            ConditionNode::Eq {
                left: Operand::Undefined,
                right: Operand::Literal(json!(1)),
            }
        );
    }
}
