//! Evaluation of decoded condition nodes.

use std::cmp::Ordering;

use serde_json::Value;

use crate::types::{ConditionNode, Context, Operand};

/// Evaluate a wire condition node against a context. The public total
/// entry point: decode-then-eval, `false` for anything malformed.
pub fn eval_condition(node: &Value, ctx: &Context) -> bool {
    ConditionNode::decode(node).eval(ctx)
}

/// A resolved operand. Distinguishes "nothing there" from every JSON
/// value, including null.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Resolved<'a> {
    Undefined,
    Val(&'a Value),
}

impl ConditionNode {
    /// Evaluate against the context. Total: every node shape, including
    /// `Invalid`, produces a `bool`.
    pub fn eval(&self, ctx: &Context) -> bool {
        match self {
            ConditionNode::Eq { left, right } => {
                resolved_eq(&resolve(left, ctx), &resolve(right, ctx))
            }
            ConditionNode::Neq { left, right } => {
                !resolved_eq(&resolve(left, ctx), &resolve(right, ctx))
            }
            ConditionNode::Gt { left, right } => matches!(
                ordering(&resolve(left, ctx), &resolve(right, ctx)),
                Some(Ordering::Greater)
            ),
            ConditionNode::Gte { left, right } => matches!(
                ordering(&resolve(left, ctx), &resolve(right, ctx)),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            ConditionNode::Lt { left, right } => matches!(
                ordering(&resolve(left, ctx), &resolve(right, ctx)),
                Some(Ordering::Less)
            ),
            ConditionNode::Lte { left, right } => matches!(
                ordering(&resolve(left, ctx), &resolve(right, ctx)),
                Some(Ordering::Less | Ordering::Equal)
            ),
            ConditionNode::In { left, right } => {
                let (Resolved::Val(needle), Resolved::Val(Value::Array(haystack))) =
                    (resolve(left, ctx), resolve(right, ctx))
                else {
                    return false;
                };
                haystack.iter().any(|item| item == needle)
            }
            ConditionNode::Contains { left, right } => {
                match (resolve(left, ctx), resolve(right, ctx)) {
                    (Resolved::Val(Value::Array(items)), Resolved::Val(needle)) => {
                        items.iter().any(|item| item == needle)
                    }
                    (Resolved::Val(Value::String(s)), Resolved::Val(Value::String(needle))) => {
                        s.contains(needle.as_str())
                    }
                    _ => false,
                }
            }
            ConditionNode::Exists { target } => match resolve(target, ctx) {
                Resolved::Undefined => false,
                Resolved::Val(Value::Null) => false,
                Resolved::Val(Value::String(s)) => !s.is_empty(),
                Resolved::Val(_) => true,
            },
            ConditionNode::And { conditions } => conditions.iter().all(|c| c.eval(ctx)),
            ConditionNode::Or { conditions } => conditions.iter().any(|c| c.eval(ctx)),
            ConditionNode::Not { condition } => !condition.eval(ctx),
            ConditionNode::Invalid => false,
        }
    }
}

fn resolve<'a>(operand: &'a Operand, ctx: &'a Context) -> Resolved<'a> {
    match operand {
        Operand::Undefined => Resolved::Undefined,
        Operand::Literal(v) => Resolved::Val(v),
        Operand::Field(field) => match ctx.scope("record") {
            Some(record) => lookup(record, field),
            None => Resolved::Undefined,
        },
        Operand::Ref(path) => lookup(ctx.root(), path),
    }
}

/// Dotted-path resolution. The whole dotted string is tried as a literal
/// key first — manifest field ids legitimately contain dots
/// (`workorder.title`) — and only then does the segment walk run.
fn lookup<'a>(root: &'a Value, path: &str) -> Resolved<'a> {
    if let Value::Object(map) = root {
        if let Some(v) = map.get(path) {
            return Resolved::Val(v);
        }
    }
    let mut current = root;
    for segment in path.split('.') {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(v) => current = v,
            None => return Resolved::Undefined,
        }
    }
    Resolved::Val(current)
}

fn resolved_eq(a: &Resolved<'_>, b: &Resolved<'_>) -> bool {
    match (a, b) {
        (Resolved::Undefined, Resolved::Undefined) => true,
        (Resolved::Val(x), Resolved::Val(y)) => x == y,
        _ => false,
    }
}

/// Ordered comparison: number-to-number or string-to-string only.
/// Undefined operands and mixed types do not order.
fn ordering(l: &Resolved<'_>, r: &Resolved<'_>) -> Option<Ordering> {
    let (Resolved::Val(l), Resolved::Val(r)) = (l, r) else {
        return None;
    };
    match (l, r) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}
