//! Condition AST and evaluation context.

use serde_json::{json, Value};

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Absent operand — the JSON wire shape cannot spell `undefined`, so
    /// a missing `value`/`left`/`right` decodes to this.
    Undefined,
    /// A literal JSON value.
    Literal(Value),
    /// A bare field id, resolved against the `record` scope.
    Field(String),
    /// A `{"ref": path}` reference, resolved against the context root so
    /// it can reach any named scope (`record.x`, `candidate.score`).
    Ref(String),
}

/// A boolean condition over record data.
///
/// Closed sum type with exhaustive dispatch; the string-keyed wire shape
/// stops at [`ConditionNode::decode`]. `Invalid` is the decoded form of
/// every malformed node — it evaluates to `false`, which keeps both
/// decode and eval total.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionNode {
    Eq { left: Operand, right: Operand },
    Neq { left: Operand, right: Operand },
    Gt { left: Operand, right: Operand },
    Gte { left: Operand, right: Operand },
    Lt { left: Operand, right: Operand },
    Lte { left: Operand, right: Operand },
    In { left: Operand, right: Operand },
    Contains { left: Operand, right: Operand },
    Exists { target: Operand },
    And { conditions: Vec<ConditionNode> },
    Or { conditions: Vec<ConditionNode> },
    Not { condition: Box<ConditionNode> },
    Invalid,
}

/// Named scopes a condition is evaluated against.
///
/// `record` is always present (the row or form record under evaluation);
/// `candidate` is the optional secondary scope used by pickers and
/// relation filters.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    root: Value,
}

impl Context {
    pub fn new(record: Value) -> Self {
        Context {
            root: json!({ "record": record }),
        }
    }

    pub fn with_candidate(record: Value, candidate: Value) -> Self {
        Context {
            root: json!({ "record": record, "candidate": candidate }),
        }
    }

    /// The context root object holding all named scopes.
    pub(crate) fn root(&self) -> &Value {
        &self.root
    }

    /// A named scope, if present.
    pub fn scope(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }
}
