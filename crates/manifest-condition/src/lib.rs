//! Condition evaluator for manifest visibility and filtering rules.
//!
//! Conditions arrive as JSON nodes (`{"op": "eq", "field": "status",
//! "value": "open"}`) and gate field visibility, required-ness, and list
//! filtering. The whole crate is one total function: any JSON value in,
//! `bool` out, never a panic or an error — a thrown exception here would
//! take the UI down with it, so malformed nodes simply evaluate to
//! `false`.
//!
//! # Example
//!
//! ```
//! use manifest_condition::{eval_condition, Context};
//! use serde_json::json;
//!
//! let node = json!({"op": "and", "conditions": [
//!     {"op": "exists", "field": "x"},
//!     {"op": "eq", "field": "y", "value": 5},
//! ]});
//!
//! let ctx = Context::new(json!({"x": "v", "y": 5}));
//! assert!(eval_condition(&node, &ctx));
//!
//! let ctx = Context::new(json!({"y": 5}));
//! assert!(!eval_condition(&node, &ctx));
//! ```

mod decode;
mod eval;
mod types;

pub use eval::eval_condition;
pub use types::{ConditionNode, Context, Operand};
