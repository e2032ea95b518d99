//! Manifest patch engine.
//!
//! Structural edits over manifest documents addressed by JSON Pointer:
//! a closed set of operations (`add`, `remove`, `set`, `rename_id`), an
//! all-or-nothing executor that never mutates the caller's document, the
//! `PatchSet` envelope applier, and a JSON wire codec for both.
//!
//! # Example
//!
//! ```
//! use manifest_patch::{apply_ops, PatchOp};
//! use manifest_json_pointer::parse_json_pointer;
//! use serde_json::json;
//!
//! let doc = json!({"a": 1});
//! let ops = [PatchOp::Add {
//!     path: parse_json_pointer("/b"),
//!     value: json!(2),
//! }];
//! let out = apply_ops(&doc, &ops).unwrap();
//! assert_eq!(out, json!({"a": 1, "b": 2}));
//! assert_eq!(doc, json!({"a": 1})); // caller's document untouched
//! ```

pub mod apply;
pub mod codec;
pub mod patchset;
pub mod types;

pub use apply::apply_ops;
pub use codec::{op_from_json, op_to_json, patchset_from_json, patchset_to_json};
pub use patchset::apply_patchset;
pub use types::{ModulePatch, PatchError, PatchOp, PatchSet};
