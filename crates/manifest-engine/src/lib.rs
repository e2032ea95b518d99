//! Manifest patch & diagnostics engine.
//!
//! Facade over the engine crates plus the pieces that sit at the editor
//! boundary: localized diagnostics, the collaborator interfaces the
//! surrounding application implements, and the CLI helper functions used
//! by the binary entry points.
//!
//! Every subsystem here is pure, synchronous, and side-effect-free over
//! its explicit inputs: no I/O, no shared state, safe to call from any
//! thread or UI event handler without locking. Serializing edits to a
//! shared editor buffer is the caller's concern.
//!
//! - `manifest-json-pointer` — pointer codec and document navigation
//! - `manifest-source`       — position-aware parsing
//! - `manifest-patch`        — patch operations and the PatchSet applier
//! - `manifest-condition`    — visibility/filter condition evaluation

pub mod cli;
pub mod collab;
pub mod diagnostics;

pub use manifest_condition::{eval_condition, ConditionNode, Context};
pub use manifest_json_pointer::{
    exists, format_json_pointer, get, navigate_mut, parse_json_pointer, NavigationError, Path,
};
pub use manifest_patch::{
    apply_ops, apply_patchset, op_from_json, op_to_json, patchset_from_json, patchset_to_json,
    ModulePatch, PatchError, PatchOp, PatchSet,
};
pub use manifest_source::{
    build_position_index, parse, ParseError, Parsed, Position, PositionIndex,
};

pub use diagnostics::Diagnostic;
