//! Core types for the manifest patch engine.

use serde_json::Value;
use thiserror::Error;

pub use manifest_json_pointer::{NavigationError, Path};

// ── Error ─────────────────────────────────────────────────────────────────

/// Everything that can go wrong while decoding or applying patches.
///
/// Display strings are the user-facing diagnostics; the editor surfaces
/// them verbatim next to the failing location.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    #[error("Path must start with '/'")]
    PointerNotRooted,
    #[error("Cannot target document root")]
    RootTarget,
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("Unsupported op {0}")]
    UnsupportedOp(String),
    #[error("Patch op must name an op")]
    MissingOp,
    #[error("Patch op must be an object")]
    OpNotObject,
    #[error("Patch op path must be a string")]
    PathNotString,
    #[error("Patch op '{0}' requires a value")]
    MissingValue(&'static str),
    #[error("PatchSet must be an object")]
    PatchSetNotObject,
    #[error("PatchSet patchset_id must be a string")]
    PatchSetIdInvalid,
    #[error("PatchSet summary must be a string")]
    SummaryInvalid,
    #[error("PatchSet patches must be an array")]
    PatchesNotArray,
    #[error("PatchSet has no patches")]
    EmptyPatchSet,
    #[error("Multi-module PatchSet not supported")]
    MultiModulePatchSet,
    #[error("PatchSet patches entries must be objects")]
    ModuleEntryNotObject,
    #[error("Patch module_id must be a string")]
    ModuleIdInvalid,
    #[error("Patch ops must be an array")]
    OpsNotArray,
}

// ── Operations ────────────────────────────────────────────────────────────

/// A single structural edit targeting one JSON Pointer.
///
/// The set is closed on purpose: adding an operation is a new enum
/// variant, and every `match` over `PatchOp` is exhaustive, so forgetting
/// an applicator or codec arm is a compile error rather than a runtime
/// "unsupported op".
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Insert into an array (index or `-` append) or set an object key
    /// unconditionally.
    Add { path: Path, value: Value },
    /// Delete an existing array element or object key.
    Remove { path: Path },
    /// Upsert: strict replace when the target exists, otherwise `add`.
    Set { path: Path, value: Value },
    /// Point at a module-like object and rewrite its `id`. Total: falls
    /// back to replacing the addressed value outright, and swallows
    /// unaddressable paths.
    RenameId { path: Path, value: Value },
}

impl PatchOp {
    /// The wire name of the operation.
    pub fn op_name(&self) -> &'static str {
        match self {
            PatchOp::Add { .. } => "add",
            PatchOp::Remove { .. } => "remove",
            PatchOp::Set { .. } => "set",
            PatchOp::RenameId { .. } => "rename_id",
        }
    }

    /// The pointer the operation targets.
    pub fn path(&self) -> &Path {
        match self {
            PatchOp::Add { path, .. } => path,
            PatchOp::Remove { path } => path,
            PatchOp::Set { path, .. } => path,
            PatchOp::RenameId { path, .. } => path,
        }
    }
}

// ── PatchSet envelope ─────────────────────────────────────────────────────

/// One module's ordered operations inside a [`PatchSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModulePatch {
    pub module_id: String,
    pub ops: Vec<PatchOp>,
}

/// Envelope grouping module patches with metadata.
///
/// Exactly one entry in `patches` is supported today; the applier rejects
/// anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchSet {
    pub patchset_id: String,
    pub summary: Option<String>,
    pub patches: Vec<ModulePatch>,
}
