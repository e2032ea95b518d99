//! Core logic for the command-line entry points.
//!
//! - `manifest-check`  — parse manifest text, report the first error
//! - `manifest-patch`  — apply a PatchSet to a manifest
//! - `manifest-locate` — resolve a JSON Pointer to line:col

use serde_json::Value;

use manifest_patch::{apply_patchset, patchset_from_json, PatchError};
use manifest_source::{build_position_index, parse, ParseError};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Parse(ParseError),
    Patch(PatchError),
    Json(serde_json::Error),
    Pointer(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => match (e.line, e.col) {
                (Some(line), Some(col)) => write!(f, "{}:{}: {}", line, col, e.message),
                _ => f.write_str(&e.message),
            },
            CliError::Patch(e) => write!(f, "{e}"),
            CliError::Json(e) => write!(f, "{e}"),
            CliError::Pointer(e) => f.write_str(e),
        }
    }
}

impl From<ParseError> for CliError {
    fn from(e: ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<PatchError> for CliError {
    fn from(e: PatchError) -> Self {
        CliError::Patch(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

// ── manifest-check ────────────────────────────────────────────────────────

/// Parse manifest text; report how many values were indexed.
pub fn check_manifest(text: &str) -> Result<String, CliError> {
    let parsed = parse(text)?;
    Ok(format!("OK: {} values", parsed.positions.len()))
}

// ── manifest-patch ────────────────────────────────────────────────────────

/// Apply a wire PatchSet to manifest text, returning the patched
/// document pretty-printed. A parse error blocks the apply.
pub fn patch_manifest(text: &str, patchset_json: &str) -> Result<String, CliError> {
    let parsed = parse(text)?;
    let wire: Value = serde_json::from_str(patchset_json)?;
    let patchset = patchset_from_json(&wire)?;
    let doc = apply_patchset(&parsed.value, &patchset)?;
    Ok(serde_json::to_string_pretty(&doc)?)
}

// ── manifest-locate ───────────────────────────────────────────────────────

/// Resolve a JSON Pointer to its `line:col` in manifest text.
pub fn locate_pointer(text: &str, pointer: &str) -> Result<String, CliError> {
    let index = build_position_index(text)?;
    match index.get(pointer) {
        Some(pos) => Ok(format!("{}:{}", pos.line, pos.col)),
        None => Err(CliError::Pointer(format!("Pointer not found: {pointer}"))),
    }
}
