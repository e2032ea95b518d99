//! Patch operation executor.
//!
//! Applies an ordered list of operations to a private deep copy of the
//! document. All-or-nothing: the first failing operation aborts the whole
//! call and the caller's document is never touched, success or failure.

use manifest_json_pointer::{exists, is_valid_index, navigate_mut, NavigationError};
use serde_json::Value;

use super::types::{PatchError, PatchOp};

/// Apply `ops` in order to a clone of `doc`.
///
/// Returns the patched document, or the first error encountered. No
/// partial application is observable either way.
pub fn apply_ops(doc: &Value, ops: &[PatchOp]) -> Result<Value, PatchError> {
    let mut working = doc.clone();
    for op in ops {
        apply_op(&mut working, op)?;
    }
    Ok(working)
}

fn apply_op(doc: &mut Value, op: &PatchOp) -> Result<(), PatchError> {
    match op {
        PatchOp::Add { path, value } => apply_add(doc, path, value.clone()),
        PatchOp::Remove { path } => apply_remove(doc, path),
        PatchOp::Set { path, value } => apply_set(doc, path, value.clone()),
        PatchOp::RenameId { path, value } => {
            apply_rename_id(doc, path, value.clone());
            Ok(())
        }
    }
}

// ── Applicators ───────────────────────────────────────────────────────────

fn apply_add(doc: &mut Value, path: &[String], value: Value) -> Result<(), PatchError> {
    if path.is_empty() {
        return Err(PatchError::RootTarget);
    }
    let (parent, token) = navigate_mut(doc, path)?;
    match parent {
        Value::Array(arr) => {
            if token == "-" {
                arr.push(value);
                return Ok(());
            }
            let idx = parse_index(token)?;
            // Insertion permits the one-past-the-end slot.
            if idx > arr.len() {
                return Err(NavigationError::IndexOutOfRange.into());
            }
            arr.insert(idx, value);
            Ok(())
        }
        Value::Object(map) => {
            // Create or overwrite; add on objects is unconditional.
            map.insert(token.to_string(), value);
            Ok(())
        }
        _ => Err(NavigationError::NotContainer.into()),
    }
}

fn apply_remove(doc: &mut Value, path: &[String]) -> Result<(), PatchError> {
    if path.is_empty() {
        return Err(PatchError::RootTarget);
    }
    let (parent, token) = navigate_mut(doc, path)?;
    match parent {
        Value::Array(arr) => {
            let idx = parse_index(token)?;
            if idx >= arr.len() {
                return Err(NavigationError::IndexOutOfRange.into());
            }
            arr.remove(idx);
            Ok(())
        }
        Value::Object(map) => {
            if map.remove(token).is_none() {
                return Err(NavigationError::KeyNotFound.into());
            }
            Ok(())
        }
        _ => Err(NavigationError::NotContainer.into()),
    }
}

fn apply_set(doc: &mut Value, path: &[String], value: Value) -> Result<(), PatchError> {
    if path.is_empty() {
        return Err(PatchError::RootTarget);
    }
    if exists(doc, path) {
        apply_replace(doc, path, value)
    } else {
        apply_add(doc, path, value)
    }
}

/// Strict replace: the target slot must already exist.
fn apply_replace(doc: &mut Value, path: &[String], value: Value) -> Result<(), PatchError> {
    let (parent, token) = navigate_mut(doc, path)?;
    match parent {
        Value::Array(arr) => {
            let idx = parse_index(token)?;
            if idx >= arr.len() {
                return Err(NavigationError::IndexOutOfRange.into());
            }
            arr[idx] = value;
            Ok(())
        }
        Value::Object(map) => {
            if !map.contains_key(token) {
                return Err(NavigationError::KeyNotFound.into());
            }
            map.insert(token.to_string(), value);
            Ok(())
        }
        _ => Err(NavigationError::NotContainer.into()),
    }
}

/// Rewrite the `id` of the module-like object at `path`; replace the
/// value wholesale when it is not an object. Unaddressable paths are
/// swallowed. Total by design — agent-generated patches rename modules
/// without knowing their exact shape, so this op has no error path.
fn apply_rename_id(doc: &mut Value, path: &[String], value: Value) {
    if path.is_empty() {
        match doc {
            Value::Object(map) => {
                map.insert("id".to_string(), value);
            }
            other => *other = value,
        }
        return;
    }
    let Ok((parent, token)) = navigate_mut(doc, path) else {
        return;
    };
    match parent {
        Value::Object(map) => {
            if matches!(map.get(token), Some(Value::Object(_))) {
                if let Some(Value::Object(target)) = map.get_mut(token) {
                    target.insert("id".to_string(), value);
                }
            } else {
                map.insert(token.to_string(), value);
            }
        }
        Value::Array(arr) => {
            let Some(slot) = token
                .parse::<usize>()
                .ok()
                .and_then(|idx| arr.get_mut(idx))
            else {
                return;
            };
            match slot {
                Value::Object(target) => {
                    target.insert("id".to_string(), value);
                }
                other => *other = value,
            }
        }
        _ => {}
    }
}

fn parse_index(token: &str) -> Result<usize, PatchError> {
    if !is_valid_index(token) {
        return Err(NavigationError::IndexOutOfRange.into());
    }
    token
        .parse()
        .map_err(|_| NavigationError::IndexOutOfRange.into())
}
