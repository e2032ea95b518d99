//! JSON wire codec for patch operations and the PatchSet envelope.
//!
//! Works on raw `serde_json::Value` input, validating field by field —
//! the ops arrive from editors and AI agents, so nothing about the shape
//! is trusted. Unknown op names fail immediately.

use serde_json::{json, Map, Value};

use manifest_json_pointer::{format_json_pointer, parse_json_pointer, Path};

use super::types::{ModulePatch, PatchError, PatchOp, PatchSet};

// ── Operations ────────────────────────────────────────────────────────────

/// Decode a single wire operation
/// (`{"op": ..., "path": ..., "value"?: ...}`).
pub fn op_from_json(v: &Value) -> Result<PatchOp, PatchError> {
    let map = v.as_object().ok_or(PatchError::OpNotObject)?;
    let name = map
        .get("op")
        .and_then(Value::as_str)
        .ok_or(PatchError::MissingOp)?;
    match name {
        "add" => Ok(PatchOp::Add {
            path: decode_path(map)?,
            value: required_value(map, "add")?,
        }),
        "remove" => Ok(PatchOp::Remove {
            path: decode_path(map)?,
        }),
        "set" => Ok(PatchOp::Set {
            path: decode_path(map)?,
            value: required_value(map, "set")?,
        }),
        "rename_id" => Ok(PatchOp::RenameId {
            path: decode_path(map)?,
            value: required_value(map, "rename_id")?,
        }),
        other => Err(PatchError::UnsupportedOp(other.to_string())),
    }
}

/// Encode an operation back to its wire shape.
pub fn op_to_json(op: &PatchOp) -> Value {
    match op {
        PatchOp::Add { path, value } => json!({
            "op": "add",
            "path": encode_path(path),
            "value": value,
        }),
        PatchOp::Remove { path } => json!({
            "op": "remove",
            "path": encode_path(path),
        }),
        PatchOp::Set { path, value } => json!({
            "op": "set",
            "path": encode_path(path),
            "value": value,
        }),
        PatchOp::RenameId { path, value } => json!({
            "op": "rename_id",
            "path": encode_path(path),
            "value": value,
        }),
    }
}

fn decode_path(map: &Map<String, Value>) -> Result<Path, PatchError> {
    let s = map
        .get("path")
        .and_then(Value::as_str)
        .ok_or(PatchError::PathNotString)?;
    if !s.is_empty() && !s.starts_with('/') {
        return Err(PatchError::PointerNotRooted);
    }
    Ok(parse_json_pointer(s))
}

fn encode_path(path: &[String]) -> Value {
    Value::String(format_json_pointer(path))
}

fn required_value(map: &Map<String, Value>, op: &'static str) -> Result<Value, PatchError> {
    map.get("value")
        .cloned()
        .ok_or(PatchError::MissingValue(op))
}

// ── PatchSet envelope ─────────────────────────────────────────────────────

/// Decode a wire PatchSet
/// (`{"patchset_id", "summary"?, "patches": [{"module_id", "ops": [...]}]}`).
///
/// Shape is validated strictly; the one-module rule is enforced later by
/// the applier, so a rejected multi-module envelope still decodes.
pub fn patchset_from_json(v: &Value) -> Result<PatchSet, PatchError> {
    let map = v.as_object().ok_or(PatchError::PatchSetNotObject)?;
    let patchset_id = map
        .get("patchset_id")
        .and_then(Value::as_str)
        .ok_or(PatchError::PatchSetIdInvalid)?
        .to_string();
    let summary = match map.get("summary") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(PatchError::SummaryInvalid),
    };
    let entries = map
        .get("patches")
        .and_then(Value::as_array)
        .ok_or(PatchError::PatchesNotArray)?;

    let mut patches = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = entry.as_object().ok_or(PatchError::ModuleEntryNotObject)?;
        let module_id = entry
            .get("module_id")
            .and_then(Value::as_str)
            .ok_or(PatchError::ModuleIdInvalid)?
            .to_string();
        let ops = entry
            .get("ops")
            .and_then(Value::as_array)
            .ok_or(PatchError::OpsNotArray)?
            .iter()
            .map(op_from_json)
            .collect::<Result<Vec<_>, _>>()?;
        patches.push(ModulePatch { module_id, ops });
    }

    Ok(PatchSet {
        patchset_id,
        summary,
        patches,
    })
}

/// Encode a PatchSet back to its wire shape.
pub fn patchset_to_json(patchset: &PatchSet) -> Value {
    let mut map = Map::new();
    map.insert("patchset_id".to_string(), json!(patchset.patchset_id));
    if let Some(summary) = &patchset.summary {
        map.insert("summary".to_string(), json!(summary));
    }
    let patches: Vec<Value> = patchset
        .patches
        .iter()
        .map(|p| {
            json!({
                "module_id": p.module_id,
                "ops": p.ops.iter().map(op_to_json).collect::<Vec<_>>(),
            })
        })
        .collect();
    map.insert("patches".to_string(), Value::Array(patches));
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_add() {
        let op = op_from_json(&json!({"op": "add", "path": "/a/b", "value": 1})).unwrap();
        assert_eq!(
            op,
            PatchOp::Add {
                path: vec!["a".to_string(), "b".to_string()],
                value: json!(1),
            }
        );
    }

    #[test]
    fn decode_remove_ignores_value() {
        let op = op_from_json(&json!({"op": "remove", "path": "/a"})).unwrap();
        assert_eq!(op.op_name(), "remove");
    }

    #[test]
    fn unknown_op_rejected() {
        let err = op_from_json(&json!({"op": "merge", "path": "/a"})).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported op merge");
    }

    #[test]
    fn missing_op_name() {
        assert_eq!(
            op_from_json(&json!({"path": "/a"})),
            Err(PatchError::MissingOp)
        );
        assert_eq!(
            op_from_json(&json!({"op": 5, "path": "/a"})),
            Err(PatchError::MissingOp)
        );
    }

    #[test]
    fn path_must_be_rooted_string() {
        assert_eq!(
            op_from_json(&json!({"op": "remove", "path": "a/b"})),
            Err(PatchError::PointerNotRooted)
        );
        assert_eq!(
            op_from_json(&json!({"op": "remove", "path": 7})),
            Err(PatchError::PathNotString)
        );
        assert_eq!(
            op_from_json(&json!({"op": "remove"})),
            Err(PatchError::PathNotString)
        );
    }

    #[test]
    fn escaped_path_tokens_decode() {
        let op = op_from_json(&json!({"op": "remove", "path": "/a~1b/c~0d"})).unwrap();
        assert_eq!(op.path(), &vec!["a/b".to_string(), "c~d".to_string()]);
    }

    #[test]
    fn value_required_for_add_set_rename() {
        assert_eq!(
            op_from_json(&json!({"op": "add", "path": "/a"})),
            Err(PatchError::MissingValue("add"))
        );
        assert_eq!(
            op_from_json(&json!({"op": "set", "path": "/a"})),
            Err(PatchError::MissingValue("set"))
        );
        assert_eq!(
            op_from_json(&json!({"op": "rename_id", "path": "/a"})),
            Err(PatchError::MissingValue("rename_id"))
        );
    }

    #[test]
    fn op_roundtrip() {
        let wire = json!({"op": "set", "path": "/a~1b/0", "value": {"k": [1, 2]}});
        let op = op_from_json(&wire).unwrap();
        assert_eq!(op_to_json(&op), wire);
    }

    #[test]
    fn patchset_roundtrip() {
        let wire = json!({
            "patchset_id": "ps-9",
            "summary": "rename module",
            "patches": [{
                "module_id": "mod.home",
                "ops": [
                    {"op": "rename_id", "path": "/modules/0", "value": "mod.start"},
                    {"op": "remove", "path": "/modules/1"},
                ],
            }],
        });
        let ps = patchset_from_json(&wire).unwrap();
        assert_eq!(ps.patchset_id, "ps-9");
        assert_eq!(ps.patches.len(), 1);
        assert_eq!(ps.patches[0].ops.len(), 2);
        assert_eq!(patchset_to_json(&ps), wire);
    }

    #[test]
    fn patchset_shape_errors() {
        assert_eq!(
            patchset_from_json(&json!([])),
            Err(PatchError::PatchSetNotObject)
        );
        assert_eq!(
            patchset_from_json(&json!({"patches": []})),
            Err(PatchError::PatchSetIdInvalid)
        );
        assert_eq!(
            patchset_from_json(&json!({"patchset_id": "p", "patches": {}})),
            Err(PatchError::PatchesNotArray)
        );
        assert_eq!(
            patchset_from_json(&json!({
                "patchset_id": "p",
                "patches": [{"module_id": "m", "ops": {}}],
            })),
            Err(PatchError::OpsNotArray)
        );
        assert_eq!(
            patchset_from_json(&json!({
                "patchset_id": "p",
                "summary": 3,
                "patches": [],
            })),
            Err(PatchError::SummaryInvalid)
        );
    }

    #[test]
    fn bad_op_inside_patchset_fails_decode() {
        let err = patchset_from_json(&json!({
            "patchset_id": "p",
            "patches": [{"module_id": "m", "ops": [{"op": "frobnicate", "path": "/x"}]}],
        }))
        .unwrap_err();
        assert_eq!(err, PatchError::UnsupportedOp("frobnicate".to_string()));
    }
}
