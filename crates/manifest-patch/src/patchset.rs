//! PatchSet applier.
//!
//! Validates the envelope, then delegates to the operation executor.
//! Exactly one module entry is supported; the multi-module shape is
//! reserved and rejected outright.

use serde_json::Value;

use super::apply::apply_ops;
use super::types::{PatchError, PatchSet};

/// Validate the `patches` envelope and apply the single module's ops.
///
/// The caller's document is never mutated; see [`apply_ops`].
pub fn apply_patchset(doc: &Value, patchset: &PatchSet) -> Result<Value, PatchError> {
    if patchset.patches.is_empty() {
        return Err(PatchError::EmptyPatchSet);
    }
    if patchset.patches.len() != 1 {
        return Err(PatchError::MultiModulePatchSet);
    }
    apply_ops(doc, &patchset.patches[0].ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ModulePatch, PatchOp};
    use manifest_json_pointer::parse_json_pointer;
    use serde_json::json;

    fn module(ops: Vec<PatchOp>) -> ModulePatch {
        ModulePatch {
            module_id: "mod.home".to_string(),
            ops,
        }
    }

    fn patchset(patches: Vec<ModulePatch>) -> PatchSet {
        PatchSet {
            patchset_id: "ps-1".to_string(),
            summary: Some("test".to_string()),
            patches,
        }
    }

    #[test]
    fn single_module_applies() {
        let doc = json!({"a": 1});
        let ps = patchset(vec![module(vec![PatchOp::Add {
            path: parse_json_pointer("/b"),
            value: json!(2),
        }])]);
        assert_eq!(apply_patchset(&doc, &ps).unwrap(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn empty_patches_rejected() {
        let doc = json!({});
        assert_eq!(
            apply_patchset(&doc, &patchset(vec![])),
            Err(PatchError::EmptyPatchSet)
        );
    }

    #[test]
    fn multi_module_rejected() {
        let doc = json!({});
        let ps = patchset(vec![module(vec![]), module(vec![])]);
        let err = apply_patchset(&doc, &ps).unwrap_err();
        assert_eq!(err.to_string(), "Multi-module PatchSet not supported");
    }

    #[test]
    fn empty_ops_is_a_clone() {
        let doc = json!({"a": [1, 2]});
        assert_eq!(apply_patchset(&doc, &patchset(vec![module(vec![])])).unwrap(), doc);
    }
}
