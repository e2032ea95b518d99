//! Collaborator interfaces.
//!
//! The engine does not validate manifests against the schema and does
//! not persist drafts; the surrounding application provides both. These
//! traits and report shapes are the contract it implements — consumed
//! and exposed here, never implemented here.

use serde_json::Value;

use crate::diagnostics::Diagnostic;
use manifest_source::PositionIndex;

/// One finding from the validation service, anchored to a pointer when
/// the service can name the offending location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub pointer: Option<String>,
    pub message: String,
}

/// The validation service's verdict on a post-patch document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub strict_errors: Vec<ValidationIssue>,
    pub completeness_errors: Vec<ValidationIssue>,
    pub design_warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when nothing blocks an install.
    pub fn is_installable(&self) -> bool {
        self.errors.is_empty() && self.strict_errors.is_empty()
    }

    /// Localize every finding through the position index of the source
    /// text, in report order, for inline rendering.
    pub fn to_diagnostics(&self, index: &PositionIndex) -> Vec<Diagnostic> {
        let groups = [
            &self.errors,
            &self.strict_errors,
            &self.completeness_errors,
            &self.warnings,
            &self.design_warnings,
        ];
        groups
            .into_iter()
            .flatten()
            .map(|issue| match &issue.pointer {
                Some(pointer) => {
                    Diagnostic::at_pointer(index, pointer.clone(), issue.message.clone())
                }
                None => Diagnostic {
                    message: issue.message.clone(),
                    pointer: None,
                    line: None,
                    col: None,
                },
            })
            .collect()
    }
}

/// Backend validation of a post-patch document.
pub trait ManifestValidator {
    fn validate(&self, manifest: &Value) -> ValidationReport;
}

/// Draft persistence: save/install keyed by content hash, rollback keyed
/// by the transaction-group id an install returns.
pub trait DraftStore {
    type Error;

    fn save_draft(&mut self, content_hash: &str, manifest: &Value) -> Result<(), Self::Error>;
    fn install(&mut self, content_hash: &str) -> Result<String, Self::Error>;
    fn rollback(&mut self, txn_group: &str) -> Result<(), Self::Error>;
}
