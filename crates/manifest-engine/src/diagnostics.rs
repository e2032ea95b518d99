//! Localized diagnostics for the editor surface.
//!
//! The editor renders inline markers from `(line, col)` pairs. Parse
//! errors carry their own location; structural errors are located by
//! resolving the failing pointer through the position index of the text
//! the document was parsed from.

use manifest_source::{ParseError, Position, PositionIndex};

/// One renderable marker: a message, optionally anchored to a pointer
/// and/or a source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub pointer: Option<String>,
    pub line: Option<u32>,
    pub col: Option<u32>,
}

impl Diagnostic {
    /// A parse error, located where the parser stopped.
    pub fn from_parse_error(err: &ParseError) -> Diagnostic {
        Diagnostic {
            message: err.message.clone(),
            pointer: None,
            line: err.line,
            col: err.col,
        }
    }

    /// A message anchored at `pointer`, located through `index` when the
    /// pointer is known to the parsed text.
    pub fn at_pointer(
        index: &PositionIndex,
        pointer: impl Into<String>,
        message: impl Into<String>,
    ) -> Diagnostic {
        let pointer = pointer.into();
        let position = locate(index, &pointer);
        Diagnostic {
            message: message.into(),
            line: position.map(|p| p.line),
            col: position.map(|p| p.col),
            pointer: Some(pointer),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.col) {
            (Some(line), Some(col)) => write!(f, "{}:{}: {}", line, col, self.message),
            _ => f.write_str(&self.message),
        }
    }
}

/// Resolve a pointer to its source position, if indexed.
pub fn locate(index: &PositionIndex, pointer: &str) -> Option<Position> {
    index.get(pointer).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use manifest_source::parse;

    #[test]
    fn parse_error_diagnostic() {
        let err = parse("{\"a\": }").unwrap_err();
        let diag = Diagnostic::from_parse_error(&err);
        assert_eq!(diag.line, Some(1));
        assert_eq!(diag.col, Some(7));
        assert!(diag.to_string().starts_with("1:7: "));
    }

    #[test]
    fn pointer_diagnostic_is_located() {
        let parsed = parse("{\n  \"fields\": [1]\n}").unwrap();
        let diag = Diagnostic::at_pointer(&parsed.positions, "/fields/0", "Missing object key");
        assert_eq!(diag.pointer.as_deref(), Some("/fields/0"));
        assert_eq!((diag.line, diag.col), (Some(2), Some(14)));
    }

    #[test]
    fn unknown_pointer_keeps_message() {
        let parsed = parse("{}").unwrap();
        let diag = Diagnostic::at_pointer(&parsed.positions, "/nope", "gone");
        assert_eq!((diag.line, diag.col), (None, None));
        assert_eq!(diag.to_string(), "gone");
    }
}
