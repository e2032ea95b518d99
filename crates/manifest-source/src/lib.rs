//! Position-aware JSON reader for manifest text.
//!
//! A single recursive-descent pass produces both the value tree and the
//! [`PositionIndex`] — the map from every value's JSON Pointer to the
//! (line, col) of its first token in the source text. The editor surface
//! uses the index to render inline diagnostics; keeping both outputs on
//! one grammar means they cannot disagree on edge cases.
//!
//! # Example
//!
//! ```
//! use manifest_source::parse;
//!
//! let parsed = parse("{\n  \"fields\": [true]\n}").unwrap();
//! let pos = parsed.positions.get("/fields/0").unwrap();
//! assert_eq!((pos.line, pos.col), (2, 14));
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

mod scanner;

use scanner::SourceScanner;

/// A 1-based (line, column) location in manifest source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

/// Map from canonical pointer string to the position of the value's first
/// token. Iteration order is document order.
pub type PositionIndex = IndexMap<String, Position>;

/// Result of a successful [`parse`]: the value tree and its position index.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub value: Value,
    pub positions: PositionIndex,
}

/// Parse failure, located in the source text when a location is known.
///
/// Wire payload: `{"message": string, "line"?: int, "col"?: int}`, both
/// coordinates 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub line: Option<u32>,
    pub col: Option<u32>,
}

impl ParseError {
    pub(crate) fn at(message: impl Into<String>, line: u32, col: u32) -> Self {
        ParseError {
            message: message.into(),
            line: Some(line),
            col: Some(col),
        }
    }
}

/// Parse manifest text into a value tree plus its position index.
///
/// Scalars, arrays, and objects are all valid roots. Trailing non-space
/// characters after a complete value are an error located at the stray
/// character.
pub fn parse(text: &str) -> Result<Parsed, ParseError> {
    SourceScanner::new(text).read_document()
}

/// Compute only the pointer → (line, col) index over manifest text.
///
/// Runs the same scan as [`parse`] and discards the value tree. Callers
/// normally invoke this only on text that already parsed, but malformed
/// input is reported as an error, never a panic.
pub fn build_position_index(text: &str) -> Result<PositionIndex, ParseError> {
    parse(text).map(|parsed| parsed.positions)
}
