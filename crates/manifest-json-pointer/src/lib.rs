//! JSON Pointer (RFC 6901) utilities for manifest documents.
//!
//! Implements the pointer codec and document navigation used by the patch
//! engine: escaping, parsing, formatting, lenient reads (`get`, `exists`)
//! and the strict parent-walk (`navigate_mut`) that mutation operations
//! are built on.
//!
//! # Example
//!
//! ```
//! use manifest_json_pointer::{parse_json_pointer, format_json_pointer, get};
//!
//! let path = parse_json_pointer("/fields/0/label");
//! assert_eq!(path, vec!["fields", "0", "label"]);
//! assert_eq!(format_json_pointer(&path), "/fields/0/label");
//!
//! let doc = serde_json::json!({"fields": [{"label": "Title"}]});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!("Title")));
//! ```

use serde_json::Value;
use thiserror::Error;

/// A single unescaped pointer token.
pub type PathStep = String;

/// A decoded JSON Pointer: ordered unescaped tokens. Empty means root.
pub type Path = Vec<PathStep>;

/// Error produced by the strict document walk.
///
/// Display strings are user-facing; the editor surfaces them verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Array index out of range")]
    IndexOutOfRange,
    #[error("Missing object key")]
    KeyNotFound,
    #[error("Cannot descend into non-container value")]
    NotContainer,
    #[error("Pointer has no parent")]
    NoParent,
}

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use manifest_json_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("no-escapes"), "no-escapes");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `~` is replaced with `~0` and `/` with `~1`.
///
/// # Example
///
/// ```
/// use manifest_json_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into path components.
///
/// - Empty string returns an empty vec (the document root)
/// - The leading `/` is stripped
/// - Each component is unescaped
///
/// # Example
///
/// ```
/// use manifest_json_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/"), vec![""]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
/// ```
pub fn parse_json_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer[1..].split('/').map(unescape_component).collect()
}

/// Format path components into a JSON Pointer string.
///
/// Returns an empty string for the root path. Exact inverse of
/// [`parse_json_pointer`].
pub fn format_json_pointer(path: &[String]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Check if a path points to the root value.
pub fn is_root(path: &[String]) -> bool {
    path.is_empty()
}

/// Check if a string represents a valid non-negative integer array index.
///
/// # Example
///
/// ```
/// use manifest_json_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Get a value from a document by path.
///
/// Lenient: returns `None` on any failure along the walk. `-` never
/// resolves through `get` (it addresses the slot past the end).
///
/// # Example
///
/// ```
/// use manifest_json_pointer::{get, parse_json_pointer};
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": [10, 20]}});
/// assert_eq!(get(&doc, &parse_json_pointer("/a/b/1")), Some(&json!(20)));
/// assert_eq!(get(&doc, &parse_json_pointer("/a/z")), None);
/// ```
pub fn get<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        match current {
            Value::Array(arr) => {
                if !is_valid_index(step) {
                    return None;
                }
                let idx: usize = step.parse().ok()?;
                current = arr.get(idx)?;
            }
            Value::Object(map) => {
                current = map.get(step)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Check whether a path resolves to an existing value.
///
/// Any failure along the walk (missing key, bad index, scalar in the
/// middle) yields `false`, never an error. Used to pick between add and
/// replace semantics for upserts.
pub fn exists(val: &Value, path: &[String]) -> bool {
    get(val, path).is_some()
}

/// Walk all tokens except the last, strictly, and return the parent
/// container together with the unresolved final token.
///
/// Every intermediate step must resolve:
/// - array parent: token must parse as an integer in `[0, len)`, else
///   [`NavigationError::IndexOutOfRange`]
/// - object parent: token must be an existing key, else
///   [`NavigationError::KeyNotFound`]
/// - any other parent: [`NavigationError::NotContainer`]
///
/// The final token is left for the caller, which decides how to use the
/// slot (insert, delete, replace).
///
/// # Example
///
/// ```
/// use manifest_json_pointer::{navigate_mut, parse_json_pointer};
/// use serde_json::json;
///
/// let mut doc = json!({"fields": [1, 2]});
/// let path = parse_json_pointer("/fields/0");
/// let (parent, token) = navigate_mut(&mut doc, &path).unwrap();
/// assert!(parent.is_array());
/// assert_eq!(token, "0");
/// ```
pub fn navigate_mut<'a, 'p>(
    doc: &'a mut Value,
    path: &'p [String],
) -> Result<(&'a mut Value, &'p str), NavigationError> {
    let (last, walk) = path.split_last().ok_or(NavigationError::NoParent)?;
    let mut current = doc;
    for step in walk {
        current = match current {
            Value::Array(arr) => {
                if !is_valid_index(step) {
                    return Err(NavigationError::IndexOutOfRange);
                }
                let idx: usize = step.parse().map_err(|_| NavigationError::IndexOutOfRange)?;
                arr.get_mut(idx).ok_or(NavigationError::IndexOutOfRange)?
            }
            Value::Object(map) => map.get_mut(step).ok_or(NavigationError::KeyNotFound)?,
            _ => return Err(NavigationError::NotContainer),
        };
    }
    Ok((current, last.as_str()))
}
