//! Path resolver: walks a parsed document along a slash-delimited key path.
//!
//! Paths address object nesting only: `a/b/c` (or `/a/b/c`) descends through
//! the keys `a`, `b`, `c`. There is no array indexing, and only string leaves
//! resolve. A segment such as `0` against an array is an ordinary key lookup
//! that fails.

use serde_json::Value;

use crate::error::ExtractError;

/// Split a path argument into its key segments.
///
/// A single leading `/` is dropped. Empty segments (from `//` or a trailing
/// `/`) are kept as empty-string keys.
pub fn segments(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.split('/').collect()
}

/// Resolve `path` against `document`, returning the string leaf if there is one.
pub fn resolve<'a>(document: &'a Value, path: &str) -> Option<&'a str> {
    lookup(document, path).ok()
}

/// Like [`resolve`], but says why resolution failed.
pub fn lookup<'a>(document: &'a Value, path: &str) -> Result<&'a str, ExtractError> {
    let mut current = document;
    let mut walked = String::new();

    for segment in segments(path) {
        if !walked.is_empty() || segment.is_empty() {
            walked.push('/');
        }
        walked.push_str(segment);

        let Value::Object(map) = current else {
            return Err(ExtractError::TypeMismatch {
                path: walked,
                found: kind_name(current),
            });
        };
        current = map
            .get(segment)
            .ok_or_else(|| ExtractError::PathNotFound(walked.clone()))?;
    }

    match current {
        Value::String(s) => Ok(s.as_str()),
        other => Err(ExtractError::TypeMismatch {
            path: walked,
            found: kind_name(other),
        }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
