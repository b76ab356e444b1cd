//! Pretty-printer for the whole-object fields.
//!
//! Always works from the bytes it is given, never from the document cache,
//! so the output reflects the payload of the current call.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::ExtractError;

const INDENT: &[u8] = b"  ";

/// Re-render a JSON payload with two-space indentation.
///
/// Object keys keep their payload order and numbers keep their literal form.
pub fn render(raw: &[u8]) -> Result<String, ExtractError> {
    let value: Value = serde_json::from_slice(raw)?;

    let mut out = Vec::with_capacity(raw.len() + raw.len() / 2);
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut ser)
        .map_err(|e| ExtractError::Format(e.to_string()))?;

    String::from_utf8(out).map_err(|e| ExtractError::Format(e.to_string()))
}
