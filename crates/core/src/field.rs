//! Field catalog: the closed set of fields the host can request.
//!
//! Each field name maps to a [`FieldKind`], a small behavior tag. Legacy
//! `jevt.*` names are aliases and map to the same tag as their `json.*`
//! counterparts, so the dispatcher never duplicates logic per name.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The extraction behavior selected by a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Object-path string lookup (`json.value`, `jevt.value`).
    Value,
    /// Whole payload re-rendered with two-space indent (`json.obj`, `jevt.obj`).
    Object,
}

impl FieldKind {
    /// Map a field name to its behavior. Unknown names yield `None`.
    pub fn lookup(name: &str) -> Option<FieldKind> {
        FIELDS
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.kind)
    }

    /// Whether requests of this kind must carry a non-empty argument.
    pub fn requires_argument(self) -> bool {
        matches!(self, FieldKind::Value)
    }
}

/// One field declaration as advertised to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Result type of the field. Always `"string"`.
    #[serde(rename = "type")]
    pub field_type: String,

    pub name: String,

    #[serde(rename = "argRequired")]
    pub arg_required: bool,

    pub desc: String,
}

struct FieldEntry {
    name: &'static str,
    kind: FieldKind,
    desc: &'static str,
}

const FIELDS: &[FieldEntry] = &[
    FieldEntry {
        name: "json.value",
        kind: FieldKind::Value,
        desc: "allows to extract a value from a JSON-encoded input. Syntax is json.value[/x/y/z], where x,y and z are levels in the JSON hierarchy.",
    },
    FieldEntry {
        name: "json.obj",
        kind: FieldKind::Object,
        desc: "the full json message as a text string.",
    },
    FieldEntry {
        name: "jevt.value",
        kind: FieldKind::Value,
        desc: "alias for json.value, provided for backwards compatibility",
    },
    FieldEntry {
        name: "jevt.obj",
        kind: FieldKind::Object,
        desc: "alias for json.obj, provided for backwards compatibility",
    },
];

/// All supported field descriptors, in declaration order.
pub fn descriptors() -> Vec<FieldDescriptor> {
    FIELDS
        .iter()
        .map(|f| FieldDescriptor {
            field_type: "string".into(),
            name: f.name.into(),
            arg_required: f.kind.requires_argument(),
            desc: f.desc.into(),
        })
        .collect()
}

/// The descriptor list serialized as the JSON array the host reads at load time.
pub fn fields_json() -> Result<String> {
    Ok(serde_json::to_string(&descriptors())?)
}
