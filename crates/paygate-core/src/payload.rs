//! Decoded gateway payloads.

use serde_json::{Map, Value};

/// A decoded, string-keyed gateway body.
pub type Payload = Map<String, Value>;

/// The JSON kind of a value, used when reporting unexpected shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Any JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl ValueKind {
    /// Classify a JSON value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Look up an attribute by its canonical name.
///
/// The canonical `snake_case` key is tried first, then the dashed spelling
/// (`first-name`) used by some gateway encodings.
#[must_use]
pub fn lookup<'a>(payload: &'a Payload, name: &str) -> Option<&'a Value> {
    payload.get(name).or_else(|| {
        if name.contains('_') {
            payload.get(&name.replace('_', "-"))
        } else {
            None
        }
    })
}

/// Canonical attribute name for a wire key.
#[must_use]
pub fn canonical_key(key: &str) -> String {
    key.replace('-', "_")
}
