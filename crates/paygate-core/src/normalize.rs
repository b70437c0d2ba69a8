//! Shape dispatch for gateway responses.
//!
//! A response may carry one resource, a list of resources, or either of those nested
//! under the resource's own name (the envelope key). [`normalize`] unwraps the envelope,
//! applies the per-payload constructor, and keeps the singular/plural shape of the input.
//!
//! Only an object whose sole key is the envelope key, holding an object or an array, is an
//! envelope. `{"customer": "cus_1"}` is an ordinary payload with one unknown-to-the-record
//! scalar attribute.

use serde_json::Value;

use crate::error::{NormalizeError, Result};
use crate::payload::{Payload, ValueKind};

/// One normalized value or an ordered list of them, mirroring the input shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<T> {
    /// The input was a single payload.
    One(T),
    /// The input was a list of payloads.
    Many(Vec<T>),
}

impl<T> Shape<T> {
    /// Flatten into a list; a single value becomes a one-element list.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }

    /// The single value, if the input was singular.
    #[must_use]
    pub fn into_one(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            Self::Many(_) => None,
        }
    }

    /// Number of normalized values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    /// Whether the input was an empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Transform every contained value.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Shape<U> {
        match self {
            Self::One(item) => Shape::One(f(item)),
            Self::Many(items) => Shape::Many(items.into_iter().map(&mut f).collect()),
        }
    }
}

/// Normalize a decoded response with a per-payload constructor.
///
/// - An object whose only key is `envelope_key`, holding an object or an array, is
///   replaced by that key's value.
/// - Any other object is passed to `build`.
/// - Each element of an array goes through the single-payload procedure above, in order.
///
/// # Errors
///
/// Returns [`NormalizeError::UnsupportedShape`] for scalars and `null`, for array
/// elements that are not objects, and for element envelopes wrapping a list.
pub fn normalize<T, F>(input: &Value, envelope_key: &str, build: F) -> Result<Shape<T>>
where
    F: Fn(&Payload) -> T,
{
    dispatch(input, envelope_key, &build)
}

fn dispatch<T, F>(input: &Value, envelope_key: &str, build: &F) -> Result<Shape<T>>
where
    F: Fn(&Payload) -> T,
{
    match input {
        Value::Object(payload) => match unwrap_envelope(payload, envelope_key) {
            Some(inner) => dispatch(inner, envelope_key, build),
            None => Ok(Shape::One(build(payload))),
        },
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| single(item, envelope_key, build, Some(index)))
            .collect::<Result<Vec<_>>>()
            .map(Shape::Many),
        other => Err(unsupported(other, None)),
    }
}

fn single<T, F>(item: &Value, envelope_key: &str, build: &F, position: Option<usize>) -> Result<T>
where
    F: Fn(&Payload) -> T,
{
    match item {
        Value::Object(payload) => match unwrap_envelope(payload, envelope_key) {
            Some(inner) => single(inner, envelope_key, build, position),
            None => Ok(build(payload)),
        },
        other => Err(unsupported(other, position)),
    }
}

fn unwrap_envelope<'a>(payload: &'a Payload, envelope_key: &str) -> Option<&'a Value> {
    if payload.len() != 1 {
        return None;
    }
    payload
        .get(envelope_key)
        .filter(|inner| inner.is_object() || inner.is_array())
}

fn unsupported(value: &Value, position: Option<usize>) -> NormalizeError {
    NormalizeError::UnsupportedShape {
        found: ValueKind::of(value).as_str(),
        position,
    }
}
