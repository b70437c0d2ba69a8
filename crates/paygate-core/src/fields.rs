//! Generic field mapping from payloads onto fixed attribute tables.
//!
//! A record declares its attribute table with `mapped_record!`. Every attribute is a
//! [`Slot`]: a typed value with a documented default that is used whenever the key is
//! absent or carries a value of the wrong kind. Keys that are not part of the table are
//! ignored.

use serde_json::{Map, Value};

use crate::payload::{canonical_key, lookup, Payload};

/// A typed attribute slot filled from a single JSON value.
pub trait Slot: Default {
    /// Convert a wire value, falling back to the default for unusable kinds.
    fn from_value(value: &Value) -> Self;
}

/// Opaque text. Strings are kept verbatim; numbers and booleans keep their literal text.
impl Slot for Option<String> {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Flags accept JSON booleans and the strings `"true"` / `"false"`. Default `false`.
impl Slot for bool {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(b) => *b,
            Value::String(s) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Open key/value mapping. Default empty.
impl Slot for Map<String, Value> {
    fn from_value(value: &Value) -> Self {
        value.as_object().cloned().unwrap_or_default()
    }
}

/// Ordered list of untyped records. Non-object elements are skipped. Default empty.
impl Slot for Vec<Payload> {
    fn from_value(value: &Value) -> Self {
        value
            .as_array()
            .map(|items| items.iter().filter_map(Value::as_object).cloned().collect())
            .unwrap_or_default()
    }
}

/// Read access to a payload by canonical attribute name.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    payload: &'a Payload,
}

impl<'a> FieldReader<'a> {
    /// Wrap a payload.
    #[must_use]
    pub const fn new(payload: &'a Payload) -> Self {
        Self { payload }
    }

    /// Fill a slot from the equally-named key, or its default when absent.
    #[must_use]
    pub fn slot<T: Slot>(&self, name: &str) -> T {
        lookup(self.payload, name).map(T::from_value).unwrap_or_default()
    }
}

/// A record built by mapping payload keys onto a fixed attribute table.
pub trait MapFields: Sized {
    /// Canonical attribute names, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Build the record from a payload. Total: never fails.
    fn map_fields(payload: &Payload) -> Self;
}

/// The generic construction primitive.
///
/// Maps `payload` onto `T`'s attribute table and reports ignored keys at trace level.
#[must_use]
pub fn construct<T: MapFields>(payload: &Payload) -> T {
    if tracing::enabled!(tracing::Level::TRACE) {
        for key in payload.keys() {
            if !T::FIELDS.contains(&canonical_key(key).as_str()) {
                tracing::trace!(
                    key = %key,
                    record = std::any::type_name::<T>(),
                    "Ignoring unmapped payload key"
                );
            }
        }
    }
    T::map_fields(payload)
}

/// Declare a record whose attributes are filled by [`MapFields`].
///
/// Each field's name is its canonical wire key and its type must implement [`Slot`].
macro_rules! mapped_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::fields::MapFields for $name {
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            fn map_fields(payload: &$crate::payload::Payload) -> Self {
                let fields = $crate::fields::FieldReader::new(payload);
                Self {
                    $($field: fields.slot::<$ty>(stringify!($field)),)*
                }
            }
        }
    };
}

pub(crate) use mapped_record;
