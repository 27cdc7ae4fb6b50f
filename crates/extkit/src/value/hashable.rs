//! Hashable wrapper for Value to enable use as map keys

use std::hash::{Hash, Hasher};

use crate::deep::{Identity, Kind};
use crate::error::{ExtError, Result};

use super::{EnumData, Value};

/// A Value that is known to be usable as a map key.
///
/// Scalars, strings and aggregates of hashable values compare by content.
/// Pointers and queues compare by identity, the same storage or both nil.
/// Floats, slices, maps and functions are rejected.
#[derive(Debug, Clone)]
pub struct HashableValue(Value);

impl HashableValue {
    /// Wrap a value, rejecting kinds that cannot be keys
    pub fn new(value: Value) -> Result<Self> {
        match unhashable_kind(&value) {
            Some(kind) => Err(ExtError::UnhashableKey(kind)),
            None => Ok(Self(value)),
        }
    }

    /// Check if a value can be hashed
    pub fn is_hashable(value: &Value) -> bool {
        unhashable_kind(value).is_none()
    }

    /// Borrow the wrapped value
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Unwrap into the key value
    pub fn into_inner(self) -> Value {
        self.0
    }

    // Wraps without checking; callers must preserve hashability.
    pub(super) fn new_unchecked(value: Value) -> Self {
        Self(value)
    }
}

/// First kind inside `value` that cannot be hashed
fn unhashable_kind(value: &Value) -> Option<Kind> {
    match value {
        Value::Nil
        | Value::Bool(_)
        | Value::Int(_)
        | Value::Uint(_)
        | Value::Char(_)
        | Value::String(_)
        | Value::Pointer(_)
        | Value::Queue(_) => None,
        Value::Float(_) | Value::Slice(_) | Value::Map(_) | Value::Func(_) => Some(value.kind()),
        Value::Array(items) => items.iter().find_map(unhashable_kind),
        Value::Struct(s) => s.fields.values().find_map(unhashable_kind),
        Value::Enum(e) => e.data.values().find_map(unhashable_kind),
        Value::Interface(inner) => unhashable_kind(inner),
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    // Hash the discriminant first
    std::mem::discriminant(value).hash(state);

    match value {
        Value::Nil => {}
        Value::Bool(b) => b.hash(state),
        Value::Int(n) => n.hash(state),
        Value::Uint(n) => n.hash(state),
        Value::Char(c) => c.hash(state),
        Value::String(s) => s.hash(state),
        Value::Array(items) => {
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Struct(s) => {
            s.type_name.hash(state);
            for (name, field) in &s.fields {
                name.hash(state);
                hash_value(field, state);
            }
        }
        Value::Enum(e) => {
            e.type_name.hash(state);
            e.variant.hash(state);
            for field in e.data.values() {
                hash_value(field, state);
            }
        }
        Value::Interface(inner) => hash_value(inner, state),
        Value::Pointer(_) | Value::Queue(_) => value.storage().hash(state),
        // Rejected by HashableValue::new
        Value::Float(_) | Value::Slice(_) | Value::Map(_) | Value::Func(_) => {}
    }
}

fn key_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Uint(x), Value::Uint(y)) => x == y,
        (Value::Char(x), Value::Char(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| key_eq(x, y))
        }
        (Value::Struct(x), Value::Struct(y)) => {
            x.type_name == y.type_name
                && x.fields.len() == y.fields.len()
                && x.fields
                    .iter()
                    .zip(&y.fields)
                    .all(|((kx, vx), (ky, vy))| kx == ky && key_eq(vx, vy))
        }
        (Value::Enum(x), Value::Enum(y)) => {
            x.type_name == y.type_name
                && x.variant == y.variant
                && enum_data_key_eq(&x.data, &y.data)
        }
        (Value::Interface(x), Value::Interface(y)) => key_eq(x, y),
        (Value::Pointer(_), Value::Pointer(_)) | (Value::Queue(_), Value::Queue(_)) => {
            a.storage() == b.storage()
        }
        _ => false,
    }
}

fn enum_data_key_eq(a: &EnumData, b: &EnumData) -> bool {
    match (a, b) {
        (EnumData::Unit, EnumData::Unit) => true,
        (EnumData::Tuple(xs), EnumData::Tuple(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| key_eq(x, y))
        }
        (EnumData::Struct(xs), EnumData::Struct(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|((kx, vx), (ky, vy))| kx == ky && key_eq(vx, vy))
        }
        _ => false,
    }
}

impl Hash for HashableValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

impl PartialEq for HashableValue {
    fn eq(&self, other: &Self) -> bool {
        key_eq(&self.0, &other.0)
    }
}

impl Eq for HashableValue {}

impl TryFrom<Value> for HashableValue {
    type Error = ExtError;

    fn try_from(value: Value) -> Result<Self> {
        Self::new(value)
    }
}
