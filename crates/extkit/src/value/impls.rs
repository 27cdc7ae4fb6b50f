//! Value trait implementations: constructors, predicates, handle operations, From traits, PartialEq

use std::collections::HashMap;
use std::sync::Arc;

use crate::deep::{Kind, Queue};
use crate::error::{ExtError, Result};

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Create a fixed-size array value
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(items)
    }

    /// Create a slice holding `items`
    pub fn slice(items: Vec<Value>) -> Self {
        Value::Slice(Some(Shared::new(items)))
    }

    /// Create a slice of `len` nil elements with room for `capacity`
    pub fn slice_with_capacity(len: usize, capacity: usize) -> Self {
        let mut items = Vec::with_capacity(capacity.max(len));
        items.resize(len, Value::Nil);
        Value::Slice(Some(Shared::new(items)))
    }

    /// Create an empty map
    pub fn map() -> Self {
        Value::Map(Some(Shared::new(HashMap::new())))
    }

    /// Create a map from key-value pairs, rejecting unhashable keys
    pub fn map_from(entries: impl IntoIterator<Item = (Value, Value)>) -> Result<Self> {
        let map = entries
            .into_iter()
            .map(|(k, v)| Ok((HashableValue::new(k)?, v)))
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Value::Map(Some(Shared::new(map))))
    }

    /// Create a pointer to newly allocated storage holding `value`
    pub fn pointer(value: Value) -> Self {
        Value::Pointer(Some(Shared::new(value)))
    }

    /// Box a value as an interface
    pub fn interface(value: Value) -> Self {
        Value::Interface(Box::new(value))
    }

    /// Create a queue buffering at most `capacity` values
    pub fn queue(capacity: usize) -> Self {
        Value::Queue(Some(Queue::bounded(capacity)))
    }

    /// Create an unbounded queue
    pub fn unbounded_queue() -> Self {
        Value::Queue(Some(Queue::unbounded()))
    }

    /// Create a function value
    pub fn func(f: FuncValue) -> Self {
        Value::Func(Some(f))
    }

    /// Create a struct value
    pub fn structure(s: StructValue) -> Self {
        Value::Struct(s)
    }

    /// Create an enum value
    pub fn enumeration(e: EnumValue) -> Self {
        Value::Enum(e)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Kind and Predicates
    // ═══════════════════════════════════════════════════════════════════
    /// Runtime kind of this value (interfaces report `Interface`)
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Char(_) => Kind::Char,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Struct(_) => Kind::Struct,
            Value::Enum(_) => Kind::Union,
            Value::Interface(_) => Kind::Interface,
            Value::Slice(_) => Kind::Slice,
            Value::Map(_) => Kind::Map,
            Value::Pointer(_) => Kind::Pointer,
            Value::Queue(_) => Kind::Queue,
            Value::Func(_) => Kind::Func,
        }
    }

    /// The value held by any number of nested interfaces
    pub fn concrete(&self) -> &Value {
        match self {
            Value::Interface(inner) => inner.concrete(),
            other => other,
        }
    }

    /// Check if value is nil: untyped nil or a nil handle
    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Value::Nil
                | Value::Slice(None)
                | Value::Map(None)
                | Value::Pointer(None)
                | Value::Queue(None)
                | Value::Func(None)
        )
    }

    /// Check if value is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Uint(_) | Value::Float(_))
    }

    /// Check if value is callable
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Func(Some(_)))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════
    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as i64 (converts unsigned values that fit)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Uint(n) => i64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Extract as u64 (converts non-negative signed values)
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint(n) => Some(*n),
            Value::Int(n) => u64::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Extract as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract struct reference
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Extract enum reference
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Value::Enum(e) => Some(e),
            _ => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Sequences
    // ═══════════════════════════════════════════════════════════════════
    /// Number of elements, entries or buffered items; 0 for nil handles
    pub fn len(&self) -> Result<usize> {
        match self {
            Value::String(s) => Ok(s.len()),
            Value::Array(items) => Ok(items.len()),
            Value::Slice(s) => Ok(s.as_ref().map_or(0, |s| s.read().len())),
            Value::Map(m) => Ok(m.as_ref().map_or(0, |m| m.read().len())),
            Value::Queue(q) => Ok(q.as_ref().map_or(0, Queue::len)),
            other => Err(type_error("string, array, slice, map or queue", other)),
        }
    }

    /// Whether `len` is zero
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Capacity of an array, slice or bounded queue; 0 for nil handles.
    ///
    /// An unbounded queue reports `usize::MAX`.
    pub fn capacity(&self) -> Result<usize> {
        match self {
            Value::Array(items) => Ok(items.len()),
            Value::Slice(s) => Ok(s.as_ref().map_or(0, |s| s.read().capacity())),
            Value::Queue(q) => Ok(q
                .as_ref()
                .map_or(0, |q| q.capacity().unwrap_or(usize::MAX))),
            other => Err(type_error("array, slice or queue", other)),
        }
    }

    /// Element of an array or slice (a handle copy for reference-like elements)
    pub fn index(&self, index: usize) -> Result<Value> {
        match self {
            Value::Array(items) => items
                .get(index)
                .cloned()
                .ok_or(ExtError::IndexOutOfRange {
                    index,
                    len: items.len(),
                }),
            Value::Slice(Some(s)) => {
                let items = s.read();
                items
                    .get(index)
                    .cloned()
                    .ok_or(ExtError::IndexOutOfRange {
                        index,
                        len: items.len(),
                    })
            }
            Value::Slice(None) => Err(ExtError::IndexOutOfRange { index, len: 0 }),
            other => Err(type_error("array or slice", other)),
        }
    }

    /// Overwrite an element of a slice, visible through every handle
    pub fn set_index(&self, index: usize, value: Value) -> Result<()> {
        match self {
            Value::Slice(Some(s)) => {
                let mut items = s.write();
                let len = items.len();
                let slot = items
                    .get_mut(index)
                    .ok_or(ExtError::IndexOutOfRange { index, len })?;
                *slot = value;
                Ok(())
            }
            Value::Slice(None) => Err(ExtError::IndexOutOfRange { index, len: 0 }),
            other => Err(type_error("slice", other)),
        }
    }

    /// Overwrite an element of an array in place
    pub fn set_array_index(&mut self, index: usize, value: Value) -> Result<()> {
        match self {
            Value::Array(items) => {
                let len = items.len();
                let slot = items
                    .get_mut(index)
                    .ok_or(ExtError::IndexOutOfRange { index, len })?;
                *slot = value;
                Ok(())
            }
            other => Err(type_error("array", other)),
        }
    }

    /// Append to a slice; a nil slice is allocated first
    pub fn push(&mut self, value: Value) -> Result<()> {
        match self {
            Value::Slice(Some(s)) => {
                s.write().push(value);
                Ok(())
            }
            Value::Slice(slot @ None) => {
                *slot = Some(Shared::new(vec![value]));
                Ok(())
            }
            other => Err(type_error("slice", other)),
        }
    }

    /// Snapshot of the elements of an array or slice
    pub fn to_vec(&self) -> Result<Vec<Value>> {
        match self {
            Value::Array(items) => Ok(items.clone()),
            Value::Slice(s) => Ok(s.as_ref().map_or_else(Vec::new, |s| s.read().clone())),
            other => Err(type_error("array or slice", other)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Maps
    // ═══════════════════════════════════════════════════════════════════
    /// Look up a key; a nil map holds no entries
    pub fn get(&self, key: &Value) -> Result<Option<Value>> {
        match self {
            Value::Map(m) => {
                let key = HashableValue::new(key.clone())?;
                Ok(m.as_ref().and_then(|m| m.read().get(&key).cloned()))
            }
            other => Err(type_error("map", other)),
        }
    }

    /// Insert an entry, returning the previous value
    pub fn insert(&self, key: Value, value: Value) -> Result<Option<Value>> {
        match self {
            Value::Map(Some(m)) => {
                let key = HashableValue::new(key)?;
                Ok(m.write().insert(key, value))
            }
            Value::Map(None) => Err(ExtError::NilDereference(Kind::Map)),
            other => Err(type_error("map", other)),
        }
    }

    /// Remove an entry, returning its value
    pub fn remove(&self, key: &Value) -> Result<Option<Value>> {
        match self {
            Value::Map(m) => {
                let key = HashableValue::new(key.clone())?;
                Ok(m.as_ref().and_then(|m| m.write().remove(&key)))
            }
            other => Err(type_error("map", other)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Pointers
    // ═══════════════════════════════════════════════════════════════════
    /// Read the pointee
    pub fn load(&self) -> Result<Value> {
        match self {
            Value::Pointer(Some(p)) => Ok(p.read().clone()),
            Value::Pointer(None) => Err(ExtError::NilDereference(Kind::Pointer)),
            other => Err(type_error("pointer", other)),
        }
    }

    /// Overwrite the pointee, visible through every handle
    pub fn store(&self, value: Value) -> Result<()> {
        match self {
            Value::Pointer(Some(p)) => {
                *p.write() = value;
                Ok(())
            }
            Value::Pointer(None) => Err(ExtError::NilDereference(Kind::Pointer)),
            other => Err(type_error("pointer", other)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Structs
    // ═══════════════════════════════════════════════════════════════════
    /// Read a struct field
    pub fn field(&self, name: &str) -> Result<Value> {
        match self {
            Value::Struct(s) => s.get(name).cloned().ok_or_else(|| ExtError::TypeError {
                expected: format!("field {name} of {}", s.type_name),
                got: "no such field".to_string(),
            }),
            other => Err(type_error("struct", other)),
        }
    }

    /// Overwrite a struct field in place
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        match self {
            Value::Struct(s) => {
                let type_name = s.type_name.clone();
                s.set(name, value)
                    .map(|_| ())
                    .ok_or_else(|| ExtError::TypeError {
                        expected: format!("field {name} of {type_name}"),
                        got: "no such field".to_string(),
                    })
            }
            other => Err(type_error("struct", other)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queues and Functions
    // ═══════════════════════════════════════════════════════════════════
    /// Send a value, blocking while the queue is full
    pub fn send(&self, value: Value) -> Result<()> {
        match self {
            Value::Queue(Some(q)) => q
                .send(value)
                .map_err(|_| ExtError::Call("queue disconnected".to_string())),
            Value::Queue(None) => Err(ExtError::NilDereference(Kind::Queue)),
            other => Err(type_error("queue", other)),
        }
    }

    /// Receive a value if one is available without blocking
    pub fn try_recv(&self) -> Result<Option<Value>> {
        match self {
            Value::Queue(Some(q)) => Ok(q.try_recv()),
            Value::Queue(None) => Err(ExtError::NilDereference(Kind::Queue)),
            other => Err(type_error("queue", other)),
        }
    }

    /// Receive a value, blocking until one arrives
    pub fn recv(&self) -> Result<Value> {
        match self {
            Value::Queue(Some(q)) => q
                .recv()
                .ok_or_else(|| ExtError::Call("queue disconnected".to_string())),
            Value::Queue(None) => Err(ExtError::NilDereference(Kind::Queue)),
            other => Err(type_error("queue", other)),
        }
    }

    /// Call a function value
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        match self {
            Value::Func(Some(f)) => f.call(args),
            Value::Func(None) => Err(ExtError::NilDereference(Kind::Func)),
            other => Err(type_error("func", other)),
        }
    }
}

fn type_error(expected: &str, got: &Value) -> ExtError {
    ExtError::TypeError {
        expected: expected.to_string(),
        got: got.kind().to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Uint(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<StructValue> for Value {
    fn from(s: StructValue) -> Self {
        Value::Struct(s)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Value::Enum(e)
    }
}

impl From<FuncValue> for Value {
    fn from(f: FuncValue) -> Self {
        Value::func(f)
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq: structural equality
// ═══════════════════════════════════════════════════════════════════

/// Structural equality at any depth.
///
/// Handles are equal when both are nil or their contents are equal, with
/// two exceptions: queues are equal only when they are the same queue,
/// and functions only when both are nil. A nil slice or map never equals
/// an allocated empty one.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Interface(a), Value::Interface(b)) => a == b,
            (Value::Slice(a), Value::Slice(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.ptr_eq(b) || *a.read() == *b.read(),
                _ => false,
            },
            (Value::Map(a), Value::Map(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.ptr_eq(b) || *a.read() == *b.read(),
                _ => false,
            },
            (Value::Pointer(a), Value::Pointer(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.ptr_eq(b) || *a.read() == *b.read(),
                _ => false,
            },
            (Value::Queue(a), Value::Queue(b)) => match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.same_queue(b),
                _ => false,
            },
            (Value::Func(a), Value::Func(b)) => a.is_none() && b.is_none(),
            _ => false,
        }
    }
}
