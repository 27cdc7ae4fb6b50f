//! Dynamically typed values with handle semantics
//!
//! Every [`Value`] carries its runtime [`Kind`](crate::Kind). Value kinds
//! (scalars, strings, arrays, structs, enums) are copied by `clone`;
//! reference-like kinds (slices, maps, pointers, queues, functions) are
//! handles, and cloning one shares its storage with the original:
//!
//! ```
//! use extkit::{is_same_reference, DeepClone, Value};
//!
//! let x = Value::slice(vec![Value::Int(1), Value::Int(2)]);
//! let alias = x.clone();
//! alias.set_index(0, Value::Int(42)).unwrap();
//! assert_eq!(x.index(0).unwrap(), Value::Int(42));
//! assert!(is_same_reference(&x, &alias));
//!
//! let copy = x.deep_clone();
//! copy.set_index(0, Value::Int(7)).unwrap();
//! assert_eq!(x.index(0).unwrap(), Value::Int(42));
//! assert!(!is_same_reference(&x, &copy));
//! ```
//!
//! A handle holding `None` is the typed nil of its kind.

mod callable;
mod compound;
mod deep;
mod display;
mod hashable;
mod impls;
mod refs;

pub use callable::{FuncPtr, FuncValue};
pub use compound::{EnumData, EnumValue, StructValue};
pub use hashable::HashableValue;
pub use refs::{MapRef, PointerRef, Shared, SliceRef};

use std::sync::Arc;

use crate::deep::Queue;

/// Runtime value with a kind tag.
///
/// Values fall into two groups:
/// - Value kinds: copied on `clone`
/// - Reference-like handles: `clone` shares storage, `None` is nil
#[derive(Clone, Default)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Value kinds
    // ═══════════════════════════════════════════════════════════════════
    /// Untyped nil
    #[default]
    Nil,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Signed integer
    Int(i64),

    /// Unsigned integer
    Uint(u64),

    /// Floating point number
    Float(f64),

    /// Unicode scalar value
    Char(char),

    /// Immutable string
    String(Arc<str>),

    /// Fixed-size array
    Array(Vec<Value>),

    /// Struct instance
    Struct(StructValue),

    /// Enum variant instance
    Enum(EnumValue),

    /// Boxed value of any kind (may hold `Nil`)
    Interface(Box<Value>),

    // ═══════════════════════════════════════════════════════════════════
    // Reference-like handles
    // ═══════════════════════════════════════════════════════════════════
    /// Growable sequence
    Slice(Option<SliceRef>),

    /// Key-value map
    Map(Option<MapRef>),

    /// Pointer to a value
    Pointer(Option<PointerRef>),

    /// Channel-backed queue
    Queue(Option<Queue<Value>>),

    /// Native function
    Func(Option<FuncValue>),
}
