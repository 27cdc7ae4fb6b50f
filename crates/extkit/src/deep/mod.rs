//! Deep duplication and reference identity
//!
//! Two independent operations live here:
//!
//! - [`deep_clone`] builds a value of the same type that shares no
//!   reference-like storage with its source, at any depth.
//! - [`is_same_reference`] reports whether two values are handles to the
//!   very same storage.
//!
//! Both are driven by traits resolved at compile time. Every supported
//! kind has exactly one impl of [`DeepClone`] and [`Identity`]; records and
//! enums get theirs from `#[derive(DeepClone, Identity)]`, which keeps the
//! duplication logic inside the type so private fields need no special
//! access. A type without an impl is rejected by the compiler instead of
//! being aliased.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use extkit::{deep_clone, is_same_reference};
//!
//! let x = HashMap::from([("foo", 1), ("bar", 2)]);
//! let mut y = deep_clone(&x);
//! y.insert("foo", 42);
//!
//! assert_eq!(x["foo"], 1);
//! assert_eq!(y["foo"], 42);
//! assert!(is_same_reference(&x, &x));
//! assert!(!is_same_reference(&x, &y));
//! ```

mod any;
mod func;
mod impls;
mod queue;

pub use any::{AnyIdentity, DeepCloneAny};
pub use func::Func;
pub use queue::Queue;

use std::fmt;

use log::trace;

/// Runtime kind of a value, used to pick duplication and identity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Untyped nil: no value at all
    Nil,
    /// `bool`
    Bool,
    /// Signed integers
    Int,
    /// Unsigned integers
    Uint,
    /// Floating point numbers
    Float,
    /// Unicode scalar value
    Char,
    /// Immutable or owned text
    String,
    /// Fixed-size aggregate
    Array,
    /// Heterogeneous fixed-size aggregate
    Tuple,
    /// Record with named or positional fields
    Struct,
    /// Tagged union (enum)
    Union,
    /// Boxed value of any concrete type
    Interface,
    /// Key-value map or set
    Map,
    /// Owning or shared pointer
    Pointer,
    /// Growable sequence
    Slice,
    /// Channel-backed queue
    Queue,
    /// Callable
    Func,
}

impl Kind {
    /// Whether values of this kind are handles to mutable storage.
    pub fn is_reference_like(self) -> bool {
        matches!(
            self,
            Kind::Map | Kind::Pointer | Kind::Slice | Kind::Queue | Kind::Func
        )
    }

    /// Lowercase name of the kind
    pub fn name(self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Tuple => "tuple",
            Kind::Struct => "struct",
            Kind::Union => "union",
            Kind::Interface => "interface",
            Kind::Map => "map",
            Kind::Pointer => "pointer",
            Kind::Slice => "slice",
            Kind::Queue => "queue",
            Kind::Func => "func",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Duplication that shares no reference-like storage with the source.
///
/// The result is structurally equal to `self`, with two exceptions:
/// a [`Queue`] duplicates to an empty queue of the same capacity, and a
/// [`Func`] duplicates to another handle of the same callable.
///
/// Shared references other than `&str` have no impl, so a value holding
/// one, even inside a `Cell`, is rejected rather than aliased:
///
/// ```compile_fail
/// use std::cell::{Cell, RefCell};
/// use extkit::deep_clone;
///
/// let shared = RefCell::new(vec![1]);
/// let x = Cell::new(&shared);
/// let _ = deep_clone(&x);
/// ```
pub trait DeepClone: Sized {
    /// Duplicate `self`, recursing through every compound kind.
    fn deep_clone(&self) -> Self;
}

/// Access to the storage a value refers to.
///
/// Value kinds report no storage; so do null reference-like values.
pub trait Identity {
    /// Runtime kind of this value
    fn kind(&self) -> Kind;

    /// Address of the shared backing storage, if any.
    fn storage(&self) -> Option<*const ()>;
}

/// Duplicate `x` so that no mutable storage is shared with it.
///
/// See [`DeepClone`] for the per-kind rules.
pub fn deep_clone<T: DeepClone>(x: &T) -> T {
    x.deep_clone()
}

/// Report whether `x` and `y` are handles to the same storage.
///
/// Always false for value kinds, which are distinct copies even when
/// equal, and for null reference-like values.
pub fn is_same_reference<T: Identity + ?Sized>(x: &T, y: &T) -> bool {
    same_storage(x.kind(), y.kind(), || (x.storage(), y.storage()))
}

/// Untyped form of [`is_same_reference`].
///
/// `None` stands for the untyped nil. Values of different concrete types
/// are never the same reference.
pub fn is_same_reference_any(x: Option<&dyn AnyIdentity>, y: Option<&dyn AnyIdentity>) -> bool {
    let (Some(x), Some(y)) = (x, y) else {
        trace!("is: nil");
        return false;
    };
    if x.concrete_type_id() != y.concrete_type_id() {
        trace!("is: {} != {}", x.concrete_type_name(), y.concrete_type_name());
        return false;
    }
    same_storage(x.kind(), y.kind(), || (x.storage(), y.storage()))
}

fn same_storage(
    kx: Kind,
    ky: Kind,
    storages: impl FnOnce() -> (Option<*const ()>, Option<*const ()>),
) -> bool {
    if kx != ky {
        trace!("is: {kx} != {ky}");
        return false;
    }
    if !kx.is_reference_like() {
        trace!("is: default");
        return false;
    }
    match storages() {
        (Some(a), Some(b)) => {
            trace!("is: {a:?} == {b:?}");
            a == b
        }
        _ => {
            // Can't check identity of a nil
            trace!("is: nil {kx}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_like_kinds() {
        let reference_like = [Kind::Map, Kind::Pointer, Kind::Slice, Kind::Queue, Kind::Func];
        for kind in reference_like {
            assert!(kind.is_reference_like(), "{kind}");
        }
        assert!(!Kind::Array.is_reference_like());
        assert!(!Kind::Interface.is_reference_like());
        assert!(!Kind::Nil.is_reference_like());
    }

    #[test]
    fn test_kind_display_pads() {
        assert_eq!(Kind::Map.to_string(), "map");
        assert_eq!(format!("{:>7}", Kind::Slice), "  slice");
    }

    #[test]
    fn test_mismatched_kinds_are_not_same() {
        let x: Option<Box<i32>> = Some(Box::new(1));
        let y: Option<Box<i32>> = None;
        assert!(!is_same_reference(&x, &y));
        assert!(!is_same_reference(&y, &y));
        assert!(is_same_reference(&x, &x));
    }
}
