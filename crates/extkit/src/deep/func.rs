//! Shared callable handle

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use log::trace;

use super::{DeepClone, Identity, Kind};

/// A shared handle to a callable.
///
/// Callables carry no mutable state of their own to isolate, so a
/// duplicated `Func` is another handle to the same callable. Captured
/// state is never duplicated.
///
/// ```
/// use extkit::{deep_clone, is_same_reference, Func};
///
/// let double: Func<dyn Fn(i32) -> i32> =
///     Func::new(Box::new(|x: i32| x + x) as Box<dyn Fn(i32) -> i32>);
/// let copy = deep_clone(&double);
///
/// assert_eq!(copy(21), 42);
/// assert!(is_same_reference(&double, &copy));
/// ```
pub struct Func<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Func<F> {
    /// Wrap a callable, boxed or sized
    pub fn new(f: impl Into<Arc<F>>) -> Self {
        Self(f.into())
    }

    /// Whether both handles refer to the same callable
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<F: ?Sized> Deref for Func<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.0
    }
}

impl<F: ?Sized> Clone for Func<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> fmt::Debug for Func<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Func({:p})", Arc::as_ptr(&self.0).cast::<()>())
    }
}

impl<F: ?Sized> DeepClone for Func<F> {
    fn deep_clone(&self) -> Self {
        trace!("deep_clone: func aliased");
        self.clone()
    }
}

impl<F: ?Sized> Identity for Func<F> {
    fn kind(&self) -> Kind {
        Kind::Func
    }

    fn storage(&self) -> Option<*const ()> {
        Some(Arc::as_ptr(&self.0).cast())
    }
}
