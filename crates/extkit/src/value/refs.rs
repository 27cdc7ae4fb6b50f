//! Shared storage behind reference-like values

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{HashableValue, Value};

/// Handle to mutable storage shared by every clone of the handle.
///
/// Cloning a `Shared` copies the handle, never the storage. Lock poisoning
/// is ignored: a panic while writing leaves the data as it was written so
/// far, which is what any other handle would observe anyway.
pub struct Shared<T> {
    inner: Arc<RwLock<T>>,
}

/// Backing storage of a slice value
pub type SliceRef = Shared<Vec<Value>>;

/// Backing storage of a map value
pub type MapRef = Shared<HashMap<HashableValue, Value>>;

/// Storage a pointer value points at
pub type PointerRef = Shared<Value>;

impl<T> Shared<T> {
    /// Allocate new storage holding `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Lock the storage for reading
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the storage for writing
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether both handles refer to the same storage
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Address of the storage
    pub fn as_ptr(&self) -> *const () {
        Arc::as_ptr(&self.inner).cast()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&{:?}", &*self.read())
    }
}
