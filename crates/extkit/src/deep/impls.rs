//! DeepClone and Identity for std and third-party types

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant, SystemTime};

use dashmap::DashMap;
use indexmap::{IndexMap, IndexSet};
use log::trace;

use super::{DeepClone, Identity, Kind};

// ═══════════════════════════════════════════════════════════════════
// Value kinds: copied, never share storage
// ═══════════════════════════════════════════════════════════════════

macro_rules! value_kind {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl DeepClone for $ty {
                #[inline]
                fn deep_clone(&self) -> Self {
                    self.clone()
                }
            }

            impl Identity for $ty {
                fn kind(&self) -> Kind {
                    Kind::$kind
                }

                fn storage(&self) -> Option<*const ()> {
                    None
                }
            }
        )+
    };
}

value_kind!(Bool => bool);
value_kind!(Int => i8, i16, i32, i64, i128, isize);
value_kind!(Uint => u8, u16, u32, u64, u128, usize);
value_kind!(Float => f32, f64);
value_kind!(Char => char);
value_kind!(String => String);
value_kind!(Tuple => ());
value_kind!(Struct => Duration, Instant, SystemTime);
value_kind!(Struct => chrono::NaiveDate, chrono::NaiveTime, chrono::NaiveDateTime);

// Text behind a shared reference can never change, so sharing it is safe.
impl DeepClone for &str {
    fn deep_clone(&self) -> Self {
        *self
    }
}

impl Identity for str {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn storage(&self) -> Option<*const ()> {
        None
    }
}

impl<Tz: chrono::TimeZone> DeepClone for chrono::DateTime<Tz> {
    fn deep_clone(&self) -> Self {
        self.clone()
    }
}

impl<T: ?Sized> DeepClone for PhantomData<T> {
    fn deep_clone(&self) -> Self {
        PhantomData
    }
}

macro_rules! fn_pointer {
    ($($arg:ident),*) => {
        impl<R, $($arg),*> DeepClone for fn($($arg),*) -> R {
            fn deep_clone(&self) -> Self {
                *self
            }
        }
    };
}

fn_pointer!();
fn_pointer!(A);
fn_pointer!(A, B);
fn_pointer!(A, B, C);
fn_pointer!(A, B, C, D);
fn_pointer!(A, B, C, D, E);
fn_pointer!(A, B, C, D, E, F);

// ═══════════════════════════════════════════════════════════════════
// Fixed aggregates
// ═══════════════════════════════════════════════════════════════════

impl<T: DeepClone, const N: usize> DeepClone for [T; N] {
    fn deep_clone(&self) -> Self {
        std::array::from_fn(|i| self[i].deep_clone())
    }
}

impl<T, const N: usize> Identity for [T; N] {
    fn kind(&self) -> Kind {
        Kind::Array
    }

    fn storage(&self) -> Option<*const ()> {
        None
    }
}

macro_rules! tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: DeepClone),+> DeepClone for ($($name,)+) {
            fn deep_clone(&self) -> Self {
                ($(self.$idx.deep_clone(),)+)
            }
        }

        impl<$($name),+> Identity for ($($name,)+) {
            fn kind(&self) -> Kind {
                Kind::Tuple
            }

            fn storage(&self) -> Option<*const ()> {
                None
            }
        }
    };
}

tuple!(A 0);
tuple!(A 0, B 1);
tuple!(A 0, B 1, C 2);
tuple!(A 0, B 1, C 2, D 3);
tuple!(A 0, B 1, C 2, D 3, E 4);
tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);
tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9);
tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10);
tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8, J 9, K 10, L 11);

// ═══════════════════════════════════════════════════════════════════
// Optional values and tagged unions
// ═══════════════════════════════════════════════════════════════════

impl<T: DeepClone> DeepClone for Option<T> {
    fn deep_clone(&self) -> Self {
        match self {
            Some(v) => Some(v.deep_clone()),
            None => {
                trace!("deep_clone: nil");
                None
            }
        }
    }
}

impl<T: Identity> Identity for Option<T> {
    fn kind(&self) -> Kind {
        self.as_ref().map_or(Kind::Nil, Identity::kind)
    }

    fn storage(&self) -> Option<*const ()> {
        self.as_ref().and_then(Identity::storage)
    }
}

impl<T: DeepClone, E: DeepClone> DeepClone for Result<T, E> {
    fn deep_clone(&self) -> Self {
        match self {
            Ok(v) => Ok(v.deep_clone()),
            Err(e) => Err(e.deep_clone()),
        }
    }
}

impl<T, E> Identity for Result<T, E> {
    fn kind(&self) -> Kind {
        Kind::Union
    }

    fn storage(&self) -> Option<*const ()> {
        None
    }
}

// ═══════════════════════════════════════════════════════════════════
// Pointers
// ═══════════════════════════════════════════════════════════════════

/// Address of a pointee, `None` when it occupies no memory.
///
/// Zero-sized pointees all live at the same dangling address, so that
/// address says nothing about identity.
fn pointee<T: ?Sized>(p: &T) -> Option<*const ()> {
    if std::mem::size_of_val(p) == 0 {
        None
    } else {
        Some(std::ptr::from_ref(p).cast())
    }
}

impl<T: DeepClone> DeepClone for Box<T> {
    fn deep_clone(&self) -> Self {
        Box::new((**self).deep_clone())
    }
}

impl<T: DeepClone> DeepClone for Rc<T> {
    fn deep_clone(&self) -> Self {
        Rc::new((**self).deep_clone())
    }
}

impl<T: DeepClone> DeepClone for Arc<T> {
    fn deep_clone(&self) -> Self {
        Arc::new((**self).deep_clone())
    }
}

impl<T: ?Sized> Identity for Box<T> {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn storage(&self) -> Option<*const ()> {
        pointee(&**self)
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    // The Rc allocation includes its counters, so it is never zero-sized.
    fn storage(&self) -> Option<*const ()> {
        Some(Rc::as_ptr(self).cast())
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn storage(&self) -> Option<*const ()> {
        Some(Arc::as_ptr(self).cast())
    }
}

impl<T: ?Sized> Identity for &T {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn storage(&self) -> Option<*const ()> {
        pointee(*self)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Cells and locks
// ═══════════════════════════════════════════════════════════════════

impl<T: DeepClone + Copy> DeepClone for Cell<T> {
    fn deep_clone(&self) -> Self {
        Cell::new(self.get().deep_clone())
    }
}

impl<T: DeepClone> DeepClone for RefCell<T> {
    fn deep_clone(&self) -> Self {
        RefCell::new(self.borrow().deep_clone())
    }
}

impl<T: DeepClone> DeepClone for Mutex<T> {
    fn deep_clone(&self) -> Self {
        let guard = self.lock().unwrap_or_else(PoisonError::into_inner);
        Mutex::new(guard.deep_clone())
    }
}

impl<T: DeepClone> DeepClone for RwLock<T> {
    fn deep_clone(&self) -> Self {
        let guard = self.read().unwrap_or_else(PoisonError::into_inner);
        RwLock::new(guard.deep_clone())
    }
}

// ═══════════════════════════════════════════════════════════════════
// Growable sequences
// ═══════════════════════════════════════════════════════════════════

impl<T: DeepClone> DeepClone for Vec<T> {
    fn deep_clone(&self) -> Self {
        // Capacity is kept so pushes on the copy behave like pushes on the source.
        let mut out = Vec::with_capacity(self.capacity());
        out.extend(self.iter().map(DeepClone::deep_clone));
        out
    }
}

impl<T: DeepClone> DeepClone for VecDeque<T> {
    fn deep_clone(&self) -> Self {
        let mut out = VecDeque::with_capacity(self.capacity());
        out.extend(self.iter().map(DeepClone::deep_clone));
        out
    }
}

impl<T> Identity for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Slice
    }

    // An unallocated vector is the nil slice.
    fn storage(&self) -> Option<*const ()> {
        (self.capacity() > 0 && std::mem::size_of::<T>() > 0).then(|| self.as_ptr().cast())
    }
}

impl<T> Identity for [T] {
    fn kind(&self) -> Kind {
        Kind::Slice
    }

    fn storage(&self) -> Option<*const ()> {
        pointee(self)
    }
}

impl<T> Identity for VecDeque<T> {
    fn kind(&self) -> Kind {
        Kind::Slice
    }

    fn storage(&self) -> Option<*const ()> {
        (self.capacity() > 0 && std::mem::size_of::<T>() > 0).then(|| std::ptr::from_ref(self).cast())
    }
}

// ═══════════════════════════════════════════════════════════════════
// Maps and sets
// ═══════════════════════════════════════════════════════════════════

impl<K, V, S> DeepClone for HashMap<K, V, S>
where
    K: DeepClone + Eq + Hash,
    V: DeepClone,
    S: BuildHasher + Clone,
{
    fn deep_clone(&self) -> Self {
        let mut out = HashMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (k, v) in self {
            out.insert(k.deep_clone(), v.deep_clone());
        }
        out
    }
}

impl<T, S> DeepClone for HashSet<T, S>
where
    T: DeepClone + Eq + Hash,
    S: BuildHasher + Clone,
{
    fn deep_clone(&self) -> Self {
        let mut out = HashSet::with_capacity_and_hasher(self.len(), self.hasher().clone());
        out.extend(self.iter().map(DeepClone::deep_clone));
        out
    }
}

impl<K, V, S> DeepClone for IndexMap<K, V, S>
where
    K: DeepClone + Eq + Hash,
    V: DeepClone,
    S: BuildHasher + Clone,
{
    fn deep_clone(&self) -> Self {
        let mut out = IndexMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (k, v) in self {
            out.insert(k.deep_clone(), v.deep_clone());
        }
        out
    }
}

impl<T, S> DeepClone for IndexSet<T, S>
where
    T: DeepClone + Eq + Hash,
    S: BuildHasher + Clone,
{
    fn deep_clone(&self) -> Self {
        let mut out = IndexSet::with_capacity_and_hasher(self.len(), self.hasher().clone());
        out.extend(self.iter().map(DeepClone::deep_clone));
        out
    }
}

impl<K, V, S> DeepClone for DashMap<K, V, S>
where
    K: DeepClone + Eq + Hash,
    V: DeepClone,
    S: BuildHasher + Clone,
{
    fn deep_clone(&self) -> Self {
        let out = DashMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for entry in self.iter() {
            out.insert(entry.key().deep_clone(), entry.value().deep_clone());
        }
        out
    }
}

impl<K: DeepClone + Ord, V: DeepClone> DeepClone for BTreeMap<K, V> {
    fn deep_clone(&self) -> Self {
        self.iter()
            .map(|(k, v)| (k.deep_clone(), v.deep_clone()))
            .collect()
    }
}

impl<T: DeepClone + Ord> DeepClone for BTreeSet<T> {
    fn deep_clone(&self) -> Self {
        self.iter().map(DeepClone::deep_clone).collect()
    }
}

macro_rules! map_kind {
    ($($ty:ident<$($param:ident),+>),+ $(,)?) => {
        $(
            impl<$($param),+> Identity for $ty<$($param),+> {
                fn kind(&self) -> Kind {
                    Kind::Map
                }

                // Maps are never nil; the map itself is the storage.
                fn storage(&self) -> Option<*const ()> {
                    Some(std::ptr::from_ref(self).cast())
                }
            }
        )+
    };
}

map_kind!(
    HashMap<K, V, S>,
    HashSet<T, S>,
    IndexMap<K, V, S>,
    IndexSet<T, S>,
    DashMap<K, V, S>,
    BTreeMap<K, V>,
    BTreeSet<T>,
);
