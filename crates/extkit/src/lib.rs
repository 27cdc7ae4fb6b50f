//! # extkit
//!
//! Generic utility helpers.
//!
//! - [`deep`]: duplicate any supported value so that no mutable storage is
//!   shared with the original, and tell whether two values are handles to
//!   the same storage.
//! - [`value`]: a dynamically typed [`Value`] whose duplication and
//!   identity are dispatched on its runtime [`Kind`].
//! - [`random`]: bounded random integers over closed, half-open and open
//!   intervals.
//! - [`time`]: round a date and time down to a year, month, day, hour,
//!   minute or second.
//!
//! ## Deriving
//!
//! With the `derive` feature (on by default), records and enums get their
//! impls from the type definition itself, private fields included:
//!
//! ```
//! use extkit::{deep_clone, DeepClone, Identity};
//!
//! #[derive(Debug, PartialEq, DeepClone, Identity)]
//! struct S {
//!     foo: i32,
//!     bar: Vec<i32>,
//! }
//!
//! let x = S { foo: 1, bar: vec![2] };
//! let mut y = deep_clone(&x);
//! y.foo = 42;
//! y.bar.push(3);
//! assert_eq!(x, S { foo: 1, bar: vec![2] });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Lets the derive output name `::extkit` from inside this crate too.
extern crate self as extkit;

pub mod deep;
pub mod error;
pub mod random;
pub mod time;
pub mod value;

// Re-export main types
pub use deep::{
    deep_clone, is_same_reference, is_same_reference_any, AnyIdentity, DeepClone, DeepCloneAny,
    Func, Identity, Kind, Queue,
};
pub use error::{ExtError, Result};
pub use value::{
    EnumData, EnumValue, FuncPtr, FuncValue, HashableValue, Shared, StructValue, Value,
};

#[cfg(feature = "derive")]
pub use extkit_derive::{DeepClone, Identity};

/// extkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
