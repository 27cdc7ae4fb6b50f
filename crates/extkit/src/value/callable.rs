//! Callable values

use std::fmt;

use crate::deep::Func;
use crate::error::{ExtError, Result};

use super::Value;

/// Type alias for native function handles to reduce complexity
pub type FuncPtr = Func<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// A native function exposed as a value.
///
/// Cloning or duplicating a `FuncValue` shares the underlying callable.
#[derive(Clone)]
pub struct FuncValue {
    /// Function name (for display/debugging)
    pub name: String,

    /// Number of arguments, `None` for variadic
    pub arity: Option<usize>,

    /// The callable itself
    pub func: FuncPtr,
}

impl FuncValue {
    /// Wrap a closure taking a fixed number of arguments
    pub fn new<F>(name: impl Into<String>, arity: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self::build(name.into(), Some(arity), Box::new(f))
    }

    /// Wrap a closure taking any number of arguments
    pub fn variadic<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self::build(name.into(), None, Box::new(f))
    }

    fn build(
        name: String,
        arity: Option<usize>,
        f: Box<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>,
    ) -> Self {
        Self {
            name,
            arity,
            func: Func::new(f),
        }
    }

    /// Call the function after checking the argument count
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        if let Some(expected) = self.arity {
            if args.len() != expected {
                return Err(ExtError::ArityMismatch {
                    name: self.name.clone(),
                    expected,
                    got: args.len(),
                });
            }
        }
        (*self.func)(args)
    }
}

impl fmt::Debug for FuncValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FuncValue({})", self.name)
    }
}
