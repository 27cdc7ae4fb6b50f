//! Error types for extkit operations

use thiserror::Error;

use crate::deep::Kind;
use crate::random::Interval;

/// Main error type for extkit operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtError {
    /// An operation was applied to a value of the wrong kind
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected kind
        expected: String,
        /// Actual kind received
        got: String,
    },

    /// Write or read through a nil reference-like value
    #[error("Nil dereference: {0} is nil")]
    NilDereference(Kind),

    /// Index past the end of an array or slice
    #[error("Index out of range: index {index}, len {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length of the indexed value
        len: usize,
    },

    /// The value cannot be used as a map key
    #[error("Unhashable key: {0}")]
    UnhashableKey(Kind),

    /// A function value was called with the wrong number of arguments
    #[error("Arity mismatch: {name} expects {expected} arguments, got {got}")]
    ArityMismatch {
        /// Function name
        name: String,
        /// Declared arity
        expected: usize,
        /// Number of arguments passed
        got: usize,
    },

    /// The interval contains no integer
    #[error("Empty interval: {interval} with m = {m}, n = {n}")]
    EmptyInterval {
        /// Interval convention
        interval: Interval,
        /// Lower bound
        m: i64,
        /// Upper bound
        n: i64,
    },

    /// Not a part of a date
    #[error("Invalid date part: {0}")]
    InvalidDatePart(String),

    /// A function value reported a failure
    #[error("Call failed: {0}")]
    Call(String),
}

/// Result type alias for extkit operations
pub type Result<T> = std::result::Result<T, ExtError>;
