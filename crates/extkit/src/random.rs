//! Bounded pseudo-random integers
//!
//! Intervals follow ISO 80000-2:2019: closed `[m,n]` (2-7.2), left
//! half-open `(m,n]` (2-7.3), right half-open `[m,n)` (2-7.4) and open
//! `(m,n)` (2-7.5).
//!
//! [`sample`] draws from any [`rand::Rng`] and reports an empty interval
//! as an error. The `int_mn*` helpers draw from the thread-local
//! generator and panic instead.
//!
//! ```
//! use extkit::random::{self, Interval};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let n = random::sample(&mut rng, 1, 10, Interval::RightOpen).unwrap();
//! assert!((1..10).contains(&n));
//! ```

use std::fmt;

use rand::Rng;

use crate::error::{ExtError, Result};

/// Which bounds an interval includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    /// `[m,n]`: both bounds included
    Closed,
    /// `(m,n]`: `m` excluded, `n` included
    LeftOpen,
    /// `[m,n)`: `m` included, `n` excluded
    RightOpen,
    /// `(m,n)`: both bounds excluded
    Open,
}

impl Interval {
    /// All interval conventions
    pub const ALL: [Interval; 4] = [
        Interval::Closed,
        Interval::LeftOpen,
        Interval::RightOpen,
        Interval::Open,
    ];

    /// Smallest and largest integer in the interval, `None` if it holds none
    pub fn bounds(self, m: i64, n: i64) -> Option<(i64, i64)> {
        let (lo, hi) = match self {
            Interval::Closed => (Some(m), Some(n)),
            Interval::LeftOpen => (m.checked_add(1), Some(n)),
            Interval::RightOpen => (Some(m), n.checked_sub(1)),
            Interval::Open => (m.checked_add(1), n.checked_sub(1)),
        };
        match (lo, hi) {
            (Some(lo), Some(hi)) if lo <= hi => Some((lo, hi)),
            _ => None,
        }
    }

    /// Whether the interval holds no integer
    pub fn is_empty(self, m: i64, n: i64) -> bool {
        self.bounds(m, n).is_none()
    }

    /// Whether `x` lies in the interval
    pub fn contains(self, m: i64, n: i64, x: i64) -> bool {
        self.bounds(m, n)
            .is_some_and(|(lo, hi)| (lo..=hi).contains(&x))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let notation = match self {
            Interval::Closed => "[m,n]",
            Interval::LeftOpen => "(m,n]",
            Interval::RightOpen => "[m,n)",
            Interval::Open => "(m,n)",
        };
        f.pad(notation)
    }
}

/// Draw a uniformly distributed integer from the interval between `m` and `n`.
pub fn sample<R: Rng>(rng: &mut R, m: i64, n: i64, interval: Interval) -> Result<i64> {
    let (lo, hi) = interval
        .bounds(m, n)
        .ok_or(ExtError::EmptyInterval { interval, m, n })?;
    Ok(rng.random_range(lo..=hi))
}

fn sample_thread_local(m: i64, n: i64, interval: Interval) -> i64 {
    match sample(&mut rand::rng(), m, n, interval) {
        Ok(x) => x,
        Err(e) => panic!("invalid arguments: {e}"),
    }
}

/// Random integer in the half-open interval `[m,n)`.
///
/// # Panics
///
/// Panics if `n <= m`.
pub fn int_mn(m: i64, n: i64) -> i64 {
    sample_thread_local(m, n, Interval::RightOpen)
}

/// Random integer in the closed interval `[m,n]`.
///
/// # Panics
///
/// Panics if `n < m`.
pub fn int_mn_closed(m: i64, n: i64) -> i64 {
    sample_thread_local(m, n, Interval::Closed)
}

/// Random integer in the half-open interval `(m,n]`.
///
/// # Panics
///
/// Panics if `n <= m`.
pub fn int_mn_left_open(m: i64, n: i64) -> i64 {
    sample_thread_local(m, n, Interval::LeftOpen)
}

/// Alias for [`int_mn`].
///
/// # Panics
///
/// Panics if `n <= m`.
pub fn int_mn_right_open(m: i64, n: i64) -> i64 {
    int_mn(m, n)
}

/// Random integer in the open interval `(m,n)`.
///
/// # Panics
///
/// Panics if `n - m < 2`, when no integer lies strictly between the bounds.
pub fn int_mn_open(m: i64, n: i64) -> i64 {
    sample_thread_local(m, n, Interval::Open)
}
