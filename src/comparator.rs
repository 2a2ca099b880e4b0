//! Orderings used by the skiplist.
//!
//! The skiplist has an associated comparator which **must** be well-behaved.
//! Specifically, given some ordering function `f(a, b)`, it must satisfy the
//! following properties:
//!
//! - Be well defined: `f(a, b)` should always return the same value
//! - Be anti-symmetric: `f(a, b) == Greater` iff `f(b, a) == Less` and
//!   `f(a, b) == Equal == f(b, a)`.
//! - Be transitive: If `f(a, b) == Greater` and `f(b, c) == Greater` then
//!   `f(a, c) == Greater`.
//!
//! Failure to satisfy these properties leaves the list in an unspecified (but
//! memory safe) order.

use std::cmp::Ordering;

/// Determines the order of the elements within a skiplist.
///
/// Any closure `Fn(&T, &T) -> Ordering` is a comparator.
pub trait Comparator<T: ?Sized> {
    /// Compare `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The natural ordering of `T` as given by its [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<T> Comparator<T> for Natural
where
    T: Ord + ?Sized,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}
