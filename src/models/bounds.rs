//! Common view of anything that covers an inclusive address interval.

use super::address::Address;

/// An inclusive `[first, last]` address interval.
///
/// Implemented by [`Address`] (a single point), [`Network`](super::Network)
/// and [`Range`](super::Range) so containment checks accept all three.
pub trait AddressBounds {
    fn first_address(&self) -> Address;
    fn last_address(&self) -> Address;
}

impl AddressBounds for Address {
    fn first_address(&self) -> Address {
        *self
    }

    fn last_address(&self) -> Address {
        *self
    }
}

/// True when `inner` lies entirely within `outer`, both ends inclusive.
///
/// Intervals of different IP versions never contain each other.
pub(crate) fn covers<O, I>(outer: &O, inner: &I) -> bool
where
    O: AddressBounds + ?Sized,
    I: AddressBounds + ?Sized,
{
    let (first, last) = (inner.first_address(), inner.last_address());
    let (lo, hi) = (outer.first_address(), outer.last_address());
    first.version() == lo.version() && first >= lo && last <= hi
}
