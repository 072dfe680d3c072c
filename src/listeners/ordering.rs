//! Listener ordering policy.
//!
//! Listeners are grouped by [`Placement`] (`AlwaysFirst` → `Normal` →
//! `AlwaysLast`) and ordered by [`Listener::index`] inside a group. Indices
//! grow with insertion; listeners added with `first` take decreasing negative
//! indices, so front insertion survives a re-sort.

use std::cmp::Ordering;

use super::listener::{Listener, Placement};

/// Compares two listeners for dispatch order.
pub fn compare_listeners(a: &Listener, b: &Listener) -> Ordering {
    a.placement()
        .cmp(&b.placement())
        .then_with(|| a.index().cmp(&b.index()))
}

/// True when the listener asks for a pinned position.
#[inline]
pub(crate) fn is_pinned(listener: &Listener) -> bool {
    listener.placement() != Placement::Normal
}
