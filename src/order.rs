//! Order strategies: how a container places and finds elements.
//!
//! Both strategies report positions like `slice::binary_search`: `Ok(i)`
//! when slot `i` holds an element equal to the tag, `Err(i)` with the slot
//! where such an element would be inserted.

use crate::compare::ComparableTo;
use core::cmp::Ordering;
use core::ops::Deref;

/// Placement strategy of a container, fixed by its type.
pub trait Order {
    /// True if elements are kept in ascending `compare` order.
    const ORDERED: bool;

    /// Locate an element equal to `tag`.
    fn search<P, Q>(slots: &[Option<P>], tag: &Q) -> Result<usize, usize>
    where
        P: Deref,
        P::Target: ComparableTo<Q>,
        Q: ?Sized;

    /// Slot a new element goes to; `Ok(i)` means slot `i` already holds an
    /// equal element.
    fn insertion_point<P>(slots: &[Option<P>], element: &P::Target) -> Result<usize, usize>
    where
        P: Deref,
        P::Target: ComparableTo<P::Target>;
}

/// Ascending order by `compare`; binary search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ordered;

/// Insertion order; linear search, inserts append.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unordered;

impl Order for Ordered {
    const ORDERED: bool = true;

    fn search<P, Q>(slots: &[Option<P>], tag: &Q) -> Result<usize, usize>
    where
        P: Deref,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        let (mut lo, mut hi) = (0, slots.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            // Gaps carry no order: probe the first live slot at or after `mid`.
            let Some(probe) = (mid..hi).find(|&j| slots[j].is_some()) else {
                hi = mid;
                continue;
            };
            match slots[probe].as_deref().map(|e| e.compare(tag)) {
                Some(Ordering::Equal) => return Ok(probe),
                Some(Ordering::Greater) => hi = mid,
                _ => lo = probe + 1,
            }
        }
        Err(lo)
    }

    #[inline]
    fn insertion_point<P>(slots: &[Option<P>], element: &P::Target) -> Result<usize, usize>
    where
        P: Deref,
        P::Target: ComparableTo<P::Target>,
    {
        Self::search(slots, element)
    }
}

impl Order for Unordered {
    const ORDERED: bool = false;

    fn search<P, Q>(slots: &[Option<P>], tag: &Q) -> Result<usize, usize>
    where
        P: Deref,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        slots
            .iter()
            .position(|s| {
                s.as_deref()
                    .is_some_and(|e| e.compare(tag) == Ordering::Equal)
            })
            .ok_or(slots.len())
    }

    #[inline]
    fn insertion_point<P>(slots: &[Option<P>], _element: &P::Target) -> Result<usize, usize>
    where
        P: Deref,
        P::Target: ComparableTo<P::Target>,
    {
        Err(slots.len())
    }
}
