//! Container: growable slot array with ordered or unordered placement.
//!
//! The pointer type `P` decides ownership (see [`crate::pointer`]); the
//! strategy `O` decides placement (see [`crate::order`]). Lookups take any
//! tag `Q` the element type is [`ComparableTo`].
//!
//! # Time complexity
//! - `n`: number of slots, `i`: position addressed.
//!
//! | Method | Ordered | Unordered |
//! |-|-|-|
//! | `get` / `contains` / `search` | `O(log n)` | `O(n)` |
//! | `insert` | `O(log n + n - i)` | `O(1)`* |
//! | `remove` | `O(log n + n - i)` | `O(n)` |
//! | `insert_at` / `remove_at` | `O(n - i)` | `O(n - i)` |
//! | `shift` | `O(n)` | `O(n)` |
//!
//! \* amortized; a full container grows by its increment.

use crate::compare::ComparableTo;
use crate::config::ContainerConfig;
use crate::cursor::Cursor;
use crate::error::{ContainerError, Result};
use crate::order::{Order, Ordered};
use crate::pointer::{FromElement, Pointer};
use crate::reentrancy::DebugReentrancy;
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut, Index};

/// What to do when an ordered insert meets an equal element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the stored element and hand the incoming one back.
    #[default]
    Discard,
    /// Store the incoming element and hand the old one back.
    Replace,
}

/// Outcome of an insert. Pointers handed back are dropped by the caller;
/// for owning containers that destroys the element.
#[derive(Debug)]
pub enum Insertion<P> {
    Inserted(usize),
    Discarded(P),
    Replaced(usize, P),
}

impl<P> Insertion<P> {
    /// Slot now holding the incoming element, if it was stored.
    pub fn index(&self) -> Option<usize> {
        match self {
            Insertion::Inserted(i) | Insertion::Replaced(i, _) => Some(*i),
            Insertion::Discarded(_) => None,
        }
    }

    pub fn is_inserted(&self) -> bool {
        matches!(self, Insertion::Inserted(_))
    }
}

pub struct Container<P, O = Ordered> {
    slots: Vec<Option<P>>,
    capacity: usize,
    increment: usize,
    reentrancy: DebugReentrancy,
    _order: PhantomData<O>,
}

/// Container owning its elements.
pub type OwnedContainer<T, O = Ordered> = Container<Box<T>, O>;

/// Container borrowing elements owned elsewhere.
pub type BorrowedContainer<'a, T, O = Ordered> = Container<&'a T, O>;

/// Iterator over the live elements of a container; gaps are skipped.
pub struct Iter<'a, P> {
    it: core::slice::Iter<'a, Option<P>>,
}

impl<'a, P: Deref> Iterator for Iter<'a, P> {
    type Item = &'a P::Target;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.by_ref().find_map(|s| s.as_deref())
    }
}

impl<'a, P: Deref> DoubleEndedIterator for Iter<'a, P> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.by_ref().rev().find_map(|s| s.as_deref())
    }
}

/// Mutable iterator over the live elements of a container.
pub struct IterMut<'a, P> {
    it: core::slice::IterMut<'a, Option<P>>,
}

impl<'a, P: DerefMut> Iterator for IterMut<'a, P> {
    type Item = &'a mut P::Target;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.by_ref().find_map(|s| s.as_deref_mut())
    }
}

impl<P: Pointer, O: Order> Container<P, O> {
    /// Container with the default sizing.
    pub fn new() -> Self {
        let config = ContainerConfig::default();
        Self {
            slots: Vec::with_capacity(config.initial_capacity),
            capacity: config.initial_capacity,
            increment: config.effective_increment(),
            reentrancy: DebugReentrancy::new(),
            _order: PhantomData,
        }
    }

    pub fn with_capacity(initial_capacity: usize, growth_increment: usize) -> Result<Self> {
        Self::with_config(ContainerConfig::new(initial_capacity, growth_increment))
    }

    pub fn with_config(config: ContainerConfig) -> Result<Self> {
        config.validate()?;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(config.initial_capacity)
            .map_err(|_| ContainerError::AllocationFailure {
                requested: config.initial_capacity,
            })?;
        Ok(Self {
            slots,
            capacity: config.initial_capacity,
            increment: config.effective_increment(),
            reentrancy: DebugReentrancy::new(),
            _order: PhantomData,
        })
    }

    /// Number of slots in use, gaps included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots holding an element.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn growth_increment(&self) -> usize {
        self.increment
    }

    pub fn owns_elements(&self) -> bool {
        P::OWNING
    }

    pub fn is_ordered(&self) -> bool {
        O::ORDERED
    }

    /// Make room for `needed` slots in total. Grows to at least
    /// `capacity + increment`; leaves the container untouched on failure.
    fn verify_capacity(&mut self, needed: usize) -> Result<()> {
        if needed <= self.capacity {
            return Ok(());
        }
        let target = needed.max(self.capacity.saturating_add(self.increment));
        self.slots
            .try_reserve_exact(target - self.slots.len())
            .map_err(|_| ContainerError::AllocationFailure { requested: target })?;
        log::trace!("container grown from {} to {} slots", self.capacity, target);
        self.capacity = target;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(ContainerError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }

    /// Append `element` without looking at order or duplicates.
    ///
    /// On an ordered container this is only correct if `element` is not
    /// less than the current last element.
    pub fn push(&mut self, element: P) -> Result<usize> {
        self.verify_capacity(self.slots.len() + 1)?;
        self.slots.push(Some(element));
        Ok(self.slots.len() - 1)
    }

    /// Insert at `position`, shifting later slots right. With
    /// `delete_existing`, an element already at `position` is replaced and
    /// returned instead.
    ///
    /// Order is not checked: misplacing an element in an ordered container
    /// breaks later searches.
    pub fn insert_at(
        &mut self,
        element: P,
        position: usize,
        delete_existing: bool,
    ) -> Result<Option<P>> {
        let len = self.slots.len();
        if position > len {
            return Err(ContainerError::IndexOutOfRange {
                index: position,
                len,
            });
        }
        if delete_existing && position < len {
            return Ok(self.slots[position].replace(element));
        }
        self.verify_capacity(len + 1)?;
        self.slots.insert(position, Some(element));
        Ok(None)
    }

    /// Store `element` exactly at `position`. A position past the end
    /// extends the container with empty slots; a position inside it
    /// replaces whatever the slot held.
    pub fn put_at(&mut self, element: P, position: usize) -> Result<Option<P>> {
        if position < self.slots.len() {
            return Ok(self.slots[position].replace(element));
        }
        let needed = position
            .checked_add(1)
            .ok_or(ContainerError::AllocationFailure { requested: position })?;
        self.verify_capacity(needed)?;
        if position > self.slots.len() {
            log::trace!(
                "filling slots {}..{} with gaps",
                self.slots.len(),
                position
            );
        }
        self.slots.resize_with(position, || None);
        self.slots.push(Some(element));
        Ok(None)
    }

    /// Element at `position`.
    pub fn get_at(&self, position: usize) -> Result<&P::Target> {
        self.check_index(position)?;
        self.slots[position]
            .as_deref()
            .ok_or(ContainerError::EmptySlot { index: position })
    }

    pub fn get_at_mut(&mut self, position: usize) -> Result<&mut P::Target>
    where
        P: DerefMut,
    {
        self.check_index(position)?;
        self.slots[position]
            .as_deref_mut()
            .ok_or(ContainerError::EmptySlot { index: position })
    }

    /// Element at `position`, or `None` past the end or on a gap.
    pub fn slot(&self, position: usize) -> Option<&P::Target> {
        self.slots.get(position).and_then(|s| s.as_deref())
    }

    pub fn slot_mut(&mut self, position: usize) -> Option<&mut P::Target>
    where
        P: DerefMut,
    {
        self.slots.get_mut(position).and_then(|s| s.as_deref_mut())
    }

    /// Remove the slot at `position`, shifting later slots left. Returns
    /// `None` if the slot was a gap.
    pub fn remove_at(&mut self, position: usize) -> Result<Option<P>> {
        self.check_index(position)?;
        Ok(self.slots.remove(position))
    }

    /// Take the element at `position` and leave an empty slot behind.
    pub fn take_at(&mut self, position: usize) -> Result<Option<P>> {
        self.check_index(position)?;
        Ok(self.slots[position].take())
    }

    /// Remove and drop the slot at `position`.
    pub fn delete_at(&mut self, position: usize) -> Result<()> {
        self.remove_at(position).map(drop)
    }

    /// Swap two slots. Order is not preserved.
    pub fn exchange(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.slots.swap(a, b);
        Ok(())
    }

    /// Make `new_first` the first slot. Without `reverse` this is a left
    /// rotation: `[a,b,c,d,e]` shifted to 2 is `[c,d,e,a,b]`. With `reverse`
    /// the cyclic sequence is also walked backwards: `[c,b,a,e,d]`.
    pub fn shift(&mut self, new_first: usize, reverse: bool) -> Result<()> {
        self.check_index(new_first)?;
        if reverse {
            let (head, tail) = self.slots.split_at_mut(new_first + 1);
            head.reverse();
            tail.reverse();
        } else {
            self.slots.rotate_left(new_first);
        }
        Ok(())
    }

    /// Drop every slot. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Drop every slot and re-size the container. `0` keeps the current
    /// value for either parameter. On failure nothing is dropped.
    pub fn reset(&mut self, capacity: usize, increment: usize) -> Result<()> {
        if capacity != 0 && capacity != self.capacity {
            let mut slots = Vec::new();
            slots
                .try_reserve_exact(capacity)
                .map_err(|_| ContainerError::AllocationFailure {
                    requested: capacity,
                })?;
            // Old elements drop here, after the new storage exists.
            self.slots = slots;
            self.capacity = capacity;
        } else {
            self.slots.clear();
        }
        if increment != 0 {
            self.increment = increment;
        }
        log::debug!(
            "container reset to capacity {} increment {}",
            self.capacity,
            self.increment
        );
        Ok(())
    }

    /// Move every element of `source` into `self`. `source` ends empty.
    pub fn transfer_from<O2: Order>(&mut self, source: &mut Container<P, O2>) -> Result<()>
    where
        P::Target: ComparableTo<P::Target>,
    {
        self.verify_capacity(self.slots.len() + source.slots.len())?;
        for element in source.slots.drain(..).flatten() {
            // Duplicates rejected by an ordered target are dropped here.
            let _ = self.insert(element)?;
        }
        Ok(())
    }

    /// Position of an element equal to `tag`: `Ok(i)` if found, otherwise
    /// `Err(i)` with the slot an insert would use.
    pub fn search<Q>(&self, tag: &Q) -> Result<usize, usize>
    where
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        let _g = self.reentrancy.enter("search");
        O::search(&self.slots, tag)
    }

    pub fn get<Q>(&self, tag: &Q) -> Option<&P::Target>
    where
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        let _g = self.reentrancy.enter("get");
        let i = O::search(&self.slots, tag).ok()?;
        self.slots[i].as_deref()
    }

    pub fn get_mut<Q>(&mut self, tag: &Q) -> Option<&mut P::Target>
    where
        P: DerefMut,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        let _g = self.reentrancy.enter("get_mut");
        let i = O::search(&self.slots, tag).ok()?;
        self.slots[i].as_deref_mut()
    }

    pub fn contains<Q>(&self, tag: &Q) -> bool
    where
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        let _g = self.reentrancy.enter("contains");
        O::search(&self.slots, tag).is_ok()
    }

    /// Insert respecting the container's order; an equal element already
    /// stored wins and the incoming one is handed back.
    pub fn insert(&mut self, element: P) -> Result<Insertion<P>>
    where
        P::Target: ComparableTo<P::Target>,
    {
        self.insert_with_policy(element, DuplicatePolicy::Discard)
    }

    /// Insert respecting the container's order. Unordered containers always
    /// append, so `policy` only matters for ordered ones.
    pub fn insert_with_policy(&mut self, element: P, policy: DuplicatePolicy) -> Result<Insertion<P>>
    where
        P::Target: ComparableTo<P::Target>,
    {
        let found = {
            let _g = self.reentrancy.enter("insert");
            O::insertion_point(&self.slots, &*element)
        };
        match found {
            Ok(i) => match policy {
                DuplicatePolicy::Discard => Ok(Insertion::Discarded(element)),
                DuplicatePolicy::Replace => match self.slots[i].replace(element) {
                    Some(old) => Ok(Insertion::Replaced(i, old)),
                    None => Ok(Insertion::Inserted(i)),
                },
            },
            Err(i) => {
                self.verify_capacity(self.slots.len() + 1)?;
                self.slots.insert(i, Some(element));
                Ok(Insertion::Inserted(i))
            }
        }
    }

    /// Find-or-create: the element equal to `tag`, or a new one built by
    /// `make` and inserted where `tag` belongs.
    pub fn get_insert_with<Q, F>(&mut self, tag: &Q, make: F) -> Result<&P::Target>
    where
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
        F: FnOnce(&Q) -> P,
    {
        let i = self.locate_or_create(tag, make)?;
        self.slots[i]
            .as_deref()
            .ok_or(ContainerError::EmptySlot { index: i })
    }

    /// Mutable find-or-create.
    pub fn get_insert_with_mut<Q, F>(&mut self, tag: &Q, make: F) -> Result<&mut P::Target>
    where
        P: DerefMut,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
        F: FnOnce(&Q) -> P,
    {
        let i = self.locate_or_create(tag, make)?;
        self.slots[i]
            .as_deref_mut()
            .ok_or(ContainerError::EmptySlot { index: i })
    }

    fn locate_or_create<Q, F>(&mut self, tag: &Q, make: F) -> Result<usize>
    where
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
        F: FnOnce(&Q) -> P,
    {
        let found = {
            let _g = self.reentrancy.enter("get_insert");
            O::search(&self.slots, tag)
        };
        match found {
            Ok(i) => Ok(i),
            Err(i) => {
                self.verify_capacity(self.slots.len() + 1)?;
                let element = make(tag);
                self.slots.insert(i, Some(element));
                Ok(i)
            }
        }
    }

    /// Remove the element equal to `tag`, shifting later slots left.
    pub fn remove<Q>(&mut self, tag: &Q) -> Option<P>
    where
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        let i = {
            let _g = self.reentrancy.enter("remove");
            O::search(&self.slots, tag).ok()?
        };
        // Dropping the removed pointer happens outside the guard.
        self.slots.remove(i)
    }

    /// Remove and drop the element equal to `tag`. Returns whether one was
    /// found.
    pub fn delete<Q>(&mut self, tag: &Q) -> bool
    where
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        self.remove(tag).is_some()
    }

    /// Take the element equal to `tag` and leave an empty slot behind.
    pub fn take<Q>(&mut self, tag: &Q) -> Option<P>
    where
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        let i = {
            let _g = self.reentrancy.enter("take");
            O::search(&self.slots, tag).ok()?
        };
        self.slots[i].take()
    }

    /// True if live elements are in ascending order.
    pub fn is_sorted(&self) -> bool
    where
        P::Target: ComparableTo<P::Target>,
    {
        let _g = self.reentrancy.enter("is_sorted");
        let mut live = self.slots.iter().filter_map(|s| s.as_deref());
        let Some(mut prev) = live.next() else {
            return true;
        };
        for e in live {
            if prev.compare(e) == core::cmp::Ordering::Greater {
                return false;
            }
            prev = e;
        }
        true
    }

    pub fn iter(&self) -> Iter<'_, P> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, P>
    where
        P: DerefMut,
    {
        IterMut {
            it: self.slots.iter_mut(),
        }
    }

    /// Restartable cursor over every slot, gaps included.
    pub fn cursor(&self) -> Cursor<'_, P> {
        Cursor::new(&self.slots)
    }

    pub(crate) fn raw_slots(&self) -> &[Option<P>] {
        &self.slots
    }
}

impl<P: Pointer, O: Order> Container<P, O> {
    /// Add every live element of `source`: owning containers clone them,
    /// borrowing containers adopt the references. Order and duplicate
    /// handling follow [`insert`](Container::insert).
    pub fn extend_from<'a, T, P2, O2>(&mut self, source: &'a Container<P2, O2>) -> Result<()>
    where
        T: ComparableTo<T> + ?Sized + 'a,
        P: FromElement<'a, T>,
        P2: Pointer<Target = T>,
        O2: Order,
    {
        self.verify_capacity(self.slots.len().saturating_add(source.occupied()))?;
        for e in source.iter() {
            let _ = self.insert(P::from_element(e))?;
        }
        Ok(())
    }

    /// Replace the contents with those of `source`. For owning containers
    /// this is a deep copy, whatever `source` holds.
    pub fn copy_from<'a, T, P2, O2>(&mut self, source: &'a Container<P2, O2>) -> Result<()>
    where
        T: ComparableTo<T> + ?Sized + 'a,
        P: FromElement<'a, T>,
        P2: Pointer<Target = T>,
        O2: Order,
    {
        // Reserve before clearing so a failed allocation loses nothing.
        self.verify_capacity(source.occupied())?;
        self.clear();
        self.extend_from(source)
    }

    /// Replace the contents with the elements found in both `a` and `b`.
    pub fn inter<'a, T, P2, O2, P3, O3>(
        &mut self,
        a: &'a Container<P2, O2>,
        b: &Container<P3, O3>,
    ) -> Result<()>
    where
        T: ComparableTo<T> + ?Sized + 'a,
        P: FromElement<'a, T>,
        P2: Pointer<Target = T>,
        P3: Pointer<Target = T>,
        O2: Order,
        O3: Order,
    {
        self.verify_capacity(a.occupied())?;
        self.clear();
        for e in a.iter() {
            if b.contains(e) && !self.contains(e) {
                let _ = self.insert(P::from_element(e))?;
            }
        }
        Ok(())
    }

    /// Replace the contents with the elements found in `a` or `b`.
    pub fn union<'a, T, P2, O2, P3, O3>(
        &mut self,
        a: &'a Container<P2, O2>,
        b: &'a Container<P3, O3>,
    ) -> Result<()>
    where
        T: ComparableTo<T> + ?Sized + 'a,
        P: FromElement<'a, T>,
        P2: Pointer<Target = T>,
        P3: Pointer<Target = T>,
        O2: Order,
        O3: Order,
    {
        self.verify_capacity(a.occupied().saturating_add(b.occupied()))?;
        self.clear();
        for e in a.iter().chain(b.iter()) {
            if !self.contains(e) {
                let _ = self.insert(P::from_element(e))?;
            }
        }
        Ok(())
    }
}

impl<'a, T, O> Container<&'a T, O>
where
    T: ?Sized,
    O: Order,
{
    /// Shallow assignment: adopt the references of `source`, slot for slot,
    /// gaps included. Nothing is cloned.
    pub fn assign_from<P2, O2>(&mut self, source: &'a Container<P2, O2>) -> Result<()>
    where
        P2: Pointer<Target = T>,
        O2: Order,
    {
        self.verify_capacity(source.len())?;
        self.slots.clear();
        self.slots
            .extend(source.raw_slots().iter().map(|s| s.as_deref()));
        Ok(())
    }
}

impl<T, O> Container<Box<T>, O>
where
    O: Order,
{
    /// Find-or-create building the new element from the tag.
    pub fn get_insert<Q>(&mut self, tag: &Q) -> Result<&mut T>
    where
        T: ComparableTo<Q> + for<'q> From<&'q Q>,
        Q: ?Sized,
    {
        self.get_insert_with_mut(tag, |q| Box::new(T::from(q)))
    }
}

impl<P: Pointer, O: Order> Default for Container<P, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Pointer + Clone, O: Order> Clone for Container<P, O> {
    fn clone(&self) -> Self {
        let mut slots = Vec::with_capacity(self.capacity);
        slots.extend(self.slots.iter().cloned());
        Self {
            slots,
            capacity: self.capacity,
            increment: self.increment,
            reentrancy: DebugReentrancy::new(),
            _order: PhantomData,
        }
    }
}

impl<P, O> fmt::Debug for Container<P, O>
where
    P: Pointer,
    P::Target: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.slots.iter().map(|s| s.as_deref()))
            .finish()
    }
}

impl<P: Pointer, O: Order> Index<usize> for Container<P, O> {
    type Output = P::Target;

    /// # Panics
    /// Panics if `index` is out of range or addresses a gap.
    fn index(&self, index: usize) -> &P::Target {
        match self.get_at(index) {
            Ok(e) => e,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<'a, P: Pointer, O: Order> IntoIterator for &'a Container<P, O> {
    type Item = &'a P::Target;
    type IntoIter = Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
