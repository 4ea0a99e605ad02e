//! Cursor: restartable walk over a container's slots.
//!
//! A cursor borrows the container, so the slots it walks cannot change
//! under it. Unlike [`Iter`](crate::container::Iter) it visits gaps too and
//! can move in both directions.

use crate::container::Container;
use crate::error::{ContainerError, Result};
use crate::order::Order;
use crate::pointer::Pointer;
use core::ops::Deref;

pub struct Cursor<'c, P> {
    slots: &'c [Option<P>],
    // Index into `slots` relative to the start of the walked range.
    pos: usize,
}

impl<'c, P: Deref> Cursor<'c, P> {
    pub(crate) fn new(slots: &'c [Option<P>]) -> Self {
        Self { slots, pos: 0 }
    }

    /// Cursor over slots `[first, end)` of `container`.
    pub fn range<O: Order>(container: &'c Container<P, O>, first: usize, end: usize) -> Result<Self>
    where
        P: Pointer,
    {
        let slots = container.raw_slots();
        if end > slots.len() {
            return Err(ContainerError::IndexOutOfRange {
                index: end,
                len: slots.len(),
            });
        }
        if first > end {
            return Err(ContainerError::InvalidArgument("cursor range starts after it ends"));
        }
        Ok(Self::new(&slots[first..end]))
    }

    /// Number of slots in the walked range.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Position relative to the start of the range.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Back to the first slot.
    pub fn start(&mut self) {
        self.pos = 0;
    }

    /// Past the last slot.
    pub fn is_end(&self) -> bool {
        self.pos >= self.slots.len()
    }

    /// Advance one slot. Stops at the end.
    pub fn next(&mut self) {
        if self.pos < self.slots.len() {
            self.pos += 1;
        }
    }

    /// Step back one slot. Stops at the first slot.
    pub fn prev(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn go_to(&mut self, pos: usize) -> Result<()> {
        if pos >= self.slots.len() {
            return Err(ContainerError::IndexOutOfRange {
                index: pos,
                len: self.slots.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Element under the cursor; `None` on a gap or at the end.
    pub fn current(&self) -> Option<&'c P::Target> {
        self.slots.get(self.pos).and_then(|s| s.as_deref())
    }
}
