//! Element pointers: who owns what a container holds.
//!
//! A container never decides at runtime whether to destroy its elements.
//! Ownership is carried by the pointer type it stores:
//! - `Box<T>`: the container owns the element; dropping the slot destroys it.
//! - `&'a T`: the container borrows the element; nothing is ever destroyed.

use core::ops::Deref;

/// A pointer a container can hold.
pub trait Pointer: Deref {
    /// True if dropping the pointer destroys the element.
    const OWNING: bool;
}

impl<T: ?Sized> Pointer for Box<T> {
    const OWNING: bool = true;
}

impl<'a, T: ?Sized> Pointer for &'a T {
    const OWNING: bool = false;
}

/// Builds a pointer from an element borrowed out of another container.
///
/// Owning pointers make a deep copy; borrowed pointers adopt the reference.
pub trait FromElement<'a, T: ?Sized + 'a>: Pointer<Target = T> {
    fn from_element(element: &'a T) -> Self;
}

impl<'a, T: Clone + 'a> FromElement<'a, T> for Box<T> {
    #[inline]
    fn from_element(element: &'a T) -> Self {
        Box::new(element.clone())
    }
}

impl<'a, T: ?Sized + 'a> FromElement<'a, T> for &'a T {
    #[inline]
    fn from_element(element: &'a T) -> Self {
        element
    }
}
