//! rcontainer: ordered and unordered pointer containers with tag-based
//! lookup, plus bucketed hash wrappers built on top of them.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one slot-array container whose ownership and ordering are fixed
//!   by its type, and hash containers that are nothing more than arrays of
//!   those containers.
//! - Layers:
//!   - `ComparableTo<Tag>`: three-way comparison of an element against any
//!     tag type it can be searched by (itself, a key, a surrogate).
//!   - `Container<P, O>`: slot array of pointers `P` (`Box<T>` owns,
//!     `&T` borrows) placed by strategy `O` (`Ordered` binary search or
//!     `Unordered` insertion order). Supports positional edits, gaps,
//!     rotation and set operations.
//!   - `HashContainer<P, I>`: fixed number of ordered buckets chosen by an
//!     `Indexer`.
//!   - `DblHashContainer<P, I>`: two bucket levels, created lazily on
//!     insert only.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` (no atomics, no locks).
//! - Ownership is never a runtime flag: a `Container<Box<T>>` drops each
//!   element exactly once; a `Container<&T>` never drops anything.
//! - Elements leave a container by value (`remove`, `take`, `Insertion`),
//!   so moving an owned element between containers is an explicit move.
//! - Bucket counts are fixed; there is no rehashing.
//!
//! Caller responsibilities
//! - Positional operations (`insert_at`, `put_at`, `exchange`, `shift`)
//!   do not check order. Using them on an ordered container can leave it
//!   unsorted, after which searches may miss; `is_sorted` reports this.
//! - Gaps appear only through `put_at` past the end and `take`/`take_at`.
//!   Iterators skip them; cursors and positional accessors expose them.
//!
//! Reentrancy policy
//! - Search paths run user `compare` code under a debug-only reentrancy
//!   guard. A `compare` that calls back into the container it is being
//!   searched by panics in debug builds. Elements are dropped outside the
//!   guard, so `Drop` may touch the container's owner freely.
//!
//! Errors and logging
//! - Contract violations and failed growth are `ContainerError`s; absence
//!   is `Option`/`bool`. Growth uses fallible reservation and leaves the
//!   container unchanged on failure.
//! - Growth, gap filling and bucket creation are reported through the
//!   `log` facade at `trace`/`debug` level.

pub mod compare;
pub mod config;
pub mod container;
mod container_proptest;
pub mod cursor;
pub mod dbl_hash_container;
pub mod error;
pub mod hash_container;
pub mod indexer;
pub mod order;
pub mod pointer;
mod reentrancy;

// Public surface
pub use compare::{ComparableTo, DblHashIndex, HashIndex};
pub use config::{ContainerConfig, DblHashConfig, HashConfig};
pub use container::{BorrowedContainer, Container, DuplicatePolicy, Insertion, OwnedContainer};
pub use cursor::Cursor;
pub use dbl_hash_container::DblHashContainer;
pub use error::{ContainerError, Result};
pub use hash_container::HashContainer;
pub use indexer::{DblIndexer, ElementIndex, Hashed, Indexer};
pub use order::{Order, Ordered, Unordered};
pub use pointer::{FromElement, Pointer};
pub use reentrancy::DebugReentrancy;
