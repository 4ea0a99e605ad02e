//! Bucket indexers: how a hash container maps an element or tag to a bucket.
//!
//! `ElementIndex` asks the value itself through [`HashIndex`] /
//! [`DblHashIndex`]. `Hashed` derives indices from `std::hash::Hash` with a
//! `BuildHasher` kept by the container, so element and tag always agree.

use crate::compare::{DblHashIndex, HashIndex};
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Single-level bucket selection.
pub trait Indexer<Q: ?Sized> {
    fn index(&self, value: &Q, buckets: usize) -> usize;
}

/// Two-level bucket selection: `(level1, level2)`.
pub trait DblIndexer<Q: ?Sized> {
    fn indices(&self, value: &Q, level1: usize, level2: usize) -> (usize, usize);
}

/// Delegates to the value's own [`HashIndex`] / [`DblHashIndex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementIndex;

impl<Q: HashIndex + ?Sized> Indexer<Q> for ElementIndex {
    #[inline]
    fn index(&self, value: &Q, _buckets: usize) -> usize {
        value.hash_index()
    }
}

impl<Q: DblHashIndex + ?Sized> DblIndexer<Q> for ElementIndex {
    #[inline]
    fn indices(&self, value: &Q, _level1: usize, _level2: usize) -> (usize, usize) {
        (value.hash_index_1(), value.hash_index_2())
    }
}

/// Indexes by `Hash`; always in range.
#[derive(Debug, Clone, Default)]
pub struct Hashed<S = DefaultHashBuilder> {
    hasher: S,
}

impl<S> Hashed<S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }
}

impl<Q, S> Indexer<Q> for Hashed<S>
where
    Q: Hash + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn index(&self, value: &Q, buckets: usize) -> usize {
        (self.hasher.hash_one(value) % buckets as u64) as usize
    }
}

impl<Q, S> DblIndexer<Q> for Hashed<S>
where
    Q: Hash + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn indices(&self, value: &Q, level1: usize, level2: usize) -> (usize, usize) {
        let h = self.hasher.hash_one(value);
        let first = h % level1 as u64;
        let second = (h / level1 as u64) % level2 as u64;
        (first as usize, second as usize)
    }
}
