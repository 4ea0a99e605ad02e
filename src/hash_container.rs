//! HashContainer: a fixed array of ordered buckets.
//!
//! Every operation picks a bucket with the container's [`Indexer`] and then
//! delegates to that bucket's [`Container`]. The bucket count never changes;
//! a skewed index distribution degrades to the cost of one large ordered
//! container.

use crate::compare::ComparableTo;
use crate::config::{ContainerConfig, HashConfig};
use crate::container::{Container, DuplicatePolicy, Insertion};
use crate::error::{ContainerError, Result};
use crate::indexer::{ElementIndex, Indexer};
use crate::order::Ordered;
use crate::pointer::Pointer;
use core::fmt;
use core::ops::DerefMut;

pub struct HashContainer<P, I = ElementIndex> {
    buckets: Vec<Container<P, Ordered>>,
    indexer: I,
}

impl<P: Pointer, I: Default> HashContainer<P, I> {
    pub fn with_capacity(buckets: usize, bucket_capacity: usize, bucket_increment: usize) -> Result<Self> {
        Self::with_config(HashConfig::new(
            buckets,
            ContainerConfig::new(bucket_capacity, bucket_increment),
        ))
    }

    pub fn with_config(config: HashConfig) -> Result<Self> {
        Self::with_indexer(config, I::default())
    }
}

impl<P: Pointer, I> HashContainer<P, I> {
    /// All buckets are allocated up front.
    pub fn with_indexer(config: HashConfig, indexer: I) -> Result<Self> {
        config.validate()?;
        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(config.buckets)
            .map_err(|_| ContainerError::AllocationFailure {
                requested: config.buckets,
            })?;
        for _ in 0..config.buckets {
            buckets.push(Container::with_config(config.bucket)?);
        }
        log::debug!(
            "hash container with {} buckets of capacity {}",
            config.buckets,
            config.bucket.initial_capacity
        );
        Ok(Self { buckets, indexer })
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, index: usize) -> Option<&Container<P, Ordered>> {
        self.buckets.get(index)
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.occupied()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|b| b.occupied() == 0)
    }

    /// Empty every bucket; the buckets themselves stay.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Container::clear);
    }

    /// Elements bucket by bucket, each bucket in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &P::Target> + '_ {
        self.buckets.iter().flat_map(|b| b.iter())
    }

    fn bucket_of<Q>(&self, value: &Q) -> Result<usize>
    where
        I: Indexer<Q>,
        Q: ?Sized,
    {
        let buckets = self.buckets.len();
        let index = self.indexer.index(value, buckets);
        if index < buckets {
            Ok(index)
        } else {
            Err(ContainerError::HashOutOfRange { index, buckets })
        }
    }

    pub fn insert(&mut self, element: P) -> Result<Insertion<P>>
    where
        I: Indexer<P::Target>,
        P::Target: ComparableTo<P::Target>,
    {
        self.insert_with_policy(element, DuplicatePolicy::Discard)
    }

    pub fn insert_with_policy(&mut self, element: P, policy: DuplicatePolicy) -> Result<Insertion<P>>
    where
        I: Indexer<P::Target>,
        P::Target: ComparableTo<P::Target>,
    {
        let b = self.bucket_of(&*element)?;
        self.buckets[b].insert_with_policy(element, policy)
    }

    pub fn get<Q>(&self, tag: &Q) -> Option<&P::Target>
    where
        I: Indexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        let b = self.bucket_of(tag).ok()?;
        self.buckets[b].get(tag)
    }

    pub fn get_mut<Q>(&mut self, tag: &Q) -> Option<&mut P::Target>
    where
        P: DerefMut,
        I: Indexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        let b = self.bucket_of(tag).ok()?;
        self.buckets[b].get_mut(tag)
    }

    pub fn contains<Q>(&self, tag: &Q) -> bool
    where
        I: Indexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        self.bucket_of(tag)
            .is_ok_and(|b| self.buckets[b].contains(tag))
    }

    pub fn remove<Q>(&mut self, tag: &Q) -> Option<P>
    where
        I: Indexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        let b = self.bucket_of(tag).ok()?;
        self.buckets[b].remove(tag)
    }

    pub fn delete<Q>(&mut self, tag: &Q) -> bool
    where
        I: Indexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        self.remove(tag).is_some()
    }

    pub fn get_insert_with<Q, F>(&mut self, tag: &Q, make: F) -> Result<&P::Target>
    where
        I: Indexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
        F: FnOnce(&Q) -> P,
    {
        let b = self.bucket_of(tag)?;
        self.buckets[b].get_insert_with(tag, make)
    }
}

impl<T, I> HashContainer<Box<T>, I> {
    /// Find-or-create building the new element from the tag.
    pub fn get_insert<Q>(&mut self, tag: &Q) -> Result<&mut T>
    where
        I: Indexer<Q>,
        T: ComparableTo<Q> + for<'q> From<&'q Q>,
        Q: ?Sized,
    {
        let b = self.bucket_of(tag)?;
        self.buckets[b].get_insert(tag)
    }
}

impl<P, I> fmt::Debug for HashContainer<P, I>
where
    P: Pointer,
    P::Target: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.buckets
                    .iter()
                    .enumerate()
                    .filter(|(_, b)| !b.is_empty()),
            )
            .finish()
    }
}
