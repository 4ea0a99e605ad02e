//! DblHashContainer: two-level bucketed hash container.
//!
//! Level 1 is an unordered container of level-1 buckets addressed by
//! position; each level-1 bucket is an unordered container of level-2
//! buckets, also addressed by position; each level-2 bucket is an ordered
//! container of elements. Buckets are created on the write path only, by
//! storing them at their index and leaving gaps for the rest.

use crate::compare::ComparableTo;
use crate::config::{ContainerConfig, DblHashConfig};
use crate::container::{Container, DuplicatePolicy, Insertion};
use crate::error::{ContainerError, Result};
use crate::indexer::{DblIndexer, ElementIndex};
use crate::order::{Ordered, Unordered};
use crate::pointer::Pointer;
use core::ops::DerefMut;

/// Leaf bucket holding elements.
pub type Level2<P> = Container<P, Ordered>;

/// Level-1 bucket: level-2 buckets by index, gaps where none exists yet.
pub type Level1<P> = Container<Box<Level2<P>>, Unordered>;

pub struct DblHashContainer<P, I = ElementIndex> {
    level1: Container<Box<Level1<P>>, Unordered>,
    config: DblHashConfig,
    indexer: I,
}

impl<P: Pointer, I: Default> DblHashContainer<P, I> {
    pub fn with_capacity(
        level1: usize,
        level2: usize,
        bucket_capacity: usize,
        bucket_increment: usize,
    ) -> Result<Self> {
        Self::with_config(DblHashConfig::new(
            level1,
            level2,
            ContainerConfig::new(bucket_capacity, bucket_increment),
        ))
    }

    pub fn with_config(config: DblHashConfig) -> Result<Self> {
        Self::with_indexer(config, I::default())
    }
}

impl<P: Pointer, I> DblHashContainer<P, I> {
    /// No bucket is allocated until the first insert.
    pub fn with_indexer(config: DblHashConfig, indexer: I) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            level1: Container::with_capacity(config.level1, 0)?,
            config,
            indexer,
        })
    }

    pub fn config(&self) -> &DblHashConfig {
        &self.config
    }

    /// Number of stored elements.
    pub fn len(&self) -> usize {
        self.level1
            .iter()
            .flat_map(|l1| l1.iter())
            .map(|l2| l2.occupied())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buckets created so far: `(level1, level2)`.
    pub fn allocated_buckets(&self) -> (usize, usize) {
        let level2 = self.level1.iter().map(|l1| l1.occupied()).sum();
        (self.level1.occupied(), level2)
    }

    pub fn bucket(&self, index1: usize, index2: usize) -> Option<&Level2<P>> {
        self.level1.slot(index1)?.slot(index2)
    }

    /// Drop every element and every bucket.
    pub fn clear(&mut self) {
        self.level1.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &P::Target> + '_ {
        self.level1
            .iter()
            .flat_map(|l1| l1.iter())
            .flat_map(|l2| l2.iter())
    }

    fn indices_of<Q>(&self, value: &Q) -> Result<(usize, usize)>
    where
        I: DblIndexer<Q>,
        Q: ?Sized,
    {
        let (n1, n2) = (self.config.level1, self.config.level2);
        let (i1, i2) = self.indexer.indices(value, n1, n2);
        if i1 >= n1 {
            return Err(ContainerError::HashOutOfRange {
                index: i1,
                buckets: n1,
            });
        }
        if i2 >= n2 {
            return Err(ContainerError::HashOutOfRange {
                index: i2,
                buckets: n2,
            });
        }
        Ok((i1, i2))
    }

    /// Existing leaf bucket; never allocates.
    fn find_bucket<Q>(&self, tag: &Q) -> Option<&Level2<P>>
    where
        I: DblIndexer<Q>,
        Q: ?Sized,
    {
        let (i1, i2) = self.indices_of(tag).ok()?;
        self.bucket(i1, i2)
    }

    fn find_bucket_mut<Q>(&mut self, tag: &Q) -> Option<&mut Level2<P>>
    where
        I: DblIndexer<Q>,
        Q: ?Sized,
    {
        let (i1, i2) = self.indices_of(tag).ok()?;
        self.level1.slot_mut(i1)?.slot_mut(i2)
    }

    /// Leaf bucket at `(i1, i2)`, creating whatever is missing on the way.
    fn bucket_mut(&mut self, i1: usize, i2: usize) -> Result<&mut Level2<P>> {
        let config = self.config;
        if self.level1.slot(i1).is_none() {
            let level1: Level1<P> = Container::with_capacity(config.level2, 0)?;
            self.level1.put_at(Box::new(level1), i1)?;
            log::debug!("created level-1 bucket {}", i1);
        }
        let level1 = self
            .level1
            .slot_mut(i1)
            .ok_or(ContainerError::EmptySlot { index: i1 })?;
        if level1.slot(i2).is_none() {
            let level2: Level2<P> = Container::with_config(config.bucket)?;
            level1.put_at(Box::new(level2), i2)?;
            log::debug!("created level-2 bucket {} in level-1 bucket {}", i2, i1);
        }
        level1
            .slot_mut(i2)
            .ok_or(ContainerError::EmptySlot { index: i2 })
    }

    pub fn insert(&mut self, element: P) -> Result<Insertion<P>>
    where
        I: DblIndexer<P::Target>,
        P::Target: ComparableTo<P::Target>,
    {
        self.insert_with_policy(element, DuplicatePolicy::Discard)
    }

    pub fn insert_with_policy(&mut self, element: P, policy: DuplicatePolicy) -> Result<Insertion<P>>
    where
        I: DblIndexer<P::Target>,
        P::Target: ComparableTo<P::Target>,
    {
        let (i1, i2) = self.indices_of(&*element)?;
        self.bucket_mut(i1, i2)?.insert_with_policy(element, policy)
    }

    pub fn get<Q>(&self, tag: &Q) -> Option<&P::Target>
    where
        I: DblIndexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        self.find_bucket(tag)?.get(tag)
    }

    pub fn get_mut<Q>(&mut self, tag: &Q) -> Option<&mut P::Target>
    where
        P: DerefMut,
        I: DblIndexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        self.find_bucket_mut(tag)?.get_mut(tag)
    }

    pub fn contains<Q>(&self, tag: &Q) -> bool
    where
        I: DblIndexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        self.find_bucket(tag).is_some_and(|b| b.contains(tag))
    }

    /// Remove the element equal to `tag`. Emptied buckets are kept.
    pub fn remove<Q>(&mut self, tag: &Q) -> Option<P>
    where
        I: DblIndexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        self.find_bucket_mut(tag)?.remove(tag)
    }

    pub fn delete<Q>(&mut self, tag: &Q) -> bool
    where
        I: DblIndexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
    {
        self.remove(tag).is_some()
    }

    pub fn get_insert_with<Q, F>(&mut self, tag: &Q, make: F) -> Result<&P::Target>
    where
        I: DblIndexer<Q>,
        P::Target: ComparableTo<Q>,
        Q: ?Sized,
        F: FnOnce(&Q) -> P,
    {
        let (i1, i2) = self.indices_of(tag)?;
        self.bucket_mut(i1, i2)?.get_insert_with(tag, make)
    }
}

impl<T, I> DblHashContainer<Box<T>, I> {
    /// Find-or-create building the new element from the tag.
    pub fn get_insert<Q>(&mut self, tag: &Q) -> Result<&mut T>
    where
        I: DblIndexer<Q>,
        T: ComparableTo<Q> + for<'q> From<&'q Q>,
        Q: ?Sized,
    {
        let (i1, i2) = self.indices_of(tag)?;
        self.bucket_mut(i1, i2)?.get_insert(tag)
    }
}
