//! Tagged comparison and hash-index protocols.
//!
//! Every element stored in a container is searched for by a *tag*: the
//! element itself, a key it carries, or any lighter surrogate. An element
//! type opts into a tag type by implementing `ComparableTo<Tag>`.

use core::cmp::Ordering;

/// Three-way comparison of an element against a search tag.
///
/// `compare` must be consistent with the element's own ordering: if
/// `a.compare(&t) == Less` then every element ordered before `a` also
/// compares `Less` against `t`. Ordered containers rely on this for binary
/// search.
pub trait ComparableTo<Tag: ?Sized> {
    fn compare(&self, tag: &Tag) -> Ordering;
}

impl<T: Ord + ?Sized> ComparableTo<T> for T {
    #[inline]
    fn compare(&self, tag: &T) -> Ordering {
        self.cmp(tag)
    }
}

impl ComparableTo<str> for String {
    #[inline]
    fn compare(&self, tag: &str) -> Ordering {
        self.as_str().cmp(tag)
    }
}

/// Bucket index for single-key hash containers. Must lie in
/// `[0, bucket_count)` of the container the value is used with.
pub trait HashIndex {
    fn hash_index(&self) -> usize;
}

/// Bucket indices for double-key hash containers: `hash_index_1` selects
/// the level-1 bucket, `hash_index_2` the level-2 bucket inside it.
pub trait DblHashIndex {
    fn hash_index_1(&self) -> usize;
    fn hash_index_2(&self) -> usize;
}

impl<T: HashIndex + ?Sized> HashIndex for &T {
    #[inline]
    fn hash_index(&self) -> usize {
        (**self).hash_index()
    }
}

impl<T: DblHashIndex + ?Sized> DblHashIndex for &T {
    #[inline]
    fn hash_index_1(&self) -> usize {
        (**self).hash_index_1()
    }

    #[inline]
    fn hash_index_2(&self) -> usize {
        (**self).hash_index_2()
    }
}
