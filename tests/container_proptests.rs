use proptest::prelude::*;
use rcontainer::{
    ComparableTo, Container, DblHashContainer, DblHashIndex, HashContainer, Hashed,
    OwnedContainer, Unordered,
};
use std::cmp::Ordering;
use std::collections::BTreeSet;

// Model an unordered container with a Vec: positional edits and lookups
// agree, and len never exceeds capacity.
proptest! {
    #[test]
    fn prop_unordered_matches_vec(ops in proptest::collection::vec((0u8..=5u8, 0usize..12, 0u8..8), 1..120)) {
        let mut c: OwnedContainer<u8, Unordered> = Container::with_capacity(1, 1).unwrap();
        let mut model: Vec<u8> = Vec::new();

        for (op, pos, v) in ops {
            match op {
                // Push at the end
                0 => {
                    prop_assert_eq!(c.push(Box::new(v)).unwrap(), model.len());
                    model.push(v);
                }
                // Positional insert; past the end is an error
                1 => {
                    let r = c.insert_at(Box::new(v), pos, false);
                    if pos <= model.len() {
                        prop_assert!(r.unwrap().is_none());
                        model.insert(pos, v);
                    } else {
                        prop_assert!(r.is_err());
                    }
                }
                // Positional remove
                2 => {
                    let r = c.remove_at(pos);
                    if pos < model.len() {
                        prop_assert_eq!(r.unwrap().map(|b| *b), Some(model.remove(pos)));
                    } else {
                        prop_assert!(r.is_err());
                    }
                }
                // Exchange two slots
                3 => {
                    let other = v as usize;
                    let r = c.exchange(pos, other);
                    if pos < model.len() && other < model.len() {
                        prop_assert!(r.is_ok());
                        model.swap(pos, other);
                    } else {
                        prop_assert!(r.is_err());
                    }
                }
                // Delete by value removes the first equal element
                4 => {
                    let found = model.iter().position(|&x| x == v);
                    prop_assert_eq!(c.delete(&v), found.is_some());
                    if let Some(i) = found {
                        model.remove(i);
                    }
                }
                // Lookup by value
                5 => {
                    prop_assert_eq!(c.get(&v).copied(), model.iter().find(|&&x| x == v).copied());
                    prop_assert_eq!(c.search(&v).ok(), model.iter().position(|&x| x == v));
                }
                _ => unreachable!(),
            }

            prop_assert!(c.len() <= c.capacity());
            prop_assert_eq!(c.iter().copied().collect::<Vec<_>>(), model.clone());
        }
    }
}

// Delete-then-lookup on a hash container: once deleted, a value is gone;
// everything else is still there.
proptest! {
    #[test]
    fn prop_hash_delete_then_lookup(values in proptest::collection::vec(any::<u16>(), 0..60), victims in proptest::collection::vec(any::<u16>(), 0..30)) {
        let mut h: HashContainer<Box<u16>, Hashed> = HashContainer::with_capacity(7, 2, 2).unwrap();
        let mut model: BTreeSet<u16> = BTreeSet::new();
        for &v in &values {
            prop_assert_eq!(h.insert(Box::new(v)).unwrap().is_inserted(), model.insert(v));
        }
        for v in &victims {
            prop_assert_eq!(h.delete(v), model.remove(v));
            prop_assert!(!h.contains(v));
        }
        prop_assert_eq!(h.len(), model.len());
        for v in &model {
            prop_assert_eq!(h.get(v), Some(v));
        }
        for i in 0..h.bucket_count() {
            prop_assert!(h.bucket(i).unwrap().is_sorted());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Pair(u8, u8);

impl DblHashIndex for Pair {
    fn hash_index_1(&self) -> usize {
        (self.0 % 5) as usize
    }
    fn hash_index_2(&self) -> usize {
        (self.1 % 5) as usize
    }
}

struct First(u8);

impl DblHashIndex for First {
    fn hash_index_1(&self) -> usize {
        (self.0 % 5) as usize
    }
    fn hash_index_2(&self) -> usize {
        0
    }
}

impl ComparableTo<First> for Pair {
    fn compare(&self, tag: &First) -> Ordering {
        self.0.cmp(&tag.0).then(self.1.cmp(&0))
    }
}

// Lazy bucket creation: the number of level-2 buckets equals the number of
// distinct index pairs ever inserted, and lookups never add to it.
proptest! {
    #[test]
    fn prop_dbl_buckets_track_inserted_pairs(pairs in proptest::collection::vec((any::<u8>(), any::<u8>()), 0..60), probes in proptest::collection::vec(any::<u8>(), 0..20)) {
        let mut d: DblHashContainer<Box<Pair>> = DblHashContainer::with_capacity(5, 5, 1, 1).unwrap();
        let mut cells: BTreeSet<(u8, u8)> = BTreeSet::new();
        let mut rows: BTreeSet<u8> = BTreeSet::new();
        let mut model: BTreeSet<Pair> = BTreeSet::new();
        for (a, b) in pairs {
            let p = Pair(a, b);
            prop_assert_eq!(d.insert(Box::new(p)).unwrap().is_inserted(), model.insert(p));
            cells.insert((a % 5, b % 5));
            rows.insert(a % 5);
        }
        let before = d.allocated_buckets();
        prop_assert_eq!(before, (rows.len(), cells.len()));

        for a in probes {
            let expected = model.contains(&Pair(a, 0));
            prop_assert_eq!(d.contains(&First(a)), expected);
        }
        prop_assert_eq!(d.allocated_buckets(), before);
        prop_assert_eq!(d.len(), model.len());
    }
}
