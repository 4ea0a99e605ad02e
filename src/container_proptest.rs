#![cfg(test)]

// Property tests for Container kept inside the crate so they can look at
// raw slots.

use crate::container::{Container, DuplicatePolicy, Insertion, OwnedContainer};
use crate::order::{Ordered, Unordered};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Replace(i16),
    Remove(i16),
    Take(i16),
    Get(i16),
    Shift(usize, bool),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let v = -20i16..20;
    let op = prop_oneof![
        4 => v.clone().prop_map(Op::Insert),
        1 => v.clone().prop_map(Op::Replace),
        2 => v.clone().prop_map(Op::Remove),
        1 => v.clone().prop_map(Op::Take),
        2 => v.prop_map(Op::Get),
        1 => (0usize..30, any::<bool>()).prop_map(|(i, r)| Op::Shift(i, r)),
    ];
    proptest::collection::vec(op, 1..80)
}

fn live(c: &OwnedContainer<i16>) -> Vec<i16> {
    c.iter().copied().collect()
}

// Property: an ordered container behaves like a BTreeSet under
// insert/remove/lookup.
// - After every op the live elements are strictly ascending and equal the
//   model's contents.
// - `len() <= capacity()` always holds; gaps only come from `take`.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_ordered_matches_btreeset(ops in arb_ops()) {
        let mut sut: OwnedContainer<i16> = Container::with_capacity(2, 3).unwrap();
        let mut model: BTreeSet<i16> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(v) => {
                    let fresh = model.insert(v);
                    let r = sut.insert(Box::new(v)).unwrap();
                    prop_assert_eq!(r.is_inserted(), fresh);
                }
                Op::Replace(v) => {
                    let had = !model.insert(v);
                    match sut.insert_with_policy(Box::new(v), DuplicatePolicy::Replace).unwrap() {
                        Insertion::Replaced(_, old) => {
                            prop_assert!(had);
                            prop_assert_eq!(*old, v);
                        }
                        Insertion::Inserted(_) => prop_assert!(!had),
                        Insertion::Discarded(_) => prop_assert!(false, "replace never discards"),
                    }
                }
                Op::Remove(v) => {
                    let had = model.remove(&v);
                    prop_assert_eq!(sut.remove(&v).map(|b| *b), had.then_some(v));
                }
                Op::Take(v) => {
                    let had = model.remove(&v);
                    prop_assert_eq!(sut.take(&v).is_some(), had);
                }
                Op::Get(v) => {
                    prop_assert_eq!(sut.get(&v).copied(), model.get(&v).copied());
                    prop_assert_eq!(sut.contains(&v), model.contains(&v));
                }
                // Rotation breaks order; apply it to a copy only.
                Op::Shift(i, reverse) => {
                    let mut copy = sut.clone();
                    let before = copy.occupied();
                    match copy.shift(i, reverse) {
                        Ok(()) => prop_assert_eq!(copy.occupied(), before),
                        Err(_) => prop_assert!(i >= copy.len()),
                    }
                }
            }
            prop_assert!(sut.len() <= sut.capacity());
            prop_assert!(sut.is_sorted());
            prop_assert_eq!(live(&sut), model.iter().copied().collect::<Vec<_>>());
            prop_assert_eq!(sut.occupied(), model.len());
        }
    }
}

// Property: shift is a rotation of the cyclic sequence, and the reversed
// variant walks the same cycle backwards from the same element.
proptest! {
    #[test]
    fn prop_shift_is_cyclic(values in proptest::collection::vec(any::<u8>(), 1..40), seed in any::<usize>(), reverse in any::<bool>()) {
        let mut c: OwnedContainer<u8, Unordered> = Container::new();
        for &v in &values {
            c.push(Box::new(v)).unwrap();
        }
        let n = values.len();
        let k = seed % n;
        c.shift(k, reverse).unwrap();
        let got: Vec<u8> = c.iter().copied().collect();
        let expected: Vec<u8> = if reverse {
            (0..n).map(|j| values[(k + n - j) % n]).collect()
        } else {
            (0..n).map(|j| values[(k + j) % n]).collect()
        };
        prop_assert_eq!(got, expected);
    }
}

// Property: union/inter agree with set algebra for ordered containers fed
// from unordered sources with duplicates.
proptest! {
    #[test]
    fn prop_union_inter(a in proptest::collection::vec(0u8..16, 0..20), b in proptest::collection::vec(0u8..16, 0..20)) {
        let mut ca: Container<Box<u8>, Unordered> = Container::new();
        let mut cb: Container<Box<u8>, Unordered> = Container::new();
        a.iter().for_each(|&v| { ca.push(Box::new(v)).unwrap(); });
        b.iter().for_each(|&v| { cb.push(Box::new(v)).unwrap(); });

        let sa: BTreeSet<u8> = a.iter().copied().collect();
        let sb: BTreeSet<u8> = b.iter().copied().collect();

        let mut u: Container<&u8, Ordered> = Container::new();
        u.union(&ca, &cb).unwrap();
        prop_assert_eq!(u.iter().copied().collect::<Vec<_>>(), sa.union(&sb).copied().collect::<Vec<_>>());

        let mut i: Container<Box<u8>, Ordered> = Container::new();
        i.inter(&ca, &cb).unwrap();
        prop_assert_eq!(i.iter().copied().collect::<Vec<_>>(), sa.intersection(&sb).copied().collect::<Vec<_>>());
    }
}
