// DblHashContainer integration tests.
//
// Invariants:
// - Buckets exist only where an insert (or find-or-create) has reached;
//   reads, removals and failed inserts allocate nothing.
// - Each leaf bucket is ordered; elements with equal index pairs share it.
// - Emptied buckets stay allocated until `clear`.
use rcontainer::{
    ComparableTo, ContainerError, DblHashContainer, DblHashIndex, Hashed, Insertion,
};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Cell {
    row: u8,
    col: u8,
    id: u32,
}

impl DblHashIndex for Cell {
    fn hash_index_1(&self) -> usize {
        self.row as usize
    }
    fn hash_index_2(&self) -> usize {
        self.col as usize
    }
}

fn cell(row: u8, col: u8, id: u32) -> Cell {
    Cell { row, col, id }
}

// Test: lazy creation of both levels.
// Verifies: a new row creates one level-1 and one level-2 bucket; a new
// column in an existing row creates only a level-2 bucket.
#[test]
fn buckets_are_created_on_insert_only() {
    let mut d: DblHashContainer<Box<Cell>> = DblHashContainer::with_capacity(4, 4, 2, 2).unwrap();
    assert_eq!(d.allocated_buckets(), (0, 0));

    assert!(d.get(&cell(1, 1, 0)).is_none());
    assert!(d.remove(&cell(2, 3, 0)).is_none());
    assert_eq!(d.allocated_buckets(), (0, 0));

    let _ = d.insert(Box::new(cell(1, 1, 10))).unwrap();
    assert_eq!(d.allocated_buckets(), (1, 1));
    let _ = d.insert(Box::new(cell(1, 1, 5))).unwrap();
    assert_eq!(d.allocated_buckets(), (1, 1));
    let _ = d.insert(Box::new(cell(1, 3, 0))).unwrap();
    assert_eq!(d.allocated_buckets(), (1, 2));
    let _ = d.insert(Box::new(cell(3, 0, 0))).unwrap();
    assert_eq!(d.allocated_buckets(), (2, 3));

    let ids: Vec<u32> = d.bucket(1, 1).unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![5, 10]);
    assert!(d.bucket(0, 0).is_none());
    assert!(d.bucket(1, 2).is_none());
    assert_eq!(d.len(), 4);
}

// Test: failed inserts leave no partial path behind.
#[test]
fn out_of_range_allocates_nothing() {
    let mut d: DblHashContainer<Box<Cell>> = DblHashContainer::with_capacity(2, 2, 1, 1).unwrap();
    assert_eq!(
        d.insert(Box::new(cell(0, 5, 0))).unwrap_err(),
        ContainerError::HashOutOfRange {
            index: 5,
            buckets: 2
        }
    );
    assert_eq!(
        d.insert(Box::new(cell(9, 0, 0))).unwrap_err(),
        ContainerError::HashOutOfRange {
            index: 9,
            buckets: 2
        }
    );
    assert_eq!(d.allocated_buckets(), (0, 0));
    assert!(!d.contains(&cell(9, 0, 0)));
}

// Test: removal keeps buckets; clear drops them.
#[test]
fn remove_then_clear() {
    let mut d: DblHashContainer<Box<Cell>> = DblHashContainer::with_capacity(3, 3, 1, 0).unwrap();
    for (r, c) in [(0, 0), (0, 1), (2, 2)] {
        let _ = d.insert(Box::new(cell(r, c, 1))).unwrap();
    }
    assert!(d.delete(&cell(2, 2, 1)));
    assert!(!d.contains(&cell(2, 2, 1)));
    assert_eq!(d.len(), 2);
    assert_eq!(d.allocated_buckets(), (2, 3));

    d.clear();
    assert!(d.is_empty());
    assert_eq!(d.allocated_buckets(), (0, 0));
}

// Test: duplicates are discarded per leaf bucket.
#[test]
fn duplicate_in_leaf_bucket() {
    let mut d: DblHashContainer<Box<Cell>> = DblHashContainer::with_capacity(2, 2, 2, 2).unwrap();
    let _ = d.insert(Box::new(cell(1, 0, 7))).unwrap();
    match d.insert(Box::new(cell(1, 0, 7))).unwrap() {
        Insertion::Discarded(c) => assert_eq!(c.id, 7),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(d.len(), 1);
}

#[derive(Debug)]
struct Symbol {
    scope: String,
    name: String,
    uses: u32,
}

struct SymbolKey<'a>(&'a str, &'a str);

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.scope.as_str().hash(state);
        self.name.as_str().hash(state);
    }
}

impl std::hash::Hash for SymbolKey<'_> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
        self.1.hash(state);
    }
}

impl ComparableTo<Symbol> for Symbol {
    fn compare(&self, tag: &Symbol) -> Ordering {
        (&self.scope, &self.name).cmp(&(&tag.scope, &tag.name))
    }
}

impl ComparableTo<SymbolKey<'_>> for Symbol {
    fn compare(&self, tag: &SymbolKey<'_>) -> Ordering {
        (self.scope.as_str(), self.name.as_str()).cmp(&(tag.0, tag.1))
    }
}

// Test: symbol table keyed by (scope, name) with the `Hash`-based indexer.
#[test]
fn symbol_table_with_hashed_indexer() {
    let mut table: DblHashContainer<Box<Symbol>, Hashed> =
        DblHashContainer::with_capacity(8, 8, 2, 2).unwrap();
    let refs = [("main", "x"), ("main", "y"), ("util", "x"), ("main", "x")];
    for (scope, name) in refs {
        let key = SymbolKey(scope, name);
        let _ = table
            .get_insert_with(&key, |k| {
                Box::new(Symbol {
                    scope: k.0.to_string(),
                    name: k.1.to_string(),
                    uses: 0,
                })
            })
            .unwrap();
        if let Some(s) = table.get_mut(&key) {
            s.uses += 1;
        }
    }
    assert_eq!(table.len(), 3);
    assert_eq!(table.get(&SymbolKey("main", "x")).map(|s| s.uses), Some(2));
    assert_eq!(table.get(&SymbolKey("util", "x")).map(|s| s.uses), Some(1));
    assert!(table.get(&SymbolKey("util", "y")).is_none());

    let (l1, l2) = table.allocated_buckets();
    assert!(l1 >= 1 && l1 <= 3);
    assert!(l2 >= l1 && l2 <= 3);
}
