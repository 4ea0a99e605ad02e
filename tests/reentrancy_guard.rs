#![cfg(test)]

// Reentrancy through user `compare` code.
//
// - A `compare` that searches the container it is being searched by
//   panics in debug builds and is tolerated in release builds.
// - Searching a different container from `compare` is always fine.
// - The guard is released on every exit path, unwinding included.
use rcontainer::{ComparableTo, Container, OwnedContainer};
use std::cmp::Ordering;

// A tag whose comparison also looks `value` up in `target`.
struct Lookaside {
    target: *const OwnedContainer<i32>,
    value: i32,
}

impl ComparableTo<Lookaside> for i32 {
    fn compare(&self, tag: &Lookaside) -> Ordering {
        // SAFETY: every container pointed to outlives the searches in these
        // tests and is only read.
        let c = unsafe { &*tag.target };
        let _ = c.contains(&tag.value);
        self.cmp(&tag.value)
    }
}

fn filled(values: &[i32]) -> OwnedContainer<i32> {
    let mut c = Container::new();
    for &v in values {
        let _ = c.insert(Box::new(v)).unwrap();
    }
    c
}

// Test: searching the same container from inside `compare`.
// Verifies: debug builds panic; the container works again afterwards.
#[cfg(debug_assertions)]
#[test]
fn compare_reentering_container_panics_in_debug() {
    let c = filled(&[1, 2, 3]);
    let tag = Lookaside {
        target: &c,
        value: 2,
    };
    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| c.get(&tag).is_some()));
    assert!(res.is_err(), "expected nested search to panic in debug builds");

    // The outer guard was released during unwinding.
    assert_eq!(c.get(&2), Some(&2));
}

#[cfg(not(debug_assertions))]
#[test]
fn compare_reentering_container_is_tolerated_in_release() {
    let c = filled(&[1, 2, 3]);
    let tag = Lookaside {
        target: &c,
        value: 2,
    };
    assert_eq!(c.get(&tag), Some(&2));
}

// Test: `compare` searching an unrelated container.
// Verifies: guards are per container, so nothing panics in any build.
#[test]
fn compare_may_search_another_container() {
    let side = filled(&[10, 20]);
    let c = filled(&[1, 2, 3]);
    let tag = Lookaside {
        target: &side,
        value: 3,
    };
    assert_eq!(c.get(&tag), Some(&3));
    assert!(c.contains(&tag));
    assert_eq!(c.search(&tag), Ok(2));
}

// Test: an element removed by `delete` is dropped after the search ends.
// Verifies: the drop runs exactly once and the container stays usable.
#[test]
fn delete_drops_outside_search() {
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Noisy {
        key: i32,
        log: Rc<RefCell<Vec<i32>>>,
    }
    impl Drop for Noisy {
        fn drop(&mut self) {
            self.log.borrow_mut().push(self.key);
        }
    }
    impl ComparableTo<Noisy> for Noisy {
        fn compare(&self, tag: &Noisy) -> Ordering {
            self.key.cmp(&tag.key)
        }
    }
    impl ComparableTo<i32> for Noisy {
        fn compare(&self, tag: &i32) -> Ordering {
            self.key.cmp(tag)
        }
    }

    let log = Rc::new(RefCell::new(Vec::new()));
    let mut c: OwnedContainer<Noisy> = Container::new();
    for key in [4, 9] {
        let _ = c
            .insert(Box::new(Noisy {
                key,
                log: log.clone(),
            }))
            .unwrap();
    }
    assert!(c.delete(&9));
    assert_eq!(*log.borrow(), vec![9]);
    assert!(c.contains(&4));
    assert!(!c.contains(&9));
}
