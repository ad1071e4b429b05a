use avl_tree::TreeSet;

use std::collections::BTreeSet;

use crate::{init_logger, Op};

#[quickcheck]
fn behaves_like_btreeset(ops: Vec<Op<i8>>) -> bool {
    init_logger();
    let mut set = TreeSet::new();
    let mut reference = BTreeSet::new();

    for op in &ops {
        match op {
            Op::Insert(k) => assert_eq!(set.add(*k), reference.insert(*k)),
            Op::Remove(k) => assert_eq!(set.remove(k), reference.remove(k)),
        }
        assert_eq!(set.len(), reference.len());
    }
    set.iter().eq(reference.iter())
}

#[quickcheck]
fn take_any_drains_everything(xs: Vec<i8>) -> bool {
    let mut set: TreeSet<_> = xs.iter().copied().collect();
    let expected: BTreeSet<_> = xs.into_iter().collect();

    let mut drained = Vec::new();
    while let Some(x) = set.take_any() {
        drained.push(x);
    }
    set.is_empty() && drained.iter().eq(expected.iter())
}
