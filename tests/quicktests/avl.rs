use avl_tree::{AvlTree, Duplicates, SearchTree, Traversal, TreeConfig};

use std::collections::{BTreeMap, BTreeSet};

use crate::{init_logger, Op};

/// Applies a set of operations to a tree and a multiset (value -> count).
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same values in both, and that the tree stayed
/// balanced the whole way.
fn do_ops<K>(ops: &[Op<K>], tree: &mut AvlTree<K>, counts: &mut BTreeMap<K, usize>)
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                tree.insert(k.clone());
                *counts.entry(k.clone()).or_default() += 1;
            }
            Op::Remove(k) => {
                let removed = tree.remove_value(k);
                match counts.get_mut(k) {
                    Some(count) => {
                        assert!(removed);
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(k);
                        }
                    }
                    None => assert!(!removed),
                }
            }
        }
        assert_eq!(tree.check_invariants(), Ok(()));
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    init_logger();
    let mut tree = AvlTree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    let expected = counts
        .iter()
        .flat_map(|(k, count)| std::iter::repeat(k).take(*count));
    tree.iter().eq(expected)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.find(x).get() == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let added: BTreeSet<_> = xs.into_iter().collect();
    let nots: BTreeSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.find(x).is_valid())
}

#[quickcheck]
fn rejecting_duplicates_matches_a_set(xs: Vec<i8>) -> bool {
    let mut tree = AvlTree::with_config(TreeConfig::new().duplicates(Duplicates::Reject));
    let mut set = BTreeSet::new();

    for x in &xs {
        assert_eq!(tree.insert(*x).is_some(), set.insert(*x));
    }
    tree.check_invariants().is_ok() && tree.iter().eq(set.iter())
}

#[quickcheck]
fn removing_everything_empties_the_tree(xs: Vec<i8>, seed: Vec<usize>) -> bool {
    let mut tree: AvlTree<_> = xs.iter().copied().collect();

    // Remove in an order derived from `seed` rather than insertion order.
    let mut remaining = xs;
    let mut seed = seed.into_iter().cycle();
    while !remaining.is_empty() {
        let pos = seed.next().unwrap_or(0) % remaining.len();
        let x = remaining.swap_remove(pos);
        assert!(tree.remove_value(&x));
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    tree.is_empty() && !tree.minimum().is_valid() && !tree.maximum().is_valid()
}

#[quickcheck]
fn removing_by_handle(xs: Vec<i8>) -> bool {
    let mut tree = AvlTree::new();
    let ids: Vec<_> = xs.iter().map(|x| tree.insert(*x).unwrap()).collect();

    for (x, id) in xs.iter().zip(&ids) {
        assert_eq!(tree.take(*id), Some(*x));
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    // Every handle is stale now.
    tree.is_empty() && ids.iter().all(|id| !tree.remove(*id))
}

#[quickcheck]
fn height_is_logarithmic(xs: Vec<u16>) -> bool {
    let mut sorted = xs;
    sorted.sort_unstable();
    // Sorted input is the worst case for an unbalanced tree.
    let tree: AvlTree<_> = sorted.into_iter().collect();

    tree.height() as f64 <= 1.44 * ((tree.len() + 2) as f64).log2()
}

#[quickcheck]
fn matches_the_unbalanced_tree(ops: Vec<Op<i8>>) -> bool {
    let mut avl = AvlTree::new();
    let mut plain = SearchTree::new();

    for op in &ops {
        match op {
            Op::Insert(k) => {
                avl.insert(*k);
                plain.insert(*k);
            }
            Op::Remove(k) => assert_eq!(avl.remove_value(k), plain.remove_value(k)),
        }
    }
    plain.check_invariants().is_ok() && avl.iter().eq(plain.iter())
}

#[quickcheck]
fn every_traversal_visits_every_value(xs: Vec<i8>) -> bool {
    let tree: AvlTree<_> = xs.iter().copied().collect();
    let mut expected = xs;
    expected.sort_unstable();

    [
        Traversal::PreOrder,
        Traversal::InOrder,
        Traversal::PostOrder,
        Traversal::BreadthFirst,
    ]
    .into_iter()
    .all(|order| {
        let mut seen: Vec<_> = tree.traverse(order).copied().collect();
        seen.sort_unstable();
        seen == expected
    })
}
