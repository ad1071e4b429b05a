use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use avl_tree::{AvlTree, SearchTree, Traversal};

#[derive(Clone)]
enum TreeEnum<T> {
    Avl(AvlTree<T>),
    Plain(SearchTree<T>),
}

impl<T> TreeEnum<T> {
    fn find(&self, k: &T) -> Option<&T>
    where
        T: Ord,
    {
        match self {
            Self::Avl(t) => t.find(k).get(),
            Self::Plain(t) => t.find(k).get(),
        }
    }

    fn insert(&mut self, k: T)
    where
        T: Ord,
    {
        match self {
            Self::Avl(t) => {
                t.insert(k);
            }
            Self::Plain(t) => {
                t.insert(k);
            }
        }
    }

    fn remove(&mut self, k: &T)
    where
        T: Ord,
    {
        match self {
            Self::Avl(t) => {
                t.remove_value(k);
            }
            Self::Plain(t) => {
                t.remove_value(k);
            }
        }
    }
}

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs it for various sizes against the
/// balanced and the plain tree before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut TreeEnum<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;

        let avl_tree: AvlTree<_> = (0..num_nodes as i32).collect();
        let largest_element_in_tree = *avl_tree.maximum().get().unwrap_or(&0);

        // Inserting in a balanced order keeps the plain tree as short as the AVL tree, so the
        // comparison measures the rebalancing bookkeeping alone.
        let plain_tree: SearchTree<_> = avl_tree.traverse(Traversal::BreadthFirst).copied().collect();

        let tree_tests = [
            ("avl", TreeEnum::Avl(avl_tree)),
            ("plain", TreeEnum::Plain(plain_tree)),
        ];
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _value = black_box(tree.find(&i));
    });
    bench_helper(c, "remove", |tree, i| {
        tree.remove(&i);
    });

    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });

    bench_helper(c, "find-miss", |tree, i| {
        let _value = black_box(tree.find(&(i + 1)));
    });
    bench_helper(c, "remove-miss", |tree, i| {
        tree.remove(&(i + 1));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
