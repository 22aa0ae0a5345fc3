use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use avl::Tree;

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs it against trees of various sizes,
/// each built by inserting keys in ascending order, before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2i32.pow(num_levels) - 1;
        let tree: Tree<_> = (0..num_nodes).collect();
        let largest_element_in_tree = *tree.max().expect("tree is not empty");

        let id = BenchmarkId::from_parameter(num_nodes);
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

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _value = black_box(tree.find(&i));
    });
    bench_helper(c, "delete", |tree, i| {
        tree.remove(&i);
    });
    bench_helper(c, "delete-root", |tree, _| {
        let root = tree.len() as i32 / 2;
        tree.remove(&root);
    });

    bench_helper(c, "insert", |tree, i| {
        tree.insert(i + 1);
    });

    bench_helper(c, "find-miss", |tree, i| {
        let _value = black_box(tree.find(&(i + 1)));
    });
    bench_helper(c, "delete-miss", |tree, i| {
        tree.remove(&(i + 1));
    });

    bench_helper(c, "range", |tree, i| {
        let low = i / 4;
        black_box(tree.range(low..=low + 32).count());
    });
    bench_helper(c, "iter", |tree, _| {
        black_box(tree.iter().count());
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
