use avl::observe::{Imbalance, Observer};
use avl::{max_height, Tree};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Counts rebalances so tests can assert on them per operation.
#[derive(Default)]
struct Rebalances(usize);

impl<K> Observer<K> for Rebalances {
    fn rebalanced(&mut self, _case: Imbalance, _key: &K) {
        self.0 += 1;
    }
}

/// Applies a set of operations to a tree and a `BTreeSet`, checking the tree's invariants after
/// every step. Returns `false` as soon as they disagree.
fn do_ops<K>(ops: &[Op<K>], tree: &mut Tree<K>, set: &mut BTreeSet<K>) -> bool
where
    K: Ord + Clone,
{
    for op in ops {
        let agrees = match op {
            Op::Insert(k) => tree.insert(k.clone()) == set.insert(k.clone()),
            Op::Remove(k) => tree.remove(k).is_some() == set.remove(k),
        };
        if !agrees || tree.validate().is_err() || tree.len() != set.len() {
            return false;
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set) && tree.iter().eq(set.iter())
}

#[quickcheck]
fn fuzz_multiple_operations_u16(ops: Vec<Op<u16>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set) && tree.iter().eq(set.iter())
}

#[quickcheck]
fn sorted_and_deduplicated(xs: Vec<i32>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let set: BTreeSet<_> = xs.into_iter().collect();

    tree.len() == set.len() && tree.iter().eq(set.iter())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x) && tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.remove(delete);
    }

    let deleted: HashSet<_> = deletes.into_iter().collect();
    let still_present: BTreeSet<_> = xs.into_iter().filter(|x| !deleted.contains(x)).collect();

    tree.is_valid() && tree.iter().eq(still_present.iter())
}

#[quickcheck]
fn duplicate_inserts_are_noops(xs: Vec<i16>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let before: Vec<_> = tree.iter().copied().collect();
    let height = tree.height();

    let reinserted = xs.iter().any(|x| tree.insert(*x));

    !reinserted && tree.height() == height && tree.iter().eq(before.iter())
}

#[quickcheck]
fn height_is_bounded(xs: Vec<u32>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();

    tree.height() < max_height(tree.len()) as isize
}

#[quickcheck]
fn insert_rebalances_at_most_once(xs: Vec<i16>) -> bool {
    let mut tree = Tree::new();
    xs.into_iter().all(|x| {
        let mut rebalances = Rebalances::default();
        tree.insert_with(x, &mut rebalances);
        rebalances.0 <= 1
    })
}

#[quickcheck]
fn successor_and_predecessor_match_set(xs: Vec<i8>, probe: i8) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let set: BTreeSet<_> = xs.into_iter().collect();

    let successor = set.range(probe..).find(|&&x| x > probe);
    let predecessor = set.range(..probe).next_back();

    tree.successor(&probe) == successor && tree.predecessor(&probe) == predecessor
}

#[quickcheck]
fn range_matches_set(xs: Vec<i8>, low: i8, high: i8) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let set: BTreeSet<_> = xs.into_iter().collect();

    let expected: Vec<_> = set.iter().filter(|&&x| low <= x && x <= high).collect();
    tree.range(low..=high).eq(expected)
}

#[quickcheck]
fn traversals_visit_every_key_once(xs: Vec<i16>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();

    let mut preorder: Vec<_> = tree.preorder().collect();
    let mut postorder: Vec<_> = tree.postorder().collect();
    // Both orders agree on which key is the root.
    let same_root = postorder.last().copied() == preorder.first().copied();
    preorder.sort();
    postorder.sort();

    same_root
        && tree.preorder().len() == tree.len()
        && preorder.iter().copied().eq(tree.iter())
        && postorder.iter().copied().eq(tree.iter())
}
