use kdvoronoi::{KdTree, Point, TraversalOrder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(rng: &mut StdRng, count: usize) -> Vec<Point> {
    (0..count)
        .map(|_| [rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)])
        .collect()
}

fn sorted(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
    points
}

fn collect(tree: &KdTree, order: TraversalOrder) -> Vec<Point> {
    let mut out = Vec::new();
    tree.traverse(order, |n| out.push(*n.point()));
    out
}

#[test]
fn test_build_preserves_multiset() {
    let mut rng = StdRng::seed_from_u64(42);
    for count in [0, 1, 2, 3, 7, 64, 1000] {
        let points = random_points(&mut rng, count);
        let tree: KdTree = KdTree::build(&points);
        assert_eq!(tree.len(), count);
        for order in [TraversalOrder::PreOrder, TraversalOrder::InOrder, TraversalOrder::PostOrder] {
            let visited = collect(&tree, order);
            assert_eq!(sorted(visited), sorted(points.clone()), "{:?} lost points for n={}", order, count);
        }
    }
}

#[test]
fn test_build_keeps_duplicates() {
    let points = vec![[1.0, 1.0]; 9];
    let tree: KdTree = KdTree::build(&points);
    assert_eq!(tree.len(), 9);
    assert_eq!(collect(&tree, TraversalOrder::InOrder), points);
    assert_eq!(tree.depth(), 4);
}

#[test]
fn test_depth_bound() {
    let mut rng = StdRng::seed_from_u64(7);
    for count in [1, 2, 5, 16, 100, 1023, 1024, 5000] {
        let points = random_points(&mut rng, count);
        let tree: KdTree = KdTree::build(&points);
        let bound = ((count + 1) as f64).log2().ceil() as usize;
        assert!(tree.depth() <= bound + 1, "depth {} exceeds bound {} for n={}", tree.depth(), bound + 1, count);
    }

    // Collinear points cannot unbalance a median split.
    let line: Vec<Point> = (0..4096).map(|i| [i as f64, 0.0]).collect();
    let tree: KdTree = KdTree::build(&line);
    assert_eq!(tree.depth(), 13);
}

// Left subtree points are <= the split value on the node's axis, right subtree points >=.
#[test]
fn test_partition_invariant() {
    let mut rng = StdRng::seed_from_u64(3);
    // Coarse integer grid to force plenty of ties.
    let points: Vec<Point> = (0..500)
        .map(|_| [rng.gen_range(0..6) as f64, rng.gen_range(0..6) as f64])
        .collect();
    let tree: KdTree = KdTree::build(&points);

    let subtree_points = |root| {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = tree.node(id);
            out.push(*node.point());
            stack.extend(node.left());
            stack.extend(node.right());
        }
        out
    };

    let mut stack = vec![(tree.root().unwrap(), 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let node = tree.node(id);
        let axis = node.axis();
        let split = node.point()[axis];
        assert_eq!(axis, depth % 2);
        if let Some(left) = node.left() {
            assert_eq!(tree.node(left).parent(), Some(id));
            assert!(subtree_points(left).iter().all(|p| p[axis] <= split));
            stack.push((left, depth + 1));
        }
        if let Some(right) = node.right() {
            assert_eq!(tree.node(right).parent(), Some(id));
            assert!(subtree_points(right).iter().all(|p| p[axis] >= split));
            stack.push((right, depth + 1));
        }
    }
}

#[test]
fn test_build_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(11);
    let points: Vec<Point> = (0..300)
        .map(|_| [rng.gen_range(0..10) as f64, rng.gen_range(0..10) as f64])
        .collect();
    let a: KdTree = KdTree::build(&points);
    let b: KdTree = KdTree::build(&points);
    assert_eq!(collect(&a, TraversalOrder::PreOrder), collect(&b, TraversalOrder::PreOrder));
}
