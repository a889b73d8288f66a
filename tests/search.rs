use kdvoronoi::{DistanceMetric, KdTree, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(rng: &mut StdRng, count: usize) -> Vec<Point> {
    (0..count)
        .map(|_| [rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)])
        .collect()
}

fn brute_force_distances(points: &[Point], query: Point, metric: DistanceMetric) -> Vec<f64> {
    let mut d: Vec<f64> = points.iter().map(|p| metric.distance(p, &query)).collect();
    d.sort_by(f64::total_cmp);
    d
}

#[test]
fn test_literal_example() {
    let tree: KdTree = KdTree::build(&[[2.0, 3.0], [5.0, 4.0], [9.0, 6.0], [4.0, 7.0], [8.0, 1.0], [7.0, 2.0]]);

    let hit = tree.nearest([7.0, 2.0], DistanceMetric::Euclidean).unwrap();
    assert_eq!(hit.point, [7.0, 2.0]);
    assert_eq!(hit.distance, 0.0);

    let hit = tree.nearest([6.0, 2.0], DistanceMetric::Euclidean).unwrap();
    assert_eq!(hit.point, [7.0, 2.0]);
    assert_eq!(hit.distance, 1.0);
}

#[test]
fn test_nearest_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(1234);
    for count in [1, 2, 10, 257, 2000] {
        let points = random_points(&mut rng, count);
        let tree: KdTree = KdTree::build(&points);
        for metric in DistanceMetric::ALL {
            for _ in 0..200 {
                let query = [rng.gen_range(-70.0..70.0), rng.gen_range(-70.0..70.0)];
                let hit = tree.nearest(query, metric).expect("non-empty tree");
                let expected = brute_force_distances(&points, query, metric)[0];
                assert_eq!(hit.distance, expected, "{} nearest to {:?} among {} points", metric, query, count);
                assert_eq!(hit.distance, metric.distance(&hit.point, &query));
            }
        }
    }
}

#[test]
fn test_nearest_on_integer_grid() {
    // Many equidistant candidates stress the strict pruning comparison.
    let points: Vec<Point> = (0..20).flat_map(|x| (0..20).map(move |y| [x as f64 * 2.0, y as f64 * 2.0])).collect();
    let tree: KdTree = KdTree::build(&points);
    for metric in DistanceMetric::ALL {
        for qx in 0..40 {
            for qy in 0..40 {
                let query = [qx as f64, qy as f64];
                let hit = tree.nearest(query, metric).unwrap();
                assert_eq!(hit.distance, brute_force_distances(&points, query, metric)[0], "{} at {:?}", metric, query);
            }
        }
    }
}

#[test]
fn test_k_nearest_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(99);
    for count in [1, 5, 64, 500] {
        let points = random_points(&mut rng, count);
        let tree: KdTree = KdTree::build(&points);
        for metric in DistanceMetric::ALL {
            for k in [1, 2, 3, 8, 20] {
                let query = [rng.gen_range(-60.0..60.0), rng.gen_range(-60.0..60.0)];
                let found = tree.k_nearest(query, k, metric);
                let expected = brute_force_distances(&points, query, metric);

                assert_eq!(found.len(), k.min(count));
                let distances: Vec<f64> = found.iter().map(|n| n.distance).collect();
                assert_eq!(distances, expected[..k.min(count)], "{} k={} n={}", metric, k, count);
                assert!(distances.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}

#[test]
fn test_k_nearest_returns_distinct_nodes() {
    let points = vec![[1.0, 1.0]; 5];
    let tree: KdTree = KdTree::build(&points);
    let found = tree.k_nearest([0.0, 0.0], 5, DistanceMetric::Chebyshev);
    let mut nodes: Vec<usize> = found.iter().map(|n| n.node.index()).collect();
    nodes.sort_unstable();
    nodes.dedup();
    assert_eq!(nodes.len(), 5);
}

#[test]
fn test_k_nearest_cardinality() {
    let points = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
    let tree: KdTree = KdTree::build(&points);
    assert_eq!(tree.k_nearest([0.2, 0.2], 10, DistanceMetric::Euclidean).len(), 3);
    assert!(tree.k_nearest([0.2, 0.2], 0, DistanceMetric::Euclidean).is_empty());

    let empty: KdTree = KdTree::build(&[]);
    assert!(empty.k_nearest([0.2, 0.2], 4, DistanceMetric::Manhattan).is_empty());
    assert!(empty.nearest([0.2, 0.2], DistanceMetric::Manhattan).is_none());
}

#[test]
fn test_payload_is_returned() {
    let tree = KdTree::build_with(vec![([0.0, 0.0], "origin"), ([10.0, 10.0], "far")]);
    let hit = tree.nearest([9.0, 8.0], DistanceMetric::Manhattan).unwrap();
    assert_eq!(*hit.payload, "far");
    assert_eq!(tree.node(hit.node).payload(), &"far");
}

#[test]
fn test_concurrent_queries() {
    let mut rng = StdRng::seed_from_u64(5);
    let points = random_points(&mut rng, 1000);
    let tree: KdTree = KdTree::build(&points);
    std::thread::scope(|s| {
        for metric in DistanceMetric::ALL {
            let tree = &tree;
            let points = &points;
            s.spawn(move || {
                for i in 0..100 {
                    let query = [i as f64 - 50.0, 50.0 - i as f64];
                    let hit = tree.nearest(query, metric).unwrap();
                    assert_eq!(hit.distance, brute_force_distances(points, query, metric)[0]);
                }
            });
        }
    });
}
