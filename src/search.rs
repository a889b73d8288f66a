use crate::kdtree::{KdTree, NodeId, Point, NONE};
use crate::metric::DistanceMetric;

/// A point found by a nearest-neighbour query.
#[derive(Debug)]
pub struct Neighbor<'a, T> {
    pub node: NodeId,
    pub point: Point,
    pub payload: &'a T,
    /// Distance proxy under the metric used for the query.
    pub distance: f64,
}

impl<T> Clone for Neighbor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Neighbor<'_, T> {}

#[derive(Clone, Copy)]
struct Best {
    node: u32,
    dist: f64,
}

/// Fixed-capacity candidate list, ordered nearest first.
///
/// Slots past `len` are empty and count as infinitely far.
struct KBest {
    k: usize,
    slots: Vec<Best>,
}

impl KBest {
    fn new(k: usize) -> Self {
        Self { k, slots: Vec::with_capacity(k + 1) }
    }

    fn insert(&mut self, candidate: Best) {
        for i in 0..self.slots.len() {
            if candidate.dist < self.slots[i].dist {
                self.slots.insert(i, candidate);
                self.slots.truncate(self.k);
                return;
            }
        }
        if self.slots.len() < self.k {
            self.slots.push(candidate);
        }
    }

    fn worst(&self) -> f64 {
        if self.slots.len() < self.k {
            f64::INFINITY
        } else {
            self.slots[self.k - 1].dist
        }
    }
}

impl<T> KdTree<T> {
    /// Finds the stored point closest to `query` under `metric`.
    ///
    /// Returns `None` only for an empty tree. When several points are equally
    /// close the first one reached by the search wins.
    pub fn nearest(&self, query: Point, metric: DistanceMetric) -> Option<Neighbor<'_, T>> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut best = Best { node: NONE, dist: f64::INFINITY };
        self.nearest_recursive(0, &query, metric, &mut best);
        if best.node == NONE {
            return None;
        }
        Some(self.neighbor(best))
    }

    /// Finds up to `k` stored points closest to `query`, nearest first.
    ///
    /// Returns fewer than `k` neighbours when the tree holds fewer points, and
    /// nothing at all for `k == 0`.
    pub fn k_nearest(&self, query: Point, k: usize, metric: DistanceMetric) -> Vec<Neighbor<'_, T>> {
        if k == 0 || self.nodes.is_empty() {
            return Vec::new();
        }
        let mut bests = KBest::new(k);
        self.k_nearest_recursive(0, &query, metric, &mut bests);
        log::trace!(
            "k_nearest({:?}, k={}, {}) found {} of {} points",
            query,
            k,
            metric,
            bests.slots.len(),
            self.nodes.len()
        );
        bests.slots.into_iter().map(|b| self.neighbor(b)).collect()
    }

    fn neighbor(&self, best: Best) -> Neighbor<'_, T> {
        let node = &self.nodes[best.node as usize];
        Neighbor {
            node: NodeId(best.node),
            point: node.point,
            payload: &node.payload,
            distance: best.dist,
        }
    }

    // Recursion depth is bounded by the tree depth, which the median split
    // keeps at ceil(log2(n + 1)).
    fn nearest_recursive(&self, node_idx: u32, query: &Point, metric: DistanceMetric, best: &mut Best) {
        if node_idx == NONE {
            return;
        }
        let node = &self.nodes[node_idx as usize];
        let axis = node.axis as usize;

        // Visit the side of the split holding the query first.
        let (near, far) = if query[axis] <= node.point[axis] {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        self.nearest_recursive(near, query, metric, best);

        let dist = metric.distance(&node.point, query);
        if best.node == NONE || dist < best.dist {
            *best = Best { node: node_idx, dist };
        }

        // The squared gap to the splitting line is a lower bound for all three
        // proxies, whatever the metric.
        let gap = node.point[axis] - query[axis];
        if gap * gap < best.dist {
            self.nearest_recursive(far, query, metric, best);
        }
    }

    fn k_nearest_recursive(&self, node_idx: u32, query: &Point, metric: DistanceMetric, bests: &mut KBest) {
        if node_idx == NONE {
            return;
        }
        let node = &self.nodes[node_idx as usize];
        let axis = node.axis as usize;

        let (near, far) = if query[axis] <= node.point[axis] {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        self.k_nearest_recursive(near, query, metric, bests);

        bests.insert(Best { node: node_idx, dist: metric.distance(&node.point, query) });

        let gap = node.point[axis] - query[axis];
        if gap * gap < bests.worst() {
            self.k_nearest_recursive(far, query, metric, bests);
        }
    }
}
