use crate::bounds::BoundingBox;

/// A point in the plane, `[x, y]`.
pub type Point = [f64; 2];

// Sentinel for absent child and parent links.
pub(crate) const NONE: u32 = u32::MAX;

/// Index of a node inside a [`KdTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Position of the node in the tree's pre-order node storage.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn from_raw(raw: u32) -> Option<Self> {
        if raw == NONE { None } else { Some(NodeId(raw)) }
    }
}

/// One partition step of the tree.
#[derive(Clone, Debug)]
pub struct KdNode<T> {
    pub(crate) point: Point,
    pub(crate) range: BoundingBox<2>,
    pub(crate) left: u32,
    pub(crate) right: u32,
    pub(crate) parent: u32,
    pub(crate) axis: u8,
    pub(crate) payload: T,
}

impl<T> KdNode<T> {
    /// The median point stored at this node.
    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Splitting axis, `0` for x and `1` for y.
    pub fn axis(&self) -> usize {
        self.axis as usize
    }

    /// Region split by this node. Only meant for plotting the partition.
    pub fn range(&self) -> &BoundingBox<2> {
        &self.range
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn left(&self) -> Option<NodeId> {
        NodeId::from_raw(self.left)
    }

    pub fn right(&self) -> Option<NodeId> {
        NodeId::from_raw(self.right)
    }

    pub fn parent(&self) -> Option<NodeId> {
        NodeId::from_raw(self.parent)
    }

    pub fn is_leaf(&self) -> bool {
        self.left == NONE && self.right == NONE
    }
}

/// Depth-first visiting order for [`KdTree::traverse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree.
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}

/// A 2D k-d tree built by recursive median splits on alternating axes.
///
/// The structure is immutable once built: nodes cannot be inserted or removed,
/// only the payloads may change. Nodes live in a single arena in pre-order, so
/// the root is always the first node and children refer to their parent by
/// index rather than by pointer.
///
/// Every point in a node's left subtree has `p[axis] <= node.point[axis]` and
/// every point in its right subtree has `p[axis] >= node.point[axis]`.
#[derive(Clone, Debug)]
pub struct KdTree<T = ()> {
    pub(crate) nodes: Vec<KdNode<T>>,
    depth: usize,
}

struct Work {
    start: usize,
    end: usize,
    depth: usize,
    parent: u32,
    is_right: bool,
    range: BoundingBox<2>,
}

impl<T: Default> KdTree<T> {
    /// Builds a tree over `points` with default payloads.
    ///
    /// The root range is the tight extent of the points.
    pub fn build(points: &[Point]) -> Self {
        let items = points.iter().map(|&p| (p, T::default())).collect();
        Self::build_with(items)
    }

    /// Builds a tree over `points` with default payloads and `bounds` as the
    /// root range.
    pub fn build_within(points: &[Point], bounds: BoundingBox<2>) -> Self {
        let items = points.iter().map(|&p| (p, T::default())).collect();
        Self::build_with_bounds(items, bounds)
    }
}

impl<T> KdTree<T> {
    /// Builds a tree over points carrying caller-supplied payloads.
    pub fn build_with(items: Vec<(Point, T)>) -> Self {
        let points: Vec<Point> = items.iter().map(|(p, _)| *p).collect();
        let bounds = BoundingBox::from_points(&points)
            .unwrap_or(BoundingBox::new([0.0, 0.0], [0.0, 0.0]));
        Self::build_with_bounds(items, bounds)
    }

    /// Builds a tree over points carrying payloads, using `bounds` as the root
    /// range.
    pub fn build_with_bounds(items: Vec<(Point, T)>, bounds: BoundingBox<2>) -> Self {
        let (points, payloads): (Vec<Point>, Vec<T>) = items.into_iter().unzip();
        let count = points.len();
        if count == 0 {
            return Self { nodes: Vec::new(), depth: 0 };
        }
        assert!(count < NONE as usize, "a k-d tree holds at most {} points", NONE - 1);

        let mut order: Vec<u32> = (0..count as u32).collect();
        // Node id of every input item, filled as the items are placed.
        let mut node_of_item = vec![0u32; count];
        let mut skeleton: Vec<KdNode<()>> = Vec::with_capacity(count);
        let mut max_depth = 0;

        let mut stack = vec![Work {
            start: 0,
            end: count,
            depth: 0,
            parent: NONE,
            is_right: false,
            range: bounds,
        }];

        while let Some(work) = stack.pop() {
            if work.start == work.end {
                continue;
            }
            let axis = work.depth % 2;
            let median = (work.end - work.start) / 2;

            let slice = &mut order[work.start..work.end];
            slice.select_nth_unstable_by(median, |&a, &b| {
                points[a as usize][axis].total_cmp(&points[b as usize][axis])
            });
            let item = slice[median] as usize;
            let point = points[item];

            let id = skeleton.len() as u32;
            node_of_item[item] = id;
            if work.parent != NONE {
                let parent = &mut skeleton[work.parent as usize];
                if work.is_right {
                    parent.right = id;
                } else {
                    parent.left = id;
                }
            }
            max_depth = max_depth.max(work.depth + 1);

            let (lower, upper) = work.range.split(axis, point[axis]);
            skeleton.push(KdNode {
                point,
                range: work.range,
                left: NONE,
                right: NONE,
                parent: work.parent,
                axis: axis as u8,
                payload: (),
            });

            let mid = work.start + median;
            // Right first so the left subtree is placed next, keeping pre-order.
            stack.push(Work {
                start: mid + 1,
                end: work.end,
                depth: work.depth + 1,
                parent: id,
                is_right: true,
                range: upper,
            });
            stack.push(Work {
                start: work.start,
                end: mid,
                depth: work.depth + 1,
                parent: id,
                is_right: false,
                range: lower,
            });
        }

        let mut tagged: Vec<(u32, T)> = node_of_item.into_iter().zip(payloads).collect();
        tagged.sort_unstable_by_key(|(id, _)| *id);

        let nodes: Vec<KdNode<T>> = skeleton
            .into_iter()
            .zip(tagged)
            .map(|(n, (_, payload))| KdNode {
                point: n.point,
                range: n.range,
                left: n.left,
                right: n.right,
                parent: n.parent,
                axis: n.axis,
                payload,
            })
            .collect();

        log::debug!("built k-d tree with {} nodes, depth {}", nodes.len(), max_depth);
        Self { nodes, depth: max_depth }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels in the tree, `0` when empty.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() { None } else { Some(NodeId(0)) }
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &KdNode<T> {
        &self.nodes[id.index()]
    }

    /// Mutable access to a node's payload. The tree structure is unaffected.
    pub fn payload_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id.index()].payload
    }

    /// All stored points, in pre-order.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.nodes.iter().map(|n| &n.point)
    }

    /// Visits every node in the given depth-first order. Does nothing on an
    /// empty tree.
    pub fn traverse<F>(&self, order: TraversalOrder, mut visit: F)
    where
        F: FnMut(&KdNode<T>),
    {
        match order {
            // The arena is already in pre-order.
            TraversalOrder::PreOrder => self.nodes.iter().for_each(visit),
            _ => {
                for i in self.sequence(order) {
                    visit(&self.nodes[i as usize]);
                }
            }
        }
    }

    /// Visits every node in the given order with mutable access to its payload.
    pub fn traverse_mut<F>(&mut self, order: TraversalOrder, mut visit: F)
    where
        F: FnMut(&Point, &mut T),
    {
        match order {
            TraversalOrder::PreOrder => {
                for node in &mut self.nodes {
                    visit(&node.point, &mut node.payload);
                }
            }
            _ => {
                for i in self.sequence(order) {
                    let node = &mut self.nodes[i as usize];
                    visit(&node.point, &mut node.payload);
                }
            }
        }
    }

    // Node indices in visiting order, computed with an explicit stack.
    fn sequence(&self, order: TraversalOrder) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.nodes.len());
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack: Vec<u32> = Vec::new();
        match order {
            TraversalOrder::PreOrder => out.extend(0..self.nodes.len() as u32),
            TraversalOrder::InOrder => {
                let mut current = 0u32;
                loop {
                    while current != NONE {
                        stack.push(current);
                        current = self.nodes[current as usize].left;
                    }
                    let Some(top) = stack.pop() else { break };
                    out.push(top);
                    current = self.nodes[top as usize].right;
                }
            }
            TraversalOrder::PostOrder => {
                // Node-right-left pre-order, reversed.
                stack.push(0);
                while let Some(top) = stack.pop() {
                    out.push(top);
                    let node = &self.nodes[top as usize];
                    if node.left != NONE { stack.push(node.left); }
                    if node.right != NONE { stack.push(node.right); }
                }
                out.reverse();
            }
        }
        out
    }
}
