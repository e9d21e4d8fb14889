use crate::model::geometry::Rect;

use super::rtree_node::RTreeNode;
use super::{NodeLimits, SpatialItem};

/// a rectangle R-tree with Guttman quadratic split.
///
/// the planner indexes every platform top-face sub-segment here and
/// queries by the jump/fall arc areas, so `find` must stay sub-linear as
/// scenes grow to thousands of segments. payloads are generic; the tree
/// never interprets them.
#[derive(Debug)]
pub struct RTree<D> {
    root: RTreeNode<D>,
    limits: NodeLimits,
    len: usize,
}

impl<D> RTree<D> {
    pub fn new() -> RTree<D> {
        RTree::with_limits(NodeLimits::default())
    }

    pub fn with_limits(limits: NodeLimits) -> RTree<D> {
        RTree {
            root: RTreeNode::empty_leaf(),
            limits,
            len: 0,
        }
    }

    /// number of items in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn limits(&self) -> &NodeLimits {
        &self.limits
    }

    /// index `data` under `bounds`. a root overflow grows the tree one
    /// level taller; interior overflows propagate sideways into parents.
    pub fn insert(&mut self, key: u64, bounds: Rect, data: D) {
        let item = SpatialItem::new(key, bounds, data);
        if let Some((left, right)) = self.root.insert(item, &self.limits) {
            self.root = RTreeNode::from_children(vec![left, right]);
        }
        self.len += 1;
    }

    /// all items whose rectangle intersects the query rectangle
    pub fn find(&self, query: &Rect) -> Vec<&SpatialItem<D>> {
        let mut out = Vec::new();
        self.root.find(query, &mut out);
        out
    }

    /// reset to a fresh empty root
    pub fn clear(&mut self) {
        self.root = RTreeNode::empty_leaf();
        self.len = 0;
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.root.depth()
    }

    /// verify the structural invariants: fan-out bounds on every
    /// non-root node, and bounding rectangles equal to the union of
    /// their contents. test support only.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        check_node(&self.root, &self.limits, true);
    }
}

impl<D> Default for RTree<D> {
    fn default() -> RTree<D> {
        RTree::new()
    }
}

#[cfg(test)]
fn check_node<D>(node: &RTreeNode<D>, limits: &NodeLimits, is_root: bool) {
    use super::rtree_node::NodeKind;

    if !is_root {
        assert!(
            node.entry_count() >= limits.min_entries,
            "node underflow: {} < {}",
            node.entry_count(),
            limits.min_entries
        );
    }
    assert!(
        node.entry_count() <= limits.max_entries,
        "node overflow: {} > {}",
        node.entry_count(),
        limits.max_entries
    );
    match &node.kind {
        NodeKind::Leaf(items) => {
            let union = items
                .iter()
                .map(|i| i.bounds)
                .reduce(|a, b| a.merge(&b))
                .unwrap_or_default();
            assert_eq!(node.bounds, union, "leaf bounds must cover items");
        }
        NodeKind::Branch(children) => {
            assert!(!children.is_empty(), "branch nodes are never empty");
            let union = children
                .iter()
                .map(|c| c.bounds)
                .reduce(|a, b| a.merge(&b))
                .unwrap_or_default();
            assert_eq!(node.bounds, union, "branch bounds must cover children");
            for child in children {
                check_node(child, limits, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::model::geometry::Point;

    use super::*;

    fn unit_rect(x: f64, y: f64) -> Rect {
        Rect::from_corners(Point::new(x, y), Point::new(x + 1.0, y + 1.0))
    }

    #[test]
    fn test_find_on_empty() {
        let tree: RTree<u32> = RTree::new();
        assert!(tree.find(&unit_rect(0.0, 0.0)).is_empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_insert_and_find() {
        let mut tree = RTree::new();
        for i in 0..5u64 {
            tree.insert(i, unit_rect(i as f64 * 3.0, 0.0), i);
        }
        let found = tree.find(&unit_rect(3.0, 0.0).inflate(0.1, 0.1));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key, 1);
    }

    /// the sixth insert at max_entries = 5 splits the root into a branch
    /// with two leaves whose bounds cover all six items
    #[test]
    fn test_root_split_grows_tree_up() {
        let mut tree = RTree::with_limits(NodeLimits::new(5));
        for i in 0..6u64 {
            tree.insert(i, unit_rect(i as f64, 0.0), ());
        }
        assert_eq!(tree.depth(), 2);
        tree.check_invariants();
        // every item is still findable through the new root
        let everything = Rect::from_corners(Point::new(-1.0, -1.0), Point::new(7.0, 2.0));
        assert_eq!(tree.find(&everything).len(), 6);
    }

    #[test]
    fn test_min_entries_floor() {
        let limits = NodeLimits::new(5);
        assert_eq!(limits.min_entries, 2);
        let limits = NodeLimits::new(10);
        assert_eq!(limits.min_entries, 4);
        // max_entries below the supported floor is clamped
        let limits = NodeLimits::new(1);
        assert_eq!(limits.max_entries, 3);
        assert_eq!(limits.min_entries, 2);
    }

    #[test]
    fn test_clear_resets() {
        let mut tree = RTree::new();
        for i in 0..20u64 {
            tree.insert(i, unit_rect(i as f64, 0.0), ());
        }
        tree.clear();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.depth(), 1);
        let everything = Rect::from_corners(Point::new(-1.0, -1.0), Point::new(30.0, 2.0));
        assert!(tree.find(&everything).is_empty());
    }

    /// randomized soak: invariants hold at every step and every query
    /// agrees with a linear scan
    #[test]
    fn test_query_completeness_randomized() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tree = RTree::with_limits(NodeLimits::new(5));
        let mut reference: Vec<(u64, Rect)> = Vec::new();

        for key in 0..250u64 {
            let x = rng.random_range(-100.0..100.0);
            let y = rng.random_range(-100.0..100.0);
            let w = rng.random_range(0.1..8.0);
            let h = rng.random_range(0.1..8.0);
            let rect = Rect::new(x, y, w, h);
            tree.insert(key, rect, ());
            reference.push((key, rect));
        }
        tree.check_invariants();
        assert_eq!(tree.len(), 250);
        assert!(tree.depth() > 2, "250 entries must overflow two levels");

        for _ in 0..50 {
            let x = rng.random_range(-110.0..110.0);
            let y = rng.random_range(-110.0..110.0);
            let query = Rect::new(x, y, 20.0, 20.0);
            let mut expected: Vec<u64> = reference
                .iter()
                .filter(|(_, r)| r.intersects(&query))
                .map(|(k, _)| *k)
                .collect();
            let mut actual: Vec<u64> = tree.find(&query).iter().map(|i| i.key).collect();
            expected.sort_unstable();
            actual.sort_unstable();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_payload_round_trip() {
        let mut tree = RTree::new();
        tree.insert(9, unit_rect(0.0, 0.0), "floor");
        let found = tree.find(&unit_rect(0.5, 0.5));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].data, "floor");
    }
}
