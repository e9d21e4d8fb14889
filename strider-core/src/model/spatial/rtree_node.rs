use crate::model::geometry::{Axis, Rect};

use super::SpatialItem;

pub const DEFAULT_MAX_ENTRIES: usize = 5;

/// smallest supported fan-out; the quadratic split needs at least two
/// entries per side plus one overflow
pub const ABSOLUTE_MIN_MAX_ENTRIES: usize = 3;

/// fan-out limits shared by every node of one tree
#[derive(Copy, Clone, Debug)]
pub struct NodeLimits {
    pub max_entries: usize,
    pub min_entries: usize,
}

impl NodeLimits {
    /// clamp `max_entries` to the supported floor and derive
    /// `min_entries = max(2, floor(0.4 * max_entries))`
    pub fn new(max_entries: usize) -> NodeLimits {
        let max_entries = max_entries.max(ABSOLUTE_MIN_MAX_ENTRIES);
        let min_entries = 2usize.max((0.4 * max_entries as f64) as usize);
        NodeLimits {
            max_entries,
            min_entries,
        }
    }
}

impl Default for NodeLimits {
    fn default() -> NodeLimits {
        NodeLimits::new(DEFAULT_MAX_ENTRIES)
    }
}

/// anything distributable by the quadratic split: leaf items and child
/// nodes both participate with their bounding rectangles
pub(super) trait Bounded {
    fn entry_bounds(&self) -> &Rect;
}

impl<D> Bounded for SpatialItem<D> {
    fn entry_bounds(&self) -> &Rect {
        &self.bounds
    }
}

impl<D> Bounded for RTreeNode<D> {
    fn entry_bounds(&self) -> &Rect {
        &self.bounds
    }
}

#[derive(Debug)]
pub(super) enum NodeKind<D> {
    Leaf(Vec<SpatialItem<D>>),
    Branch(Vec<RTreeNode<D>>),
}

/// one node of the tree: leaf items or child nodes, plus the union
/// bounding rectangle of the contents
#[derive(Debug)]
pub(super) struct RTreeNode<D> {
    pub(super) bounds: Rect,
    pub(super) kind: NodeKind<D>,
}

impl<D> RTreeNode<D> {
    pub(super) fn empty_leaf() -> RTreeNode<D> {
        RTreeNode {
            bounds: Rect::default(),
            kind: NodeKind::Leaf(Vec::new()),
        }
    }

    fn from_items(items: Vec<SpatialItem<D>>) -> RTreeNode<D> {
        RTreeNode {
            bounds: union_bounds(&items),
            kind: NodeKind::Leaf(items),
        }
    }

    pub(super) fn from_children(children: Vec<RTreeNode<D>>) -> RTreeNode<D> {
        RTreeNode {
            bounds: union_bounds(&children),
            kind: NodeKind::Branch(children),
        }
    }

    /// insert an item into this subtree. returns the two replacement
    /// nodes when this node overflowed and split; the caller swaps them
    /// in (growing the parent wide) or, at the root, grows the tree up.
    pub(super) fn insert(
        &mut self,
        item: SpatialItem<D>,
        limits: &NodeLimits,
    ) -> Option<(RTreeNode<D>, RTreeNode<D>)> {
        let split = match &mut self.kind {
            NodeKind::Leaf(items) => {
                items.push(item);
                if items.len() > limits.max_entries {
                    let entries = std::mem::take(items);
                    let (a, b) = quadratic_split(entries, limits);
                    Some((RTreeNode::from_items(a), RTreeNode::from_items(b)))
                } else {
                    None
                }
            }
            NodeKind::Branch(children) => {
                let idx = choose_subtree(children, &item.bounds);
                if let Some((left, right)) = children[idx].insert(item, limits) {
                    children.swap_remove(idx);
                    children.push(left);
                    children.push(right);
                }
                if children.len() > limits.max_entries {
                    let entries = std::mem::take(children);
                    let (a, b) = quadratic_split(entries, limits);
                    Some((RTreeNode::from_children(a), RTreeNode::from_children(b)))
                } else {
                    None
                }
            }
        };
        if split.is_none() {
            self.recompute_bounds();
        }
        split
    }

    /// collect items intersecting the query, descending only into
    /// children whose bounds intersect it
    pub(super) fn find<'a>(&'a self, query: &Rect, out: &mut Vec<&'a SpatialItem<D>>) {
        match &self.kind {
            NodeKind::Leaf(items) => {
                for item in items {
                    if item.bounds.intersects(query) {
                        out.push(item);
                    }
                }
            }
            NodeKind::Branch(children) => {
                for child in children {
                    if child.bounds.intersects(query) {
                        child.find(query, out);
                    }
                }
            }
        }
    }

    fn recompute_bounds(&mut self) {
        self.bounds = match &self.kind {
            NodeKind::Leaf(items) => union_bounds(items),
            NodeKind::Branch(children) => union_bounds(children),
        };
    }

    #[cfg(test)]
    pub(super) fn entry_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(items) => items.len(),
            NodeKind::Branch(children) => children.len(),
        }
    }

    #[cfg(test)]
    pub(super) fn depth(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Branch(children) => {
                1 + children.iter().map(RTreeNode::depth).max().unwrap_or(0)
            }
        }
    }
}

fn union_bounds<E: Bounded>(entries: &[E]) -> Rect {
    entries
        .iter()
        .map(Bounded::entry_bounds)
        .fold(None, |acc: Option<Rect>, b| {
            Some(match acc {
                None => *b,
                Some(u) => u.merge(b),
            })
        })
        .unwrap_or_default()
}

/// pick the child absorbing the rectangle with minimal enlargement,
/// breaking ties by smaller area
fn choose_subtree<D>(children: &[RTreeNode<D>], rect: &Rect) -> usize {
    let mut best = 0;
    let mut best_enlargement = children[0].bounds.merge_enlargement(rect);
    let mut best_area = children[0].bounds.area();
    for (idx, child) in children.iter().enumerate().skip(1) {
        let enlargement = child.bounds.merge_enlargement(rect);
        let area = child.bounds.area();
        if enlargement < best_enlargement
            || (enlargement == best_enlargement && area < best_area)
        {
            best = idx;
            best_enlargement = enlargement;
            best_area = area;
        }
    }
    best
}

/// Guttman's quadratic split: seed two groups with the pair of entries
/// showing the greatest normalized separation on either axis, then deal
/// out the rest by least enlargement
fn quadratic_split<E: Bounded>(
    mut entries: Vec<E>,
    limits: &NodeLimits,
) -> (Vec<E>, Vec<E>) {
    let (seed_a, seed_b) = pick_seeds(&entries);
    let (hi, lo) = if seed_a > seed_b {
        (seed_a, seed_b)
    } else {
        (seed_b, seed_a)
    };
    let second = entries.remove(hi);
    let first = entries.remove(lo);

    let mut bounds_a = *first.entry_bounds();
    let mut bounds_b = *second.entry_bounds();
    let mut group_a = vec![first];
    let mut group_b = vec![second];

    while !entries.is_empty() {
        // a group that must take every remaining entry to reach the
        // minimum fan-out takes them all
        if group_a.len() + entries.len() == limits.min_entries {
            for entry in entries.drain(..) {
                bounds_a = bounds_a.merge(entry.entry_bounds());
                group_a.push(entry);
            }
            break;
        }
        if group_b.len() + entries.len() == limits.min_entries {
            for entry in entries.drain(..) {
                bounds_b = bounds_b.merge(entry.entry_bounds());
                group_b.push(entry);
            }
            break;
        }

        // next entry: the one whose group preference is most pronounced
        let next = entries
            .iter()
            .enumerate()
            .max_by(|(_, x), (_, y)| {
                let dx = (bounds_a.merge_enlargement(x.entry_bounds())
                    - bounds_b.merge_enlargement(x.entry_bounds()))
                .abs();
                let dy = (bounds_a.merge_enlargement(y.entry_bounds())
                    - bounds_b.merge_enlargement(y.entry_bounds()))
                .abs();
                dx.total_cmp(&dy)
            })
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        let entry = entries.remove(next);

        let enlargement_a = bounds_a.merge_enlargement(entry.entry_bounds());
        let enlargement_b = bounds_b.merge_enlargement(entry.entry_bounds());
        let to_a = if enlargement_a != enlargement_b {
            enlargement_a < enlargement_b
        } else if bounds_a.area() != bounds_b.area() {
            bounds_a.area() < bounds_b.area()
        } else {
            group_a.len() < limits.max_entries / 2
        };
        if to_a {
            bounds_a = bounds_a.merge(entry.entry_bounds());
            group_a.push(entry);
        } else {
            bounds_b = bounds_b.merge(entry.entry_bounds());
            group_b.push(entry);
        }
    }
    (group_a, group_b)
}

/// for each axis, find the entry with the highest low coordinate and the
/// entry with the lowest high coordinate; the axis with the greatest
/// normalized separation contributes the seed pair
fn pick_seeds<E: Bounded>(entries: &[E]) -> (usize, usize) {
    let mut best = (0, 1.min(entries.len() - 1));
    let mut best_separation = f64::NEG_INFINITY;
    for axis in [Axis::Horizontal, Axis::Vertical] {
        let mut axis_min = f64::INFINITY;
        let mut axis_max = f64::NEG_INFINITY;
        let mut highest_low = 0;
        let mut lowest_high = 0;
        for (idx, entry) in entries.iter().enumerate() {
            let low = entry.entry_bounds().axis_minimum(axis);
            let high = entry.entry_bounds().axis_maximum(axis);
            axis_min = axis_min.min(low);
            axis_max = axis_max.max(high);
            if low > entries[highest_low].entry_bounds().axis_minimum(axis) {
                highest_low = idx;
            }
            if high < entries[lowest_high].entry_bounds().axis_maximum(axis) {
                lowest_high = idx;
            }
        }
        let span = axis_max - axis_min;
        let gap = entries[highest_low].entry_bounds().axis_minimum(axis)
            - entries[lowest_high].entry_bounds().axis_maximum(axis);
        let separation = if span == 0.0 { 0.0 } else { gap / span };
        if separation > best_separation {
            best_separation = separation;
            best = (highest_low, lowest_high);
        }
    }
    if best.0 == best.1 {
        // degenerate geometry picked one entry twice; any distinct pair
        // seeds a valid split
        best.1 = if best.0 == 0 { 1 } else { 0 };
    }
    best
}
