use std::collections::HashMap;

use indexmap::IndexMap;

use crate::model::geometry::{Axis, Point, PointKey, Rect};
use crate::model::movement::ActionSet;
use crate::model::scene::PlatformId;

use super::{GraphError, LinkId, NavLink, NavNode};

/// the links a platform currently contributes to the graph, together
/// with its bounds as last observed. the per-tick scene diff compares
/// fresh snapshots against these records.
#[derive(Clone, Debug)]
pub struct PlatformRecord {
    pub bounds: Rect,
    pub links: Vec<LinkId>,
}

/// the traversal graph: an arena of nodes keyed by grid position and
/// links keyed by identity, plus the two platform ownership maps the
/// incremental refresh relies on.
///
/// nodes hold link identities and links hold node keys; neither side
/// owns the other, so removal is a table operation rather than a
/// reference-count dance.
#[derive(Debug, Default)]
pub struct NavGraph {
    nodes: HashMap<PointKey, NavNode>,
    links: IndexMap<LinkId, NavLink>,
    link_owner: HashMap<LinkId, PlatformId>,
    platforms: HashMap<PlatformId, PlatformRecord>,
}

impl NavGraph {
    pub fn new() -> NavGraph {
        NavGraph::default()
    }

    /// number of links in the graph
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.links.clear();
        self.link_owner.clear();
        self.platforms.clear();
    }

    /// insert a link owned by `platform`, merging its endpoints with any
    /// nodes already at those positions. re-adding an identical link is
    /// a no-op, so linker passes over unchanged geometry converge.
    pub fn add(&mut self, link: NavLink, platform: PlatformId, platform_bounds: Rect) -> LinkId {
        let id = link.id();
        for (key, location) in [
            (link.start_key(), link.line().start()),
            (link.end_key(), link.line().end()),
        ] {
            let node = self
                .nodes
                .entry(key)
                .or_insert_with(|| NavNode::new(location));
            node.attach(id);
        }
        self.links.entry(id).or_insert(link);
        self.link_owner.insert(id, platform);
        let record = self
            .platforms
            .entry(platform)
            .or_insert_with(|| PlatformRecord {
                bounds: platform_bounds,
                links: Vec::new(),
            });
        record.bounds = platform_bounds;
        if !record.links.contains(&id) {
            record.links.push(id);
        }
        id
    }

    /// remove a link. with `remove_connected`, every link adjacent at
    /// either endpoint whose action set intersects `connected_mask` is
    /// removed as well; this is how deleting a platform segment takes
    /// its dependent jump and fall connectors with it. nodes left with
    /// no links are dropped. returns false when the link is unknown.
    pub fn remove(
        &mut self,
        id: LinkId,
        remove_connected: bool,
        connected_mask: ActionSet,
    ) -> bool {
        let Some(link) = self.links.shift_remove(&id) else {
            return false;
        };

        let mut cascade: Vec<LinkId> = Vec::new();
        for key in [link.start_key(), link.end_key()] {
            let Some(node) = self.nodes.get_mut(&key) else {
                debug_assert!(false, "link endpoint missing from node table");
                continue;
            };
            node.detach(&id);
            if remove_connected {
                for other in node.links() {
                    let connected = self
                        .links
                        .get(other)
                        .map(|l| l.actions().allows_any(connected_mask))
                        .unwrap_or(false);
                    if connected {
                        cascade.push(*other);
                    }
                }
            }
            if self.nodes.get(&key).map(NavNode::is_isolated).unwrap_or(false) {
                self.nodes.remove(&key);
            }
        }

        if let Some(owner) = self.link_owner.remove(&id) {
            if let Some(record) = self.platforms.get_mut(&owner) {
                record.links.retain(|l| *l != id);
                if record.links.is_empty() {
                    self.platforms.remove(&owner);
                }
            }
        }

        for other in cascade {
            self.remove(other, false, ActionSet::empty());
        }
        true
    }

    pub fn contains_node(&self, key: PointKey) -> bool {
        self.nodes.contains_key(&key)
    }

    /// true when the link is present and its action set carries every
    /// flag in `mask`
    pub fn contains_link(&self, id: LinkId, mask: ActionSet) -> bool {
        self.links
            .get(&id)
            .map(|l| l.actions().allows_all(mask))
            .unwrap_or(false)
    }

    pub fn link(&self, id: LinkId) -> Option<&NavLink> {
        self.links.get(&id)
    }

    pub fn require_link(&self, id: LinkId) -> Result<&NavLink, GraphError> {
        self.links.get(&id).ok_or(GraphError::LinkNotFound(id))
    }

    pub fn node(&self, key: PointKey) -> Option<&NavNode> {
        self.nodes.get(&key)
    }

    pub fn owner(&self, id: LinkId) -> Option<PlatformId> {
        self.link_owner.get(&id).copied()
    }

    pub fn require_owner(&self, id: LinkId) -> Result<PlatformId, GraphError> {
        self.owner(id).ok_or(GraphError::OwnerNotFound(id))
    }

    /// identities of the links currently owned by a platform
    pub fn platform_links(&self, platform: PlatformId) -> Vec<LinkId> {
        self.platforms
            .get(&platform)
            .map(|r| r.links.clone())
            .unwrap_or_default()
    }

    pub fn platform_bounds(&self, platform: PlatformId) -> Option<Rect> {
        self.platforms.get(&platform).map(|r| r.bounds)
    }

    /// the platforms currently contributing links, with their bounds as
    /// last observed
    pub fn platform_entries(&self) -> Vec<(PlatformId, Rect)> {
        self.platforms
            .iter()
            .map(|(id, record)| (*id, record.bounds))
            .collect()
    }

    pub fn links(&self) -> impl Iterator<Item = (&LinkId, &NavLink)> {
        self.links.iter()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NavNode> {
        self.nodes.values()
    }

    /// every link touching either endpoint of `id`, excluding `id`
    pub fn adjacent_links(&self, id: LinkId) -> Vec<LinkId> {
        let Some(link) = self.links.get(&id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for key in [link.start_key(), link.end_key()] {
            if let Some(node) = self.nodes.get(&key) {
                for other in node.links() {
                    if *other != id && !out.contains(other) {
                        out.push(*other);
                    }
                }
            }
        }
        out
    }

    /// the best representative link of a platform for a body standing on
    /// it: the only link if there is one, else the platform's links are
    /// filtered to those overlapping the body's bounds horizontally and
    /// the one nearest the body's feet wins
    pub fn find_object_links(&self, platform: PlatformId, other: &Rect) -> Option<LinkId> {
        let record = self.platforms.get(&platform)?;
        if record.links.len() == 1 {
            return record.links.first().copied();
        }
        let feet = other.bottom_center();
        record
            .links
            .iter()
            .filter(|id| {
                self.links
                    .get(*id)
                    .map(|l| other.overlaps_line_on_axis(l.line(), Axis::Horizontal))
                    .unwrap_or(false)
            })
            .min_by(|a, b| {
                let da = self.links[*a].line().distance_to(&feet);
                let db = self.links[*b].line().distance_to(&feet);
                da.total_cmp(&db)
            })
            .copied()
    }

    /// the link whose geometry is nearest to a world position
    pub fn find_closest_link(&self, point: &Point) -> Option<LinkId> {
        self.links
            .iter()
            .min_by(|(_, a), (_, b)| {
                a.line()
                    .distance_to(point)
                    .total_cmp(&b.line().distance_to(point))
            })
            .map(|(id, _)| *id)
    }

    /// structural invariant check: every link's endpoints are in the
    /// node table and both adjacency sets contain the link; every
    /// adjacency entry resolves to a stored link; no node is isolated.
    pub fn is_consistent(&self) -> bool {
        for (id, link) in self.links.iter() {
            for key in [link.start_key(), link.end_key()] {
                match self.nodes.get(&key) {
                    Some(node) if node.contains(id) => {}
                    _ => return false,
                }
            }
        }
        for node in self.nodes.values() {
            if node.is_isolated() {
                return false;
            }
            for id in node.links() {
                if !self.links.contains_key(id) {
                    return false;
                }
            }
        }
        self.link_owner.len() == self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::geometry::Line;
    use crate::model::movement::Flow;

    use super::*;

    fn walk(name: &str, x1: f64, x2: f64, y: f64) -> NavLink {
        let line = Line::new(Point::new(x1, y), Point::new(x2, y)).unwrap();
        NavLink::new(name, line, ActionSet::TRAVERSING, Flow::ALL)
    }

    fn jump(name: &str, from: Point, to: Point) -> NavLink {
        let line = Line::new(from, to).unwrap();
        NavLink::new(name, line, ActionSet::JUMPING, Flow::START_TO_END)
    }

    fn bounds(x1: f64, x2: f64, y: f64) -> Rect {
        Rect::from_corners(Point::new(x1, y - 1.0), Point::new(x2, y))
    }

    #[test]
    fn test_add_merges_shared_nodes() {
        let mut graph = NavGraph::new();
        let p = PlatformId(1);
        graph.add(walk("floor walk 0", 0.0, 5.0, 1.0), p, bounds(0.0, 10.0, 1.0));
        graph.add(walk("floor walk 1", 5.0, 10.0, 1.0), p, bounds(0.0, 10.0, 1.0));
        assert_eq!(graph.len(), 2);
        // three nodes, the middle one shared by both links
        assert_eq!(graph.node_count(), 3);
        let middle = graph.node(Point::new(5.0, 1.0).key()).unwrap();
        assert_eq!(middle.degree(), 2);
        assert!(graph.is_consistent());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut graph = NavGraph::new();
        let p = PlatformId(1);
        let id1 = graph.add(walk("floor walk 0", 0.0, 5.0, 1.0), p, bounds(0.0, 5.0, 1.0));
        let id2 = graph.add(walk("floor walk 0", 0.0, 5.0, 1.0), p, bounds(0.0, 5.0, 1.0));
        assert_eq!(id1, id2);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.platform_links(p).len(), 1);
        assert!(graph.is_consistent());
    }

    #[test]
    fn test_remove_detaches_and_drops_empty_nodes() {
        let mut graph = NavGraph::new();
        let p = PlatformId(1);
        let id = graph.add(walk("floor walk 0", 0.0, 5.0, 1.0), p, bounds(0.0, 5.0, 1.0));
        assert!(graph.remove(id, false, ActionSet::empty()));
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert!(graph.platform_links(p).is_empty());
        assert!(graph.is_consistent());
        // second removal reports failure
        assert!(!graph.remove(id, false, ActionSet::empty()));
    }

    #[test]
    fn test_cascade_removes_connectors_but_not_segments() {
        let mut graph = NavGraph::new();
        let p1 = PlatformId(1);
        let p2 = PlatformId(2);
        let seg1 = graph.add(walk("p1 walk 0", 0.0, 5.0, 1.0), p1, bounds(0.0, 5.0, 1.0));
        let seg2 = graph.add(walk("p2 walk 0", 7.0, 12.0, 1.0), p2, bounds(7.0, 12.0, 1.0));
        let hop = graph.add(
            jump("p1 jump right", Point::new(5.0, 1.0), Point::new(7.0, 1.0)),
            p1,
            bounds(0.0, 5.0, 1.0),
        );
        let back = graph.add(
            walk("p1 walk -1", -5.0, 0.0, 1.0),
            p1,
            bounds(-5.0, 5.0, 1.0),
        );

        // removing seg1 cascades into the jump connector only
        assert!(graph.remove(seg1, true, !ActionSet::TRAVERSING));
        assert!(graph.link(hop).is_none());
        assert!(graph.link(seg2).is_some());
        assert!(graph.link(back).is_some());
        assert!(graph.is_consistent());
    }

    #[test]
    fn test_contains_link_respects_mask() {
        let mut graph = NavGraph::new();
        let p = PlatformId(1);
        let id = graph.add(walk("floor walk 0", 0.0, 5.0, 1.0), p, bounds(0.0, 5.0, 1.0));
        assert!(graph.contains_link(id, ActionSet::empty()));
        assert!(graph.contains_link(id, ActionSet::WALKING));
        assert!(!graph.contains_link(id, ActionSet::JUMPING));
    }

    #[test]
    fn test_find_object_links_prefers_segment_under_feet() {
        let mut graph = NavGraph::new();
        let p = PlatformId(1);
        let platform_bounds = bounds(0.0, 10.0, 1.0);
        graph.add(walk("floor walk 0", 0.0, 5.0, 1.0), p, platform_bounds);
        graph.add(walk("floor walk 1", 5.0, 10.0, 1.0), p, platform_bounds);

        let agent = Rect::from_corners(Point::new(6.0, 1.0), Point::new(7.0, 3.0));
        let found = graph.find_object_links(p, &agent).unwrap();
        let link = graph.link(found).unwrap();
        assert_eq!(link.line().min_x(), 5.0);
    }

    #[test]
    fn test_find_object_links_single_link_shortcut() {
        let mut graph = NavGraph::new();
        let p = PlatformId(1);
        let id = graph.add(walk("floor walk 0", 0.0, 5.0, 1.0), p, bounds(0.0, 5.0, 1.0));
        // agent is nowhere near the platform; the only link still wins
        let agent = Rect::from_corners(Point::new(50.0, 0.0), Point::new(51.0, 2.0));
        assert_eq!(graph.find_object_links(p, &agent), Some(id));
    }

    #[test]
    fn test_find_object_links_no_overlap() {
        let mut graph = NavGraph::new();
        let p = PlatformId(1);
        let platform_bounds = bounds(0.0, 10.0, 1.0);
        graph.add(walk("floor walk 0", 0.0, 5.0, 1.0), p, platform_bounds);
        graph.add(walk("floor walk 1", 5.0, 10.0, 1.0), p, platform_bounds);
        let agent = Rect::from_corners(Point::new(50.0, 0.0), Point::new(51.0, 2.0));
        assert_eq!(graph.find_object_links(p, &agent), None);
    }

    #[test]
    fn test_find_closest_link() {
        let mut graph = NavGraph::new();
        let p = PlatformId(1);
        graph.add(walk("floor walk 0", 0.0, 5.0, 1.0), p, bounds(0.0, 5.0, 1.0));
        let far = graph.add(walk("roof walk 0", 0.0, 5.0, 20.0), p, bounds(0.0, 5.0, 20.0));
        let near = graph.find_closest_link(&Point::new(2.0, 18.0)).unwrap();
        assert_eq!(near, far);
    }

    #[test]
    fn test_clear() {
        let mut graph = NavGraph::new();
        let p = PlatformId(1);
        graph.add(walk("floor walk 0", 0.0, 5.0, 1.0), p, bounds(0.0, 5.0, 1.0));
        graph.clear();
        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert!(graph.platform_entries().is_empty());
    }
}
