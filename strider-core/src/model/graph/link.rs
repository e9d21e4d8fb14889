use std::fmt::Display;

use crate::model::geometry::{Line, Point, PointKey};
use crate::model::movement::{ActionSet, Flow};

use super::link_id::{identity_string, LinkId};

/// a graph edge: one locomotion segment with movement semantics.
/// platform sub-segments carry `TRAVERSING`/`ALL`; jump and fall
/// connectors carry `JUMPING` or `FALLING` with one-way flow.
#[derive(Clone, Debug)]
pub struct NavLink {
    name: String,
    line: Line,
    actions: ActionSet,
    flow: Flow,
    weight: f64,
    start: PointKey,
    end: PointKey,
}

impl NavLink {
    pub fn new(name: impl Into<String>, line: Line, actions: ActionSet, flow: Flow) -> NavLink {
        NavLink {
            name: name.into(),
            line,
            actions,
            flow,
            weight: 1.0,
            start: line.start().key(),
            end: line.end().key(),
        }
    }

    /// override the default velocity weight of 1.0
    pub fn with_weight(mut self, weight: f64) -> NavLink {
        self.weight = weight;
        self
    }

    pub fn id(&self) -> LinkId {
        LinkId::new(&self.name, self.start, self.end)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn actions(&self) -> ActionSet {
        self.actions
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn start_key(&self) -> PointKey {
        self.start
    }

    pub fn end_key(&self) -> PointKey {
        self.end
    }

    /// endpoint key with the smaller x coordinate
    pub fn left_key(&self) -> PointKey {
        self.line.left_point().key()
    }

    /// endpoint key with the larger x coordinate
    pub fn right_key(&self) -> PointKey {
        self.line.right_point().key()
    }

    /// centroid of the link geometry, the anchor for the A* heuristic
    pub fn centroid(&self) -> Point {
        self.line.midpoint()
    }

    pub fn allows_action(&self, mask: ActionSet) -> bool {
        self.actions.allows_all(mask)
    }

    pub fn allows_flow(&self, entry: Flow) -> bool {
        self.flow.allows(entry)
    }

    pub fn touches(&self, key: PointKey) -> bool {
        self.start == key || self.end == key
    }

    /// the opposite endpoint, or `None` when `key` is not an endpoint
    pub fn other_end(&self, key: PointKey) -> Option<PointKey> {
        if key == self.start {
            Some(self.end)
        } else if key == self.end {
            Some(self.start)
        } else {
            None
        }
    }

    /// true when the two links share at least one endpoint node
    pub fn adjacent_to(&self, other: &NavLink) -> bool {
        self.touches(other.start) || self.touches(other.end)
    }
}

impl Display for NavLink {
    /// the canonical identity form; hashing this yields [`NavLink::id`]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", identity_string(&self.name, self.start, self.end))
    }
}
