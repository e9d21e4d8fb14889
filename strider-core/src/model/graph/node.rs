use std::fmt::Display;

use indexmap::IndexSet;

use crate::model::geometry::{Point, PointKey};

use super::LinkId;

/// a graph node: a shared endpoint where links meet. identity is the
/// point key of the location, so every link ending within key resolution
/// of a position attaches to the same node instance.
#[derive(Clone, Debug)]
pub struct NavNode {
    name: String,
    location: Point,
    links: IndexSet<LinkId>,
}

impl NavNode {
    pub fn new(location: Point) -> NavNode {
        NavNode {
            name: format!("node {}", location.key()),
            location,
            links: IndexSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn key(&self) -> PointKey {
        self.location.key()
    }

    /// identities of every link meeting at this node, in attachment order
    pub fn links(&self) -> impl Iterator<Item = &LinkId> {
        self.links.iter()
    }

    pub fn degree(&self) -> usize {
        self.links.len()
    }

    pub fn is_isolated(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, link: &LinkId) -> bool {
        self.links.contains(link)
    }

    pub(super) fn attach(&mut self, link: LinkId) {
        self.links.insert(link);
    }

    pub(super) fn detach(&mut self, link: &LinkId) {
        self.links.shift_remove(link);
    }
}

impl Display for NavNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} links)", self.name, self.links.len())
    }
}
