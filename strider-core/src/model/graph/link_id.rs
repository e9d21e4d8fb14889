use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::model::geometry::PointKey;

/// stable identity of a link within one engine run: the hash of its
/// canonical textual form `"{name} : [{start},{end}]"`. adding a link
/// whose identity is already present is a no-op, which is what makes
/// repeated linker passes over unchanged geometry converge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(u64);

impl LinkId {
    pub fn new(name: &str, start: PointKey, end: PointKey) -> LinkId {
        let mut hasher = DefaultHasher::new();
        identity_string(name, start, end).hash(&mut hasher);
        LinkId(hasher.finish())
    }
}

/// the canonical textual form hashed into a [`LinkId`]
pub fn identity_string(name: &str, start: PointKey, end: PointKey) -> String {
    format!("{} : [{},{}]", name, start, end)
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "link-{:016x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::geometry::Point;

    use super::*;

    #[test]
    fn test_identity_is_deterministic() {
        let s = Point::new(0.0, 1.0).key();
        let e = Point::new(5.0, 1.0).key();
        assert_eq!(LinkId::new("floor walk 0", s, e), LinkId::new("floor walk 0", s, e));
        assert_ne!(LinkId::new("floor walk 0", s, e), LinkId::new("floor walk 1", s, e));
        assert_ne!(LinkId::new("floor walk 0", s, e), LinkId::new("floor walk 0", e, s));
    }
}
