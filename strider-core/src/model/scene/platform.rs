use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::model::geometry::{Line, Rect};

/// opaque, stable handle to a host scene object. the host guarantees the
/// handle survives moves and modifications of the object it names.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PlatformId(pub u64);

impl Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "platform-{}", self.0)
    }
}

/// immutable snapshot of one scene platform, taken at the start of a
/// maintenance tick. the engine never reaches back into the host scene
/// mid-tick.
#[derive(Clone, Debug)]
pub struct Platform {
    pub id: PlatformId,
    /// stable display name, used to derive link names
    pub name: String,
    /// axis-aligned world-space bounds of the platform collider
    pub bounds: Rect,
}

impl Platform {
    pub fn new(id: PlatformId, name: impl Into<String>, bounds: Rect) -> Platform {
        Platform {
            id,
            name: name.into(),
            bounds,
        }
    }

    /// the walkable top side of the platform, when it is the longer
    /// dimension of the collider. vertical walls have no top face and
    /// contribute nothing to the graph.
    pub fn top_face(&self) -> Option<Line> {
        self.bounds.top_face()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::geometry::Point;

    use super::*;

    #[test]
    fn test_wall_has_no_top_face() {
        let wall = Platform::new(
            PlatformId(1),
            "wall",
            Rect::from_corners(Point::new(0.0, 0.0), Point::new(1.0, 8.0)),
        );
        assert!(wall.top_face().is_none());
    }

    #[test]
    fn test_floor_top_face_spans_bounds() {
        let floor = Platform::new(
            PlatformId(2),
            "floor",
            Rect::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 1.0)),
        );
        let face = floor.top_face().unwrap();
        assert_eq!(face.min_x(), 0.0);
        assert_eq!(face.max_x(), 10.0);
        assert_eq!(face.min_y(), 1.0);
    }
}
