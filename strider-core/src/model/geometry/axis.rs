use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// world axis selector used by overlap and anchoring tests.
/// the world is y-up: `Vertical` minimums are rectangle bottoms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// a named corner or edge-center of a rectangle, used when re-anchoring
/// a rectangle at a world position via [`super::Rect::set_location`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    LeftCenter,
    Center,
    RightCenter,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// lateral travel direction for connector generation. jump and fall links
/// are generated once per direction from every traversable segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateralDirection {
    Left,
    Right,
}

impl LateralDirection {
    /// unit sign of this direction on the horizontal axis
    pub fn signum(&self) -> f64 {
        match self {
            LateralDirection::Left => -1.0,
            LateralDirection::Right => 1.0,
        }
    }

    /// both directions, in the order linkers visit them
    pub const BOTH: [LateralDirection; 2] = [LateralDirection::Left, LateralDirection::Right];
}

impl Display for LateralDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LateralDirection::Left => write!(f, "left"),
            LateralDirection::Right => write!(f, "right"),
        }
    }
}
