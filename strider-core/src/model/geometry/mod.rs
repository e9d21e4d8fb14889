mod axis;
mod geometry_error;
mod line;
mod point;
mod rect;

pub use axis::{Axis, LateralDirection, RectAnchor};
pub use geometry_error::GeometryError;
pub use line::{Line, DEFAULT_MAX_SEGMENTS, ENDPOINT_EPSILON};
pub use point::{Point, PointKey, KEY_RESOLUTION};
pub use rect::Rect;
