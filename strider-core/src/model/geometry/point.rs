use std::fmt::Display;
use std::ops::{Add, Deref, DerefMut, Sub};

use geo::{coord, Coord};
use serde::{Deserialize, Serialize};

/// positional resolution of graph node identity. coordinates are rounded
/// to this grid when deriving a [`PointKey`], so points within rounding
/// distance of each other collapse to the same graph node.
pub const KEY_RESOLUTION: f64 = 0.01;

/// a 2D world-space coordinate. wraps [`geo::Coord`] so the engine can
/// attach key derivation and vector helpers without re-modeling the type.
#[derive(Copy, Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point(pub Coord<f64>);

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point(coord! {x: x, y: y})
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x() - self.x()).hypot(other.y() - self.y())
    }

    /// squared length of this point treated as a vector from the origin
    pub fn magnitude_squared(&self) -> f64 {
        self.x() * self.x() + self.y() * self.y()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x() + dx, self.y() + dy)
    }

    pub fn scale(&self, factor: f64) -> Point {
        Point::new(self.x() * factor, self.y() * factor)
    }

    /// identity of this point on the engine's 0.01-unit grid
    pub fn key(&self) -> PointKey {
        PointKey::of(self)
    }
}

impl Deref for Point {
    type Target = Coord<f64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Point {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x() + rhs.x(), self.y() + rhs.y())
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x() - rhs.x(), self.y() - rhs.y())
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x(), self.y())
    }
}

/// stable identity of a point after rounding to the key grid. two nodes
/// are the same node iff their keys match, which lets slightly different
/// floating-point coordinates share a single graph node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey {
    centi_x: i64,
    centi_y: i64,
}

impl PointKey {
    pub fn of(point: &Point) -> PointKey {
        PointKey {
            centi_x: (point.x() / KEY_RESOLUTION).round() as i64,
            centi_y: (point.y() / KEY_RESOLUTION).round() as i64,
        }
    }

    /// the grid-aligned position this key denotes
    pub fn position(&self) -> Point {
        Point::new(
            self.centi_x as f64 * KEY_RESOLUTION,
            self.centi_y as f64 * KEY_RESOLUTION,
        )
    }

    pub fn x(&self) -> f64 {
        self.centi_x as f64 * KEY_RESOLUTION
    }

    pub fn y(&self) -> f64 {
        self.centi_y as f64 * KEY_RESOLUTION
    }
}

impl Display for PointKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x(), self.y())
    }
}
