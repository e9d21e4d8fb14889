use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{Axis, Line, Point, RectAnchor};

/// an axis-aligned rectangle in a y-up world, addressed by its top-left
/// corner. stored normalized: width and height are never negative, so
/// `top > bottom` and `right > left` for any non-empty rectangle.
#[derive(Copy, Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// build from a top-left corner and extents, normalizing negative
    /// extents by shifting the origin
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 { (y - height, -height) } else { (y, height) };
        Rect { x, y, width, height }
    }

    /// bounding rectangle of two corner points, in any order
    pub fn from_corners(a: Point, b: Point) -> Rect {
        let left = a.x().min(b.x());
        let top = a.y().max(b.y());
        Rect {
            x: left,
            y: top,
            width: (a.x() - b.x()).abs(),
            height: (a.y() - b.y()).abs(),
        }
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Rect {
        Rect::new(center.x() - width / 2.0, center.y() + height / 2.0, width, height)
    }

    /// degenerate bounding rectangle of a line segment
    pub fn from_line(line: &Line) -> Rect {
        Rect::from_corners(line.start(), line.end())
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y - self.height
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y - self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    pub fn bottom_center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.bottom())
    }

    /// smallest coordinate on the given axis: left, or bottom (y-up)
    pub fn axis_minimum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left(),
            Axis::Vertical => self.bottom(),
        }
    }

    /// largest coordinate on the given axis: right, or top (y-up)
    pub fn axis_maximum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.right(),
            Axis::Vertical => self.top(),
        }
    }

    /// point containment, inclusive of the boundary
    pub fn contains(&self, point: &Point) -> bool {
        self.left() <= point.x()
            && point.x() <= self.right()
            && self.bottom() <= point.y()
            && point.y() <= self.top()
    }

    /// overlap test with strict inequalities on opposite edges, so
    /// rectangles that merely share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.bottom() < other.top()
            && other.bottom() < self.top()
    }

    /// union bounding rectangle
    pub fn merge(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let right = self.right().max(other.right());
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        Rect {
            x: left,
            y: top,
            width: right - left,
            height: top - bottom,
        }
    }

    /// area growth incurred by absorbing `other` into this rectangle
    pub fn merge_enlargement(&self, other: &Rect) -> f64 {
        (self.merge(other).area() - self.area()).abs()
    }

    /// grow both axes symmetrically: `w` on the left and right,
    /// `h` on the top and bottom
    pub fn inflate(&self, w: f64, h: f64) -> Rect {
        Rect::new(self.x - w, self.y + h, self.width + 2.0 * w, self.height + 2.0 * h)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// reposition so the named corner or edge-center sits at `point`,
    /// preserving extents
    pub fn set_location(&self, anchor: RectAnchor, point: Point) -> Rect {
        let (ax, ay) = match anchor {
            RectAnchor::TopLeft => (self.left(), self.top()),
            RectAnchor::TopCenter => (self.center().x(), self.top()),
            RectAnchor::TopRight => (self.right(), self.top()),
            RectAnchor::LeftCenter => (self.left(), self.center().y()),
            RectAnchor::Center => (self.center().x(), self.center().y()),
            RectAnchor::RightCenter => (self.right(), self.center().y()),
            RectAnchor::BottomLeft => (self.left(), self.bottom()),
            RectAnchor::BottomCenter => (self.center().x(), self.bottom()),
            RectAnchor::BottomRight => (self.right(), self.bottom()),
        };
        self.translate(point.x() - ax, point.y() - ay)
    }

    /// strictly above the line's highest point
    pub fn above_line(&self, line: &Line) -> bool {
        self.bottom() > line.max_y()
    }

    /// strictly below the line's lowest point
    pub fn below_line(&self, line: &Line) -> bool {
        self.top() < line.min_y()
    }

    pub fn left_of_line(&self, line: &Line) -> bool {
        self.right() < line.min_x()
    }

    pub fn right_of_line(&self, line: &Line) -> bool {
        self.left() > line.max_x()
    }

    pub fn above(&self, other: &Rect) -> bool {
        self.bottom() > other.top()
    }

    pub fn below(&self, other: &Rect) -> bool {
        self.top() < other.bottom()
    }

    pub fn left_of(&self, other: &Rect) -> bool {
        self.right() < other.left()
    }

    pub fn right_of(&self, other: &Rect) -> bool {
        self.left() > other.right()
    }

    /// shared extent with another rectangle on one axis, short-circuiting
    /// through the directional tests. touching extents count as overlap.
    pub fn overlaps_on_axis(&self, other: &Rect, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => !self.left_of(other) && !self.right_of(other),
            Axis::Vertical => !self.above(other) && !self.below(other),
        }
    }

    /// shared extent with a line segment on one axis
    pub fn overlaps_line_on_axis(&self, line: &Line, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => !self.left_of_line(line) && !self.right_of_line(line),
            Axis::Vertical => !self.above_line(line) && !self.below_line(line),
        }
    }

    /// the top side of the rectangle when it is the longer dimension.
    /// taller-than-wide boxes are vertical walls and have no top face.
    pub fn top_face(&self) -> Option<Line> {
        if self.height > self.width {
            return None;
        }
        Line::new(
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
        )
        .ok()
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect[({:.2}, {:.2}) {:.2}x{:.2}]",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// rect spanning the corner points, given as (left, bottom)-(right, top)
    fn rect(left: f64, bottom: f64, right: f64, top: f64) -> Rect {
        Rect::from_corners(Point::new(left, bottom), Point::new(right, top))
    }

    #[test]
    fn test_normalization() {
        let r = Rect::new(5.0, 0.0, -4.0, -3.0);
        assert_eq!(r.left(), 1.0);
        assert_eq!(r.top(), 3.0);
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 3.0);
        assert!(r.top() > r.bottom());
        assert!(r.right() > r.left());
    }

    #[test]
    fn test_contains_inclusive() {
        let r = rect(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(&Point::new(0.0, 0.0)));
        assert!(r.contains(&Point::new(10.0, 5.0)));
        assert!(r.contains(&Point::new(5.0, 2.5)));
        assert!(!r.contains(&Point::new(10.1, 2.5)));
    }

    #[test]
    fn test_intersects_strict_on_edges() {
        let a = rect(0.0, 0.0, 10.0, 5.0);
        let b = rect(10.0, 0.0, 20.0, 5.0);
        assert!(!a.intersects(&b), "edge-sharing rects do not intersect");
        let c = rect(9.9, 0.0, 20.0, 5.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_merge_and_enlargement() {
        let a = rect(0.0, 0.0, 2.0, 2.0);
        let b = rect(4.0, 0.0, 6.0, 2.0);
        let m = a.merge(&b);
        assert_eq!(m.left(), 0.0);
        assert_eq!(m.right(), 6.0);
        assert_relative_eq!(a.merge_enlargement(&b), 12.0 - 4.0);
        assert_relative_eq!(a.merge_enlargement(&a), 0.0);
    }

    #[test]
    fn test_inflate() {
        let r = rect(0.0, 0.0, 10.0, 5.0).inflate(1.0, 2.0);
        assert_eq!(r.left(), -1.0);
        assert_eq!(r.right(), 11.0);
        assert_eq!(r.top(), 7.0);
        assert_eq!(r.bottom(), -2.0);
    }

    #[test]
    fn test_set_location() {
        let r = rect(0.0, 0.0, 4.0, 2.0);
        let moved = r.set_location(RectAnchor::BottomLeft, Point::new(10.0, 1.0));
        assert_eq!(moved.left(), 10.0);
        assert_eq!(moved.bottom(), 1.0);
        assert_eq!(moved.width(), 4.0);

        let moved = r.set_location(RectAnchor::BottomCenter, Point::new(0.0, 0.0));
        assert_eq!(moved.center().x(), 0.0);
        assert_eq!(moved.bottom(), 0.0);

        let moved = r.set_location(RectAnchor::TopRight, Point::new(3.0, 9.0));
        assert_eq!(moved.right(), 3.0);
        assert_eq!(moved.top(), 9.0);
    }

    #[test]
    fn test_axis_extrema() {
        let r = rect(1.0, 2.0, 5.0, 8.0);
        assert_eq!(r.axis_minimum(Axis::Horizontal), 1.0);
        assert_eq!(r.axis_maximum(Axis::Horizontal), 5.0);
        assert_eq!(r.axis_minimum(Axis::Vertical), 2.0);
        assert_eq!(r.axis_maximum(Axis::Vertical), 8.0);
    }

    #[test]
    fn test_directional_line_tests() {
        let line = Line::new(Point::new(0.0, 1.0), Point::new(10.0, 1.0)).unwrap();
        let above = rect(2.0, 3.0, 4.0, 5.0);
        assert!(above.above_line(&line));
        // a rect resting on the line is not strictly above it
        let resting = rect(2.0, 1.0, 4.0, 3.0);
        assert!(!resting.above_line(&line));
        let right = rect(11.0, 0.0, 12.0, 2.0);
        assert!(right.right_of_line(&line));
        assert!(!right.overlaps_line_on_axis(&line, Axis::Horizontal));
        // touching extents still count as horizontal overlap
        let touching = rect(10.0, 2.0, 12.0, 3.0);
        assert!(touching.overlaps_line_on_axis(&line, Axis::Horizontal));
    }

    #[test]
    fn test_top_face() {
        let floor = rect(0.0, 0.0, 10.0, 1.0);
        let face = floor.top_face().unwrap();
        assert_eq!(face.start(), Point::new(0.0, 1.0));
        assert_eq!(face.end(), Point::new(10.0, 1.0));

        let wall = rect(0.0, 0.0, 1.0, 10.0);
        assert!(wall.top_face().is_none());
    }
}
