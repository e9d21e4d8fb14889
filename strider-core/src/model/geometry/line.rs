use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::{Axis, GeometryError, Point};

/// minimum separation between line endpoints. anything closer is treated
/// as a degenerate segment and rejected at construction.
pub const ENDPOINT_EPSILON: f64 = 1e-3;

/// upper bound on the number of sub-segments produced by [`Line::split`]
pub const DEFAULT_MAX_SEGMENTS: usize = 100;

/// a 2D line segment with distinct endpoints. platform top faces and
/// graph link geometry are all `Line`s.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    start: Point,
    end: Point,
}

impl Line {
    /// build a segment, rejecting endpoints closer than [`ENDPOINT_EPSILON`]
    pub fn new(start: Point, end: Point) -> Result<Line, GeometryError> {
        if start.distance(&end) < ENDPOINT_EPSILON {
            return Err(GeometryError::DegenerateLine(start, end));
        }
        Ok(Line { start, end })
    }

    /// internal constructor for segments derived from an already-valid
    /// parent, where the distinctness invariant is upheld by construction
    pub(crate) fn from_valid(start: Point, end: Point) -> Line {
        Line { start, end }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// end minus start, as a vector
    pub fn delta(&self) -> Point {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// unit vector along the segment from start to end
    pub fn direction(&self) -> Point {
        self.delta().scale(1.0 / self.length())
    }

    /// unit vector perpendicular to the segment (left of travel direction)
    pub fn normal(&self) -> Point {
        let d = self.direction();
        Point::new(-d.y(), d.x())
    }

    pub fn min_x(&self) -> f64 {
        self.start.x().min(self.end.x())
    }

    pub fn max_x(&self) -> f64 {
        self.start.x().max(self.end.x())
    }

    pub fn min_y(&self) -> f64 {
        self.start.y().min(self.end.y())
    }

    pub fn max_y(&self) -> f64 {
        self.start.y().max(self.end.y())
    }

    pub fn axis_minimum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.min_x(),
            Axis::Vertical => self.min_y(),
        }
    }

    pub fn axis_maximum(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.max_x(),
            Axis::Vertical => self.max_y(),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        self.delta().y().abs() < ENDPOINT_EPSILON
    }

    pub fn is_vertical(&self) -> bool {
        self.delta().x().abs() < ENDPOINT_EPSILON
    }

    /// rise over run; `None` for vertical segments
    pub fn slope(&self) -> Option<f64> {
        if self.is_vertical() {
            return None;
        }
        let d = self.delta();
        Some(d.y() / d.x())
    }

    /// y-axis intercept of the infinite line; `None` for vertical segments
    pub fn y_intercept(&self) -> Option<f64> {
        self.slope()
            .map(|m| self.start.y() - m * self.start.x())
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x() + self.end.x()) / 2.0,
            (self.start.y() + self.end.y()) / 2.0,
        )
    }

    /// the endpoint with the smaller x coordinate
    pub fn left_point(&self) -> Point {
        if self.start.x() <= self.end.x() {
            self.start
        } else {
            self.end
        }
    }

    /// the endpoint with the larger x coordinate
    pub fn right_point(&self) -> Point {
        if self.start.x() <= self.end.x() {
            self.end
        } else {
            self.start
        }
    }

    /// split into equal colinear sub-segments no longer than
    /// `target_length`. returns `[self]` when already short enough.
    /// the segment count doubles until each sub-segment's squared length
    /// fits under the target, capped at `max_segments`.
    pub fn split(&self, target_length: f64, max_segments: usize) -> Vec<Line> {
        let length = self.length();
        if target_length <= 0.0 || length < target_length {
            return vec![*self];
        }
        let mut count: usize = 1;
        while (length / count as f64).powi(2) > target_length * target_length
            && count < max_segments
        {
            count *= 2;
        }
        let count = count.min(max_segments.max(1));
        let step = self.delta().scale(1.0 / count as f64);
        (0..count)
            .map(|i| {
                Line::from_valid(
                    self.start + step.scale(i as f64),
                    self.start + step.scale((i + 1) as f64),
                )
            })
            .collect()
    }

    /// distance from a point to this segment: the perpendicular distance
    /// to the infinite line, or the nearer endpoint distance when the
    /// perpendicular foot falls outside the segment
    pub fn distance_to(&self, point: &Point) -> f64 {
        let d = self.delta();
        let len2 = d.magnitude_squared();
        let t = ((point.x() - self.start.x()) * d.x() + (point.y() - self.start.y()) * d.y())
            / len2;
        if !(0.0..=1.0).contains(&t) {
            return self.start.distance(point).min(self.end.distance(point));
        }
        let cross =
            d.x() * (point.y() - self.start.y()) - d.y() * (point.x() - self.start.x());
        cross.abs() / self.length()
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} -> {}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(Point::new(x1, y1), Point::new(x2, y2)).unwrap()
    }

    #[test]
    fn test_degenerate_rejected() {
        let result = Line::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0 + 1e-4));
        assert!(result.is_err());
    }

    #[test]
    fn test_derived_fields() {
        let l = line(0.0, 0.0, 4.0, 3.0);
        assert_relative_eq!(l.length(), 5.0);
        assert_relative_eq!(l.slope().unwrap(), 0.75);
        assert_relative_eq!(l.y_intercept().unwrap(), 0.0);
        assert_relative_eq!(l.direction().x(), 0.8);
        assert_relative_eq!(l.normal().y(), 0.8);
        assert!(!l.is_horizontal());
        assert!(!l.is_vertical());
    }

    #[test]
    fn test_vertical_has_no_slope() {
        let l = line(2.0, 0.0, 2.0, 5.0);
        assert!(l.is_vertical());
        assert_eq!(l.slope(), None);
        assert_eq!(l.y_intercept(), None);
    }

    #[test]
    fn test_split_short_line_is_identity() {
        let l = line(0.0, 1.0, 3.0, 1.0);
        let parts = l.split(5.0, DEFAULT_MAX_SEGMENTS);
        assert_eq!(parts, vec![l]);
    }

    /// splitting preserves total length and respects the target bound
    #[test]
    fn test_split_law() {
        let l = line(0.0, 1.0, 23.0, 1.0);
        let target = 5.0;
        let parts = l.split(target, DEFAULT_MAX_SEGMENTS);
        assert!(parts.len() >= 2);
        let total: f64 = parts.iter().map(|p| p.length()).sum();
        assert_relative_eq!(total, l.length(), epsilon = 1e-9);
        for p in &parts {
            assert!(p.length() <= target + 1e-9);
        }
        // colinear and contiguous
        for pair in parts.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[test]
    fn test_split_count_doubles() {
        let l = line(0.0, 0.0, 10.0, 0.0);
        let parts = l.split(5.0, DEFAULT_MAX_SEGMENTS);
        assert_eq!(parts.len(), 2);
        let parts = l.split(4.0, DEFAULT_MAX_SEGMENTS);
        assert_eq!(parts.len(), 4);
    }

    #[test]
    fn test_split_respects_cap() {
        let l = line(0.0, 0.0, 1000.0, 0.0);
        let parts = l.split(0.5, 100);
        assert!(parts.len() <= 100);
    }

    #[test]
    fn test_distance_perpendicular() {
        let l = line(0.0, 0.0, 10.0, 0.0);
        assert_relative_eq!(l.distance_to(&Point::new(5.0, 3.0)), 3.0);
    }

    #[test]
    fn test_distance_clamps_to_endpoints() {
        let l = line(0.0, 0.0, 10.0, 0.0);
        assert_relative_eq!(l.distance_to(&Point::new(-3.0, 4.0)), 5.0);
        assert_relative_eq!(l.distance_to(&Point::new(13.0, 4.0)), 5.0);
    }

    #[test]
    fn test_left_right_points() {
        let l = line(7.0, 1.0, 2.0, 1.0);
        assert_eq!(l.left_point(), Point::new(2.0, 1.0));
        assert_eq!(l.right_point(), Point::new(7.0, 1.0));
    }
}
