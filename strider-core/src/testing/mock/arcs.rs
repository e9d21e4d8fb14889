use crate::model::geometry::{LateralDirection, Point, Rect};
use crate::model::scene::{ArcProvider, DEFAULT_ARC_SAMPLES};

/// an [`ArcProvider`] sweeping an agent-sized box along closed-form
/// curves: a symmetric parabola for jumps, an accelerating drop for
/// falls. hosts sample their real ballistics; tests only need arcs whose
/// reach is known exactly.
pub struct ParabolicArcProvider {
    agent_width: f64,
    agent_height: f64,
    jump_width: f64,
    jump_height: f64,
    fall_width: f64,
    fall_depth: f64,
    samples: usize,
}

impl ParabolicArcProvider {
    pub fn new(agent_width: f64, agent_height: f64) -> ParabolicArcProvider {
        ParabolicArcProvider {
            agent_width,
            agent_height,
            jump_width: 4.0,
            jump_height: 3.0,
            fall_width: 3.0,
            fall_depth: 30.0,
            samples: DEFAULT_ARC_SAMPLES,
        }
    }

    /// horizontal reach and apex height of the jump arc
    pub fn with_jump(mut self, width: f64, height: f64) -> ParabolicArcProvider {
        self.jump_width = width;
        self.jump_height = height;
        self
    }

    /// horizontal drift and maximum depth of the fall arc
    pub fn with_fall(mut self, width: f64, depth: f64) -> ParabolicArcProvider {
        self.fall_width = width;
        self.fall_depth = depth;
        self
    }

    /// the agent box at the arc origin, the reference frame for the
    /// bounding rectangles
    fn origin_box(&self) -> Rect {
        Rect::from_center(
            Point::new(0.0, self.agent_height / 2.0),
            self.agent_width,
            self.agent_height,
        )
    }

    fn sweep(&self, anchor: &Rect, offsets: impl Iterator<Item = (f64, f64)>) -> Vec<Rect> {
        offsets.map(|(dx, dy)| anchor.translate(dx, dy)).collect()
    }

    fn jump_offsets(&self, direction: LateralDirection) -> impl Iterator<Item = (f64, f64)> + '_ {
        let n = self.samples.max(2);
        (0..n).map(move |i| {
            let t = i as f64 / (n - 1) as f64;
            let dx = direction.signum() * self.jump_width * t;
            let peak_offset = 2.0 * t - 1.0;
            let dy = self.jump_height * (1.0 - peak_offset * peak_offset);
            (dx, dy)
        })
    }

    fn fall_offsets(&self, direction: LateralDirection) -> impl Iterator<Item = (f64, f64)> + '_ {
        let n = self.samples.max(2);
        (0..n).map(move |i| {
            let t = i as f64 / (n - 1) as f64;
            let dx = direction.signum() * self.fall_width * t;
            let dy = -self.fall_depth * t * t;
            (dx, dy)
        })
    }

    fn union(rects: &[Rect]) -> Rect {
        rects
            .iter()
            .copied()
            .reduce(|a, b| a.merge(&b))
            .unwrap_or_default()
    }
}

impl ArcProvider for ParabolicArcProvider {
    fn jump_arc(&self, direction: LateralDirection, anchor: &Rect) -> Vec<Rect> {
        self.sweep(anchor, self.jump_offsets(direction))
    }

    fn fall_arc(&self, direction: LateralDirection, anchor: &Rect) -> Vec<Rect> {
        self.sweep(anchor, self.fall_offsets(direction))
    }

    fn jump_arc_bounds(&self, direction: LateralDirection) -> Rect {
        Self::union(&self.jump_arc(direction, &self.origin_box()))
    }

    fn fall_arc_bounds(&self, direction: LateralDirection) -> Rect {
        Self::union(&self.fall_arc(direction, &self.origin_box()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// the bounding rectangles must contain every sample
    #[test]
    fn test_bounds_contain_samples() {
        let arcs = ParabolicArcProvider::new(1.0, 2.0).with_jump(4.0, 3.0).with_fall(3.0, 20.0);
        for direction in LateralDirection::BOTH {
            let anchor = arcs.origin_box();
            let jump_bounds = arcs.jump_arc_bounds(direction);
            for sample in arcs.jump_arc(direction, &anchor) {
                assert_eq!(jump_bounds.merge(&sample), jump_bounds);
            }
            let fall_bounds = arcs.fall_arc_bounds(direction);
            for sample in arcs.fall_arc(direction, &anchor) {
                assert_eq!(fall_bounds.merge(&sample), fall_bounds);
            }
        }
    }

    #[test]
    fn test_jump_arc_rises_then_returns() {
        let arcs = ParabolicArcProvider::new(1.0, 2.0).with_jump(4.0, 3.0);
        let anchor = arcs.origin_box();
        let samples = arcs.jump_arc(LateralDirection::Right, &anchor);
        assert_eq!(samples.len(), DEFAULT_ARC_SAMPLES);
        let first = samples.first().unwrap();
        let last = samples.last().unwrap();
        // arc starts and ends at launch height, shifted one reach right
        assert_eq!(first.bottom(), anchor.bottom());
        assert!((last.bottom() - anchor.bottom()).abs() < 1e-9);
        assert!((last.left() - (anchor.left() + 4.0)).abs() < 1e-9);
        // and peaks in between
        let apex = samples
            .iter()
            .map(|s| s.bottom())
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((apex - (anchor.bottom() + 3.0)).abs() < 0.05);
    }

    #[test]
    fn test_fall_arc_descends() {
        let arcs = ParabolicArcProvider::new(1.0, 2.0).with_fall(3.0, 20.0);
        let anchor = arcs.origin_box();
        let samples = arcs.fall_arc(LateralDirection::Left, &anchor);
        let last = samples.last().unwrap();
        assert!((last.bottom() - (anchor.bottom() - 20.0)).abs() < 1e-9);
        assert!(last.left() < anchor.left());
    }
}
