use crate::model::geometry::{LateralDirection, Rect};

/// number of swept-box samples per arc at the default sampling interval
pub const DEFAULT_ARC_SAMPLES: usize = 25;

/// seconds of simulated flight between consecutive arc samples
pub const DEFAULT_ARC_SAMPLE_INTERVAL: f64 = 0.05;

/// pre-sampled ballistic arcs for the agent, provided by the host physics
/// layer. each arc is a sequence of agent-sized rectangles sweeping the
/// agent's bounding box through a maximal jump or fall in the given
/// direction, starting from `anchor`.
///
/// the `*_bounds` rectangles are the unions of the corresponding sample
/// sequences, expressed relative to the arc origin; callers translate
/// them to a launch or drop point before querying the spatial index.
/// implementations must guarantee the bounds contain every sample.
pub trait ArcProvider: Send + Sync {
    fn jump_arc(&self, direction: LateralDirection, anchor: &Rect) -> Vec<Rect>;

    fn fall_arc(&self, direction: LateralDirection, anchor: &Rect) -> Vec<Rect>;

    fn jump_arc_bounds(&self, direction: LateralDirection) -> Rect;

    fn fall_arc_bounds(&self, direction: LateralDirection) -> Rect;
}
