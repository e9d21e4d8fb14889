use crate::model::geometry::Point;

/// the engine's only output: a directional input vector handed to the
/// host character controller every frame. x is -1, 0 or 1; y is reserved
/// for future climb/drop inputs and currently always 0.
pub trait SteeringSink: Send + Sync {
    fn set_directional_input(&self, input: Point);
}
