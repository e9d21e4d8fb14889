use crate::model::geometry::{LateralDirection, Line, Rect};
use crate::model::scene::PlatformId;

/// padding applied to indexed segment rectangles on both axes, so that
/// queries tolerate exact edge coincidence between neighboring geometry
pub const SEGMENT_RECT_INFLATION: f64 = 0.01;

/// spatial index payload: one platform top-face sub-segment
#[derive(Clone, Debug)]
pub struct SegmentData {
    pub platform: PlatformId,
    pub line: Line,
}

/// the rectangle a top-face sub-segment is indexed under
pub(crate) fn segment_rect(line: &Line) -> Rect {
    Rect::from_line(line).inflate(SEGMENT_RECT_INFLATION, SEGMENT_RECT_INFLATION)
}

pub(crate) fn segment_name(platform_name: &str, index: usize) -> String {
    format!("{} walk {}", platform_name, index)
}

pub(crate) fn jump_name(source_link_name: &str, direction: LateralDirection) -> String {
    format!("{} jump {}", source_link_name, direction)
}

pub(crate) fn fall_name(source_link_name: &str, direction: LateralDirection) -> String {
    format!("{} fall {}", source_link_name, direction)
}
