use crate::model::geometry::{LateralDirection, Line, Point, Rect, RectAnchor};
use crate::model::scene::ArcProvider;

/// the endpoint of a segment on the travel side
pub(crate) fn edge_point(line: &Line, direction: LateralDirection) -> Point {
    match direction {
        LateralDirection::Left => line.left_point(),
        LateralDirection::Right => line.right_point(),
    }
}

/// world position the agent occupies when launching a jump off an
/// endpoint: one agent width past the platform edge
pub(crate) fn jump_launch_point(
    line: &Line,
    direction: LateralDirection,
    agent_width: f64,
) -> Point {
    edge_point(line, direction).translate(direction.signum() * agent_width, 0.0)
}

/// world position the agent occupies as it walks off an endpoint into a
/// fall: half an agent width out, leaving the swept box flush with the
/// platform's outside edge
pub(crate) fn fall_drop_point(
    line: &Line,
    direction: LateralDirection,
    agent_width: f64,
) -> Point {
    edge_point(line, direction).translate(direction.signum() * agent_width / 2.0, 0.0)
}

/// the agent's swept box standing at a world position
pub(crate) fn agent_box_at(agent_bounds: &Rect, position: Point) -> Rect {
    agent_bounds.set_location(RectAnchor::BottomCenter, position)
}

/// spatial query area for jump landings launched from an endpoint of
/// `line`. arc bounding rectangles are arc-origin relative; translating
/// one to the launch point yields the world-space swept area.
pub(crate) fn jump_query_area(
    arcs: &dyn ArcProvider,
    line: &Line,
    direction: LateralDirection,
    agent_width: f64,
) -> Rect {
    let launch = jump_launch_point(line, direction, agent_width);
    arcs.jump_arc_bounds(direction).translate(launch.x(), launch.y())
}

/// spatial query area for fall landings dropped from an endpoint of `line`
pub(crate) fn fall_query_area(
    arcs: &dyn ArcProvider,
    line: &Line,
    direction: LateralDirection,
    agent_width: f64,
) -> Rect {
    let drop = fall_drop_point(line, direction, agent_width);
    arcs.fall_arc_bounds(direction).translate(drop.x(), drop.y())
}
