use itertools::Itertools;

use crate::model::geometry::{Axis, LateralDirection, Line, Point, Rect};
use crate::model::graph::{LinkId, NavGraph, NavLink};
use crate::model::movement::{ActionSet, Flow};
use crate::model::scene::ArcProvider;
use crate::model::spatial::RTree;

use super::arc_anchor::{agent_box_at, edge_point, fall_drop_point, fall_query_area};
use super::segment::{fall_name, SegmentData};

/// generate at most one fall connector from one segment endpoint in one
/// direction.
///
/// the drop box hangs off the platform's outside edge and the fall arc
/// sweeps down from there. candidate platforms are visited nearest-first
/// by bounding-rect center; the first candidate segment the arc reaches
/// from above wins, and its endpoint on the inside of the drop point
/// (right of it for leftward falls, left of it for rightward falls)
/// becomes the landing. later candidates are ignored even if reachable.
pub(crate) fn link_falls(
    graph: &mut NavGraph,
    index: &RTree<SegmentData>,
    arcs: &dyn ArcProvider,
    agent_bounds: &Rect,
    source: LinkId,
    direction: LateralDirection,
) {
    let Some(src) = graph.link(source) else {
        return;
    };
    let Some(owner) = graph.owner(source) else {
        return;
    };
    let src_line = *src.line();
    let src_name = src.name().to_string();

    let agent_width = agent_bounds.width();
    let endpoint = edge_point(&src_line, direction);
    let drop = fall_drop_point(&src_line, direction, agent_width);
    let drop_box = agent_box_at(agent_bounds, drop);
    let area = fall_query_area(arcs, &src_line, direction, agent_width);
    let samples = arcs.fall_arc(direction, &drop_box);

    let candidates: Vec<_> = index
        .find(&area)
        .iter()
        .map(|item| item.data.platform)
        .filter(|platform| *platform != owner)
        .unique()
        .filter_map(|platform| graph.platform_bounds(platform).map(|b| (platform, b)))
        .sorted_by(|a, b| {
            a.1.center()
                .distance(&drop)
                .total_cmp(&b.1.center().distance(&drop))
        })
        .collect();

    let on_inside = |point: &Point| match direction {
        LateralDirection::Left => point.x() > drop.x(),
        LateralDirection::Right => point.x() < drop.x(),
    };

    for (platform, _bounds) in candidates {
        for candidate_id in graph.platform_links(platform) {
            let Some(candidate) = graph.link(candidate_id) else {
                continue;
            };
            if !candidate.actions().allows_any(ActionSet::TRAVERSING) {
                continue;
            }
            let candidate_line = *candidate.line();
            // fall landings are approached strictly from above
            if !drop_box.above_line(&candidate_line) {
                continue;
            }
            let reachable = samples.iter().any(|sample| {
                sample.above_line(&candidate_line)
                    && sample.overlaps_line_on_axis(&candidate_line, Axis::Horizontal)
            });
            if !reachable {
                continue;
            }
            let (mut near, mut far) = (candidate_line.start(), candidate_line.end());
            if near.distance(&drop) > far.distance(&drop) {
                std::mem::swap(&mut near, &mut far);
            }
            let landing = if on_inside(&near) {
                near
            } else if on_inside(&far) {
                far
            } else {
                continue;
            };
            if landing.key() == endpoint.key() {
                continue;
            }
            let Ok(line) = Line::new(endpoint, landing) else {
                continue;
            };
            let Some(owner_bounds) = graph.platform_bounds(owner) else {
                return;
            };
            let link = NavLink::new(
                fall_name(&src_name, direction),
                line,
                ActionSet::FALLING,
                Flow::START_TO_END,
            );
            log::debug!("fall link {}", link);
            graph.add(link, owner, owner_bounds);
            return;
        }
    }
}
