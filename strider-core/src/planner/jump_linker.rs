use itertools::Itertools;

use crate::model::geometry::{Axis, LateralDirection, Line, Rect};
use crate::model::graph::{LinkId, NavGraph, NavLink};
use crate::model::movement::{ActionSet, Flow};
use crate::model::scene::ArcProvider;
use crate::model::spatial::RTree;

use super::arc_anchor::{agent_box_at, edge_point, jump_launch_point, jump_query_area};
use super::segment::{jump_name, SegmentData};

/// generate jump connectors from one segment endpoint in one direction.
///
/// the launch box is placed one agent width past the platform edge and
/// the pre-sampled jump arc is swept from there. candidate platforms come
/// from the spatial index under the arc's bounding area. a candidate
/// segment is a landing when some arc sample passes above it while
/// overlapping it horizontally; segments the launch box is strictly above
/// are skipped, since downward connections are the fall linker's job.
/// each landing emits a one-way `JUMPING` link joining the platform-edge
/// nodes.
pub(crate) fn link_jumps(
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
    let launch = jump_launch_point(&src_line, direction, agent_width);
    let launch_box = agent_box_at(agent_bounds, launch);
    let area = jump_query_area(arcs, &src_line, direction, agent_width);
    let samples = arcs.jump_arc(direction, &launch_box);

    let candidates: Vec<_> = index
        .find(&area)
        .iter()
        .map(|item| item.data.platform)
        .filter(|platform| *platform != owner)
        .unique()
        .collect();

    let mut landings: Vec<NavLink> = Vec::new();
    for platform in candidates {
        for candidate_id in graph.platform_links(platform) {
            let Some(candidate) = graph.link(candidate_id) else {
                continue;
            };
            if !candidate.actions().allows_any(ActionSet::TRAVERSING) {
                continue;
            }
            let candidate_line = *candidate.line();
            if launch_box.above_line(&candidate_line) {
                continue;
            }
            let reachable = samples.iter().any(|sample| {
                sample.above_line(&candidate_line)
                    && sample.overlaps_line_on_axis(&candidate_line, Axis::Horizontal)
            });
            if !reachable {
                continue;
            }
            let (near, far) = (candidate_line.start(), candidate_line.end());
            let landing = if near.distance(&endpoint) <= far.distance(&endpoint) {
                near
            } else {
                far
            };
            if landing.key() == endpoint.key() {
                continue;
            }
            let Ok(line) = Line::new(endpoint, landing) else {
                continue;
            };
            landings.push(NavLink::new(
                jump_name(&src_name, direction),
                line,
                ActionSet::JUMPING,
                Flow::START_TO_END,
            ));
        }
    }

    if landings.is_empty() {
        return;
    }
    let Some(owner_bounds) = graph.platform_bounds(owner) else {
        return;
    };
    for link in landings {
        log::debug!("jump link {}", link);
        graph.add(link, owner, owner_bounds);
    }
}
