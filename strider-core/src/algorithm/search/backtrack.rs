use std::collections::{HashMap, HashSet};

use crate::model::graph::{LinkId, NavGraph};

use super::{SearchError, Trace, TraceStep};

/// reconstruct a route from the predecessor table produced by a search,
/// walking destination-to-origin and reversing. each link is paired with
/// its owning platform. a link visited twice means the predecessor table
/// is corrupt, which is reported rather than looped on.
pub fn link_oriented_route(
    origin: LinkId,
    destination: LinkId,
    predecessor: &HashMap<LinkId, LinkId>,
    graph: &NavGraph,
) -> Result<Trace, SearchError> {
    let mut route: Vec<TraceStep> = Vec::new();
    let mut visited: HashSet<LinkId> = HashSet::new();
    let mut current = destination;
    loop {
        if !visited.insert(current) {
            return Err(SearchError::LoopInSearchResult(current));
        }
        let platform = graph.require_owner(current)?;
        route.push(TraceStep {
            link: current,
            platform,
        });
        if current == origin {
            break;
        }
        current = *predecessor.get(&current).ok_or_else(|| {
            SearchError::InternalError(format!(
                "link {} missing from predecessor table during backtrack",
                current
            ))
        })?;
    }
    route.reverse();
    Ok(route)
}
