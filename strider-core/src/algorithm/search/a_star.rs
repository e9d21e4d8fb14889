use std::collections::{HashMap, HashSet};

use crate::model::graph::{LinkId, NavGraph, NavLink};
use crate::model::movement::Flow;
use crate::model::unit::Cost;
use crate::util::priority_queue::MinHeap;

use super::backtrack::link_oriented_route;
use super::{SearchError, Trace};

/// open-set entry. the derived ordering compares f-score first and
/// insertion sequence second, so equal scores pop in insertion order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    score: Cost,
    sequence: u64,
    link: LinkId,
}

/// run an A* search between two links of the traversal graph. neighbors
/// of a link are the links sharing either of its endpoint nodes; a
/// transition entering a neighbor from a side its flow forbids costs
/// infinity, which keeps one-way connectors one-way without a separate
/// filter pass.
///
/// search state (g-scores, predecessors, the open set) lives beside the
/// graph and is fresh on every invocation.
///
/// # Arguments
///
/// * `origin` - the link under the agent
/// * `destination` - the link under the target
/// * `graph` - the traversal graph, read-locked by the caller
///
/// # Returns
///
/// The route from `origin` to `destination` inclusive, or an empty trace
/// when the destination is unreachable.
pub fn run_link_oriented(
    origin: LinkId,
    destination: LinkId,
    graph: &NavGraph,
) -> Result<Trace, SearchError> {
    let origin_link = graph.require_link(origin)?;
    let destination_link = graph.require_link(destination)?;
    if origin == destination {
        return link_oriented_route(origin, destination, &HashMap::new(), graph);
    }

    let mut g_score: HashMap<LinkId, Cost> = HashMap::new();
    let mut predecessor: HashMap<LinkId, LinkId> = HashMap::new();
    let mut open: MinHeap<FrontierEntry> = MinHeap::new();
    let mut in_open: HashSet<LinkId> = HashSet::new();
    let mut sequence: u64 = 0;

    g_score.insert(origin, Cost::ZERO);
    open.push(FrontierEntry {
        score: heuristic(origin_link, destination_link),
        sequence,
        link: origin,
    });
    in_open.insert(origin);

    let mut iterations: u64 = 0;
    while let Some(entry) = open.pop() {
        let current = entry.link;
        in_open.remove(&current);
        if current == destination {
            log::debug!("search reached destination after {} iterations", iterations);
            return link_oriented_route(origin, destination, &predecessor, graph);
        }

        let current_link = graph.require_link(current)?;
        let current_cost = *g_score.get(&current).unwrap_or(&Cost::INFINITY);
        for neighbor in graph.adjacent_links(current) {
            let neighbor_link = graph.require_link(neighbor)?;
            let tentative = current_cost + transition_cost(neighbor_link, current_link);
            let existing = *g_score.get(&neighbor).unwrap_or(&Cost::INFINITY);
            if tentative < existing {
                predecessor.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                if in_open.insert(neighbor) {
                    sequence += 1;
                    open.push(FrontierEntry {
                        score: tentative + heuristic(neighbor_link, destination_link),
                        sequence,
                        link: neighbor,
                    });
                }
            }
        }
        iterations += 1;
    }

    log::debug!(
        "search frontier exhausted after {} iterations, destination unreachable",
        iterations
    );
    Ok(Trace::new())
}

/// Euclidean distance between link centroids. centroids are fixed for
/// fixed geometry, making the estimate consistent as well as admissible.
fn heuristic(from: &NavLink, to: &NavLink) -> Cost {
    Cost::new(from.centroid().distance(&to.centroid()))
}

/// cost of stepping onto `next` after traversing `previous`: the length
/// of `next` scaled by its velocity weight, plus infinity for each entry
/// side the flow forbids
fn transition_cost(next: &NavLink, previous: &NavLink) -> Cost {
    let mut cost = Cost::new(next.line().length() / next.weight());
    if previous.touches(next.start_key()) && !next.allows_flow(Flow::START_TO_END) {
        cost = cost + Cost::INFINITY;
    }
    if previous.touches(next.end_key()) && !next.allows_flow(Flow::END_TO_START) {
        cost = cost + Cost::INFINITY;
    }
    cost
}
