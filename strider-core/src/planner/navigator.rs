use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexSet;

use crate::algorithm::search::{run_link_oriented, Trace};
use crate::model::geometry::{LateralDirection, Line, Point, Rect, DEFAULT_MAX_SEGMENTS};
use crate::model::graph::{LinkId, NavGraph, NavLink};
use crate::model::movement::{ActionSet, Flow};
use crate::model::scene::{
    ArcProvider, Body, BodyProvider, Platform, PlatformId, SceneProvider, SteeringSink,
};
use crate::model::spatial::{NodeLimits, RTree};
use crate::util::timed_lock::TimedRwLock;

use super::arc_anchor::{fall_query_area, jump_query_area};
use super::fall_linker::link_falls;
use super::jump_linker::link_jumps;
use super::segment::{segment_name, segment_rect, SegmentData};
use super::{PlannerConfig, PlannerError};

/// snapshot of the lock timeout counters, for diagnostics overlays
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LockDiagnostics {
    pub graph_read_timeouts: u64,
    pub graph_write_timeouts: u64,
    pub index_read_timeouts: u64,
    pub index_write_timeouts: u64,
}

/// the per-tick orchestrator: keeps the traversal graph and spatial
/// index synchronized with the host scene, solves for a route from the
/// agent's platform to the target's platform, and converts the current
/// route into a left/right input every frame.
///
/// hosts call [`Navigator::tick`] from their fixed-step update with the
/// current game time (the configured update interval gates the actual
/// work) and [`Navigator::steer`] every frame.
pub struct Navigator {
    config: PlannerConfig,
    scene: Arc<dyn SceneProvider>,
    bodies: Arc<dyn BodyProvider>,
    arcs: Arc<dyn ArcProvider>,
    steering: Arc<dyn SteeringSink>,
    graph: Arc<TimedRwLock<NavGraph>>,
    index: Arc<TimedRwLock<RTree<SegmentData>>>,
    trace: Trace,
    last_update: Option<f64>,
    rebuild_requested: bool,
}

impl Navigator {
    pub fn new(
        config: PlannerConfig,
        scene: Arc<dyn SceneProvider>,
        bodies: Arc<dyn BodyProvider>,
        arcs: Arc<dyn ArcProvider>,
        steering: Arc<dyn SteeringSink>,
    ) -> Result<Navigator, PlannerError> {
        config.validate()?;
        let read_timeout = Duration::from_millis(config.read_timeout_ms);
        let write_timeout = Duration::from_millis(config.write_timeout_ms);
        let graph = Arc::new(TimedRwLock::with_timeouts(
            NavGraph::new(),
            read_timeout,
            write_timeout,
        ));
        let index = Arc::new(TimedRwLock::with_timeouts(
            RTree::with_limits(NodeLimits::new(config.max_rtree_entries)),
            read_timeout,
            write_timeout,
        ));
        Ok(Navigator {
            config,
            scene,
            bodies,
            arcs,
            steering,
            graph,
            index,
            trace: Trace::new(),
            last_update: None,
            rebuild_requested: false,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// the most recently solved route
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// shared handle to the traversal graph, for overlay readers
    pub fn graph(&self) -> Arc<TimedRwLock<NavGraph>> {
        self.graph.clone()
    }

    /// shared handle to the spatial index, for overlay readers
    pub fn spatial_index(&self) -> Arc<TimedRwLock<RTree<SegmentData>>> {
        self.index.clone()
    }

    pub fn lock_diagnostics(&self) -> LockDiagnostics {
        LockDiagnostics {
            graph_read_timeouts: self.graph.read_timeout_count(),
            graph_write_timeouts: self.graph.write_timeout_count(),
            index_read_timeouts: self.index.read_timeout_count(),
            index_write_timeouts: self.index.write_timeout_count(),
        }
    }

    /// run one maintenance pass when the update interval has elapsed:
    /// synchronize the graph with the scene, then re-solve the route
    pub fn tick(&mut self, game_time: f64) {
        if let Some(last) = self.last_update {
            if game_time - last < self.config.graph_update_interval {
                return;
            }
        }
        self.last_update = Some(game_time);

        let graph_empty = self.graph.read().map(|g| g.is_empty()).unwrap_or(true);
        let rebuild = graph_empty || self.config.full_graph_rebuild || self.rebuild_requested;
        self.rebuild_requested = false;
        if rebuild {
            self.rebuild_all();
        } else {
            self.refresh();
        }
        self.select_trace();
    }

    /// emit the directional input that moves the agent along the current
    /// trace. called every frame; also returns the emitted input.
    pub fn steer(&self) -> Point {
        let input = self.steering_input();
        self.steering.set_directional_input(input);
        input
    }

    /// full reconstruction: drop everything and re-enter every platform
    /// of the current scene
    fn rebuild_all(&mut self) {
        let platforms = self.scene.platforms(&self.config.scene_filter);
        let agent_bounds = self.bodies.bounds(Body::Agent);
        let target_length = agent_bounds.width() * self.config.segment_width_multiplier;

        let Some(mut graph) = self.graph.write() else {
            self.rebuild_requested = true;
            return;
        };
        let Some(mut index) = self.index.write() else {
            self.rebuild_requested = true;
            return;
        };
        graph.clear();
        index.clear();

        let mut walk_links: Vec<LinkId> = Vec::new();
        let mut key: u64 = 0;
        for platform in &platforms {
            let Some(face) = platform.top_face() else {
                continue;
            };
            for (i, segment) in face
                .split(target_length, DEFAULT_MAX_SEGMENTS)
                .into_iter()
                .enumerate()
            {
                let link = NavLink::new(
                    segment_name(&platform.name, i),
                    segment,
                    ActionSet::TRAVERSING,
                    Flow::ALL,
                );
                walk_links.push(graph.add(link, platform.id, platform.bounds));
                index.insert(
                    key,
                    segment_rect(&segment),
                    SegmentData {
                        platform: platform.id,
                        line: segment,
                    },
                );
                key += 1;
            }
        }
        log::debug!(
            "graph rebuild: {} platforms, {} segments",
            platforms.len(),
            walk_links.len()
        );

        for id in walk_links {
            self.link_connectors(&mut graph, &index, &agent_bounds, id);
        }
        debug_assert!(graph.is_consistent());
    }

    /// diff-based maintenance: rebuild the spatial index over the
    /// current scene, remove links of vanished or modified platforms
    /// (cascading into their connectors), insert segments for new or
    /// modified platforms, and regenerate connectors in the affected
    /// neighborhood
    fn refresh(&mut self) {
        let platforms = self.scene.platforms(&self.config.scene_filter);
        let agent_bounds = self.bodies.bounds(Body::Agent);
        let agent_width = agent_bounds.width();
        let target_length = agent_width * self.config.segment_width_multiplier;

        let Some(mut graph) = self.graph.write() else {
            return;
        };
        let Some(mut index) = self.index.write() else {
            return;
        };

        // the spatial index is rebuilt from scratch over the current
        // scene; graph maintenance below reuses the same segmentation
        // TODO incremental index maintenance, keyed off the diff below
        index.clear();
        let mut key: u64 = 0;
        let mut segmentations: HashMap<PlatformId, Vec<Line>> = HashMap::new();
        for platform in &platforms {
            let Some(face) = platform.top_face() else {
                continue;
            };
            let segments = face.split(target_length, DEFAULT_MAX_SEGMENTS);
            for segment in &segments {
                index.insert(
                    key,
                    segment_rect(segment),
                    SegmentData {
                        platform: platform.id,
                        line: *segment,
                    },
                );
                key += 1;
            }
            segmentations.insert(platform.id, segments);
        }

        // diff current platforms against the graph's last observations
        let current: HashMap<PlatformId, &Platform> =
            platforms.iter().map(|p| (p.id, p)).collect();
        let prior = graph.platform_entries();
        let mut stale: Vec<PlatformId> = Vec::new();
        let mut fresh: Vec<&Platform> = Vec::new();
        for (id, observed_bounds) in &prior {
            match current.get(id) {
                None => stale.push(*id),
                Some(platform) if platform.bounds != *observed_bounds => {
                    stale.push(*id);
                    fresh.push(*platform);
                }
                Some(_) => {}
            }
        }
        let prior_ids: HashSet<PlatformId> = prior.iter().map(|(id, _)| *id).collect();
        for platform in &platforms {
            if !prior_ids.contains(&platform.id) {
                fresh.push(platform);
            }
        }
        log::debug!(
            "graph refresh: {} stale, {} fresh of {} platforms",
            stale.len(),
            fresh.len(),
            platforms.len()
        );

        for id in stale {
            for link in graph.platform_links(id) {
                graph.remove(link, true, !ActionSet::TRAVERSING);
            }
        }

        let mut refreshed: IndexSet<LinkId> = IndexSet::new();
        for platform in fresh {
            let Some(segments) = segmentations.get(&platform.id) else {
                continue;
            };
            for (i, segment) in segments.iter().enumerate() {
                let link = NavLink::new(
                    segment_name(&platform.name, i),
                    *segment,
                    ActionSet::TRAVERSING,
                    Flow::ALL,
                );
                refreshed.insert(graph.add(link, platform.id, platform.bounds));
            }
        }

        // widen the refresh set to links of platforms inside the arc
        // areas around each refreshed link's endpoints
        let mut neighborhood = refreshed.clone();
        for id in &refreshed {
            let Some(link) = graph.link(*id) else {
                continue;
            };
            let line = *link.line();
            for direction in LateralDirection::BOTH {
                let areas = [
                    jump_query_area(self.arcs.as_ref(), &line, direction, agent_width),
                    fall_query_area(self.arcs.as_ref(), &line, direction, agent_width),
                ];
                for area in areas {
                    for item in index.find(&area) {
                        for neighbor in graph.platform_links(item.data.platform) {
                            neighborhood.insert(neighbor);
                        }
                    }
                }
            }
        }

        for id in neighborhood {
            self.link_connectors(&mut graph, &index, &agent_bounds, id);
        }
        debug_assert!(graph.is_consistent());
    }

    /// run both linkers in both directions for a walkable all-flow link
    fn link_connectors(
        &self,
        graph: &mut NavGraph,
        index: &RTree<SegmentData>,
        agent_bounds: &Rect,
        id: LinkId,
    ) {
        let eligible = graph
            .link(id)
            .map(|l| l.allows_action(ActionSet::WALKING) && l.flow() == Flow::ALL)
            .unwrap_or(false);
        if !eligible {
            return;
        }
        for direction in LateralDirection::BOTH {
            link_jumps(graph, index, self.arcs.as_ref(), agent_bounds, id, direction);
            link_falls(graph, index, self.arcs.as_ref(), agent_bounds, id, direction);
        }
    }

    /// resolve the platforms under the agent and target to links and
    /// re-solve the route. missing platforms or failed resolution keep
    /// the previous trace; a search error schedules a full rebuild.
    fn select_trace(&mut self) {
        let agent_platform = self.bodies.standing_platform(Body::Agent);
        let target_platform = self.bodies.standing_platform(Body::Target);
        let (Some(agent_platform), Some(target_platform)) = (agent_platform, target_platform)
        else {
            return;
        };
        let Some(graph) = self.graph.read() else {
            return;
        };
        let Some(origin) =
            graph.find_object_links(agent_platform, &self.bodies.bounds(Body::Agent))
        else {
            return;
        };
        let Some(destination) =
            graph.find_object_links(target_platform, &self.bodies.bounds(Body::Target))
        else {
            return;
        };
        match run_link_oriented(origin, destination, &graph) {
            Ok(trace) => self.trace = trace,
            Err(e) => {
                log::warn!("route search failed, scheduling rebuild: {}", e);
                self.rebuild_requested = true;
            }
        }
    }

    /// locate the trace step for the platform under the agent and point
    /// toward whichever end of its link is closer to the next step
    fn steering_input(&self) -> Point {
        let Some(standing) = self.bodies.standing_platform(Body::Agent) else {
            return Point::default();
        };
        if self.trace.is_empty() {
            return Point::default();
        }
        let Some(position) = self.trace.iter().position(|s| s.platform == standing) else {
            return Point::default();
        };
        if position + 1 >= self.trace.len() {
            return Point::default();
        }
        let Some(graph) = self.graph.read() else {
            return Point::default();
        };
        let current = graph.link(self.trace[position].link);
        let next = graph.link(self.trace[position + 1].link);
        let (Some(current), Some(next)) = (current, next) else {
            return Point::default();
        };
        let to_left = next.line().distance_to(&current.line().left_point());
        let to_right = next.line().distance_to(&current.line().right_point());
        if to_left < to_right {
            Point::new(-1.0, 0.0)
        } else {
            Point::new(1.0, 0.0)
        }
    }
}
