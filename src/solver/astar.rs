use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, warn};
use num_traits::Zero;
use std::cmp::Ordering;

use super::{NoopObserver, SearchObserver};
use crate::error::{PathfindingError, Result};
use crate::graph::{EdgeId, Graph, NodeId};
use crate::grid::Grid;
use crate::min_heap::MinHeap;
use crate::path::{Path, PathReconstructor};
use crate::primitives::{Distance, Duration, GridPosition, Position, Velocity};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Open set entry holding the best known way of reaching `node`.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    node: NodeId,
    duration_so_far: Duration,
    expected_remaining_time: Duration,
    expected_total_time: Duration,
}

impl FrontierEntry {
    fn new(node: NodeId, duration_so_far: Duration, expected_remaining_time: Duration) -> Self {
        FrontierEntry {
            node,
            duration_so_far,
            expected_remaining_time,
            expected_total_time: duration_so_far + expected_remaining_time,
        }
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.expected_total_time.total_cmp(&other.expected_total_time)
    }
}

/// A* search for the fastest path through a [Graph]. Edge costs are traversal durations and
/// the heuristic is the straight-line distance to the goal covered at the maximum velocity
/// the caller supplies, which keeps it admissible as long as no edge is faster than that.
///
/// When the goal cannot be reached, or the iteration limit runs out, the path to the node
/// with the smallest expected remaining time is returned as a
/// [ClosestApproach](crate::PathType::ClosestApproach).
///
/// The finder keeps its working sets between calls to reuse their allocations; every call
/// starts from a clean state.
#[derive(Default)]
pub struct PathFinder {
    interesting: MinHeap<FrontierEntry>,
    nodes: FxIndexMap<NodeId, FrontierEntry>,
    reconstructor: PathReconstructor,
    /// Maximum number of nodes to expand, unbounded when [None].
    pub iteration_limit: Option<usize>,
}

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder::default()
    }

    pub fn with_iteration_limit(iteration_limit: usize) -> PathFinder {
        PathFinder {
            iteration_limit: Some(iteration_limit),
            ..PathFinder::default()
        }
    }

    /// Time needed to cover the straight line from `a` to `b` at `maximum_velocity`.
    pub fn expected_duration(a: Position, b: Position, maximum_velocity: Velocity) -> Duration {
        Distance::between(a, b) / maximum_velocity
    }

    pub fn find_path(
        &mut self,
        graph: &Graph,
        start: NodeId,
        goal: NodeId,
        maximum_velocity: Velocity,
    ) -> Result<Path> {
        self.find_path_observed(graph, start, goal, maximum_velocity, &mut NoopObserver)
    }

    /// Searches between two cells of `grid`, using the fastest edge of the grid as the
    /// heuristic's velocity.
    pub fn find_path_in_grid(
        &mut self,
        grid: &Grid,
        start: GridPosition,
        goal: GridPosition,
    ) -> Result<Path> {
        let start = grid.get_node(start)?;
        let goal = grid.get_node(goal)?;
        let maximum_velocity = grid
            .graph()
            .maximum_velocity()
            .unwrap_or_else(|| grid.default_velocity());
        self.find_path(grid.graph(), start, goal, maximum_velocity)
    }

    /// Same as [find_path](Self::find_path), reporting every visited, opened and closed node
    /// to `observer`.
    pub fn find_path_observed<O>(
        &mut self,
        graph: &Graph,
        start: NodeId,
        goal: NodeId,
        maximum_velocity: Velocity,
        observer: &mut O,
    ) -> Result<Path>
    where
        O: SearchObserver<NodeId> + ?Sized,
    {
        if !maximum_velocity.is_valid() {
            return Err(PathfindingError::invalid(
                "maximum_velocity",
                maximum_velocity,
                "> 0.0 m/s",
            ));
        }
        let start_position = graph.position(start)?;
        let goal_position = graph.position(goal)?;
        self.reset();
        if start == goal {
            return Ok(Path::empty());
        }

        let head = FrontierEntry::new(
            start,
            Duration::zero(),
            Self::expected_duration(start_position, goal_position, maximum_velocity),
        );
        self.interesting.insert(head);
        self.nodes.insert(start, head);
        observer.on_node_opened(start);

        let mut closest = head;
        let mut iterations = 0;
        debug!("Searching from {:?} to {:?}", start, goal);
        while !self.interesting.is_empty() {
            if self.iteration_limit.is_some_and(|limit| iterations >= limit) {
                warn!(
                    "Search from {:?} to {:?} stopped after {} iterations",
                    start, goal, iterations
                );
                break;
            }
            let Some(current) = self.interesting.extract_min() else {
                break;
            };
            iterations += 1;
            observer.on_node_visited(current.node);

            if current.node == goal {
                debug!("Reached {:?} after {} iterations", goal, iterations);
                return Ok(self.reconstructor.construct_path_to(graph, goal, goal));
            }
            if current.expected_remaining_time < closest.expected_remaining_time {
                closest = current;
            }

            for edge in graph.outgoing(current.node) {
                let opposite = edge.end;
                let duration_so_far = current.duration_so_far + edge.traversal_duration();
                let entry = match self.nodes.entry(opposite) {
                    Occupied(mut e) => {
                        if e.get().duration_so_far > duration_so_far {
                            self.interesting.remove_where(|x| x.node == opposite);
                            let entry = FrontierEntry::new(
                                opposite,
                                duration_so_far,
                                e.get().expected_remaining_time,
                            );
                            e.insert(entry);
                            entry
                        } else {
                            continue;
                        }
                    }
                    Vacant(e) => {
                        let position = graph.position(opposite)?;
                        let entry = FrontierEntry::new(
                            opposite,
                            duration_so_far,
                            Self::expected_duration(position, goal_position, maximum_velocity),
                        );
                        e.insert(entry);
                        entry
                    }
                };
                self.reconstructor.set_came_from(opposite, edge.id);
                self.interesting.insert(entry);
                observer.on_node_opened(opposite);
            }
            observer.on_node_closed(current.node);
        }

        if self.interesting.is_empty() {
            warn!(
                "{:?} is not reachable from {:?}, returning closest approach {:?}",
                goal, start, closest.node
            );
        }
        Ok(self
            .reconstructor
            .construct_path_to(graph, closest.node, goal))
    }

    /// The edge through which `node` was last reached in the most recent search.
    pub fn came_from(&self, node: NodeId) -> Option<EdgeId> {
        self.reconstructor.came_from(node)
    }

    fn reset(&mut self) {
        self.interesting.clear();
        self.nodes.clear();
        self.reconstructor.clear();
    }
}
