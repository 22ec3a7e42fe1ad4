use crate::graph::{Edge, EdgeId, Graph, NodeId};
use crate::primitives::{Distance, Duration};
use core::fmt;
use fxhash::FxHashMap;
use num_traits::Zero;

/// Whether a search reached its goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathType {
    /// The path ends at the goal.
    Complete,
    /// The goal could not be reached, the path ends at the node that came closest to it.
    ClosestApproach,
}

/// Result of a search: the edges to follow from the start, in order, and their summed
/// distance and duration. The edges are snapshots taken when the path was built, so later
/// velocity changes in the graph do not alter a path that was already returned.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub path_type: PathType,
    pub edges: Vec<Edge>,
    pub distance: Distance,
    pub duration: Duration,
}

impl Path {
    pub fn new(path_type: PathType, edges: Vec<Edge>) -> Path {
        let mut distance = Distance::zero();
        let mut duration = Duration::zero();
        for edge in &edges {
            distance += edge.distance;
            duration += edge.traversal_duration();
        }
        Path {
            path_type,
            edges,
            distance,
            duration,
        }
    }

    /// A complete path without edges, used when start and goal coincide.
    pub fn empty() -> Path {
        Path::new(PathType::Complete, Vec::new())
    }

    pub fn is_complete(&self) -> bool {
        self.path_type == PathType::Complete
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The node the path ends at, [None] for a path without edges.
    pub fn end(&self) -> Option<NodeId> {
        self.edges.last().map(|e| e.end)
    }

    /// Every node on the path, start included. Empty for a path without edges.
    pub fn nodes(&self) -> Vec<NodeId> {
        match self.edges.first() {
            Some(first) => std::iter::once(first.start)
                .chain(self.edges.iter().map(|e| e.end))
                .collect(),
            None => Vec::new(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} path, {} edges, {}, {}",
            self.path_type,
            self.edges.len(),
            self.distance,
            self.duration
        )
    }
}

/// Records, for each node reached during a search, the edge it was last reached through and
/// walks those edges back to rebuild a [Path].
#[derive(Clone, Debug, Default)]
pub struct PathReconstructor {
    came_from: FxHashMap<NodeId, EdgeId>,
}

impl PathReconstructor {
    pub fn new() -> PathReconstructor {
        PathReconstructor::default()
    }

    pub fn set_came_from(&mut self, node: NodeId, via: EdgeId) {
        self.came_from.insert(node, via);
    }

    pub fn came_from(&self, node: NodeId) -> Option<EdgeId> {
        self.came_from.get(&node).copied()
    }

    pub fn clear(&mut self) {
        self.came_from.clear();
    }

    /// Builds the path that ends at `node`, typed [PathType::Complete] only if `node` is
    /// `goal`. The start node is the one without a recorded came-from edge.
    pub fn construct_path_to(&self, graph: &Graph, node: NodeId, goal: NodeId) -> Path {
        let mut edges = Vec::new();
        let mut current = node;
        while let Some(edge) = self.came_from(current).and_then(|e| graph.edge(e)) {
            edges.push(edge);
            current = edge.start;
            // A came-from chain is never longer than the map itself.
            if edges.len() > self.came_from.len() {
                break;
            }
        }
        edges.reverse();
        let path_type = if node == goal {
            PathType::Complete
        } else {
            PathType::ClosestApproach
        };
        Path::new(path_type, edges)
    }
}
