//! Directed, weighted graph of [Node]s connected by [Edge]s. Nodes and edges live in a single
//! [StableDiGraph] arena and are referred to by index handles, so removing edges never
//! invalidates other handles. Every edge is recorded in the outgoing list of its start node
//! and the incoming list of its end node by the arena itself.
use crate::error::{PathfindingError, Result};
use crate::primitives::{Distance, Duration, Position, Velocity};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

pub type NodeId = NodeIndex<u32>;
pub type EdgeId = EdgeIndex<u32>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub position: Position,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EdgeData {
    distance: Distance,
    velocity: Velocity,
}

/// Snapshot of a directed edge. The distance is fixed when the edge is created, the duration
/// is derived from it and the current traversal velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub start: NodeId,
    pub end: NodeId,
    pub distance: Distance,
    pub traversal_velocity: Velocity,
}

impl Edge {
    pub fn traversal_duration(&self) -> Duration {
        self.distance / self.traversal_velocity
    }
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    inner: StableDiGraph<Node, EdgeData>,
}

fn check_velocity(velocity: Velocity) -> Result<()> {
    if velocity.is_valid() {
        Ok(())
    } else {
        Err(PathfindingError::invalid(
            "traversal_velocity",
            velocity,
            "> 0.0 m/s",
        ))
    }
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Graph {
        Graph {
            inner: StableDiGraph::with_capacity(nodes, edges),
        }
    }

    /// Adds a node at `position`, which must have finite coordinates.
    pub fn add_node(&mut self, position: Position) -> Result<NodeId> {
        if !(position.x.is_finite() && position.y.is_finite()) {
            return Err(PathfindingError::invalid(
                "position",
                position,
                "finite coordinates",
            ));
        }
        Ok(self.inner.add_node(Node { position }))
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.inner.contains_node(node)
    }

    pub(crate) fn check_node(&self, node: NodeId) -> Result<()> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(PathfindingError::UnknownNode(node))
        }
    }

    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.inner.node_weight(node)
    }

    pub fn position(&self, node: NodeId) -> Result<Position> {
        self.node(node)
            .map(|n| n.position)
            .ok_or(PathfindingError::UnknownNode(node))
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.node_indices()
    }

    /// Creates a single directed edge from `a` to `b`. Connect twice, in both directions, to
    /// allow movement both ways.
    pub fn connect(&mut self, a: NodeId, b: NodeId, traversal_velocity: Velocity) -> Result<EdgeId> {
        check_velocity(traversal_velocity)?;
        let start = self.position(a)?;
        let end = self.position(b)?;
        Ok(self.inner.add_edge(
            a,
            b,
            EdgeData {
                distance: Distance::between(start, end),
                velocity: traversal_velocity,
            },
        ))
    }

    /// Removes every edge from `a` to `b`, returning how many were removed. Edges from `b` to
    /// `a` are left alone.
    pub fn disconnect(&mut self, a: NodeId, b: NodeId) -> Result<usize> {
        self.check_node(a)?;
        self.check_node(b)?;
        let doomed: Vec<EdgeId> = self
            .inner
            .edges_directed(a, Direction::Outgoing)
            .filter(|e| e.target() == b)
            .map(|e| e.id())
            .collect();
        for &e in &doomed {
            self.inner.remove_edge(e);
        }
        Ok(doomed.len())
    }

    /// Removes every edge that starts or ends at `node`.
    pub fn disconnect_node(&mut self, node: NodeId) -> Result<()> {
        self.check_node(node)?;
        let doomed: Vec<EdgeId> = self
            .inner
            .edges_directed(node, Direction::Outgoing)
            .chain(self.inner.edges_directed(node, Direction::Incoming))
            .map(|e| e.id())
            .collect();
        // Self-loops show up in both lists, the second removal is a no-op.
        for e in doomed {
            self.inner.remove_edge(e);
        }
        Ok(())
    }

    pub fn edge(&self, edge: EdgeId) -> Option<Edge> {
        let (start, end) = self.inner.edge_endpoints(edge)?;
        let data = self.inner.edge_weight(edge)?;
        Some(Edge {
            id: edge,
            start,
            end,
            distance: data.distance,
            traversal_velocity: data.velocity,
        })
    }

    pub fn set_traversal_velocity(&mut self, edge: EdgeId, traversal_velocity: Velocity) -> Result<()> {
        check_velocity(traversal_velocity)?;
        let data = self
            .inner
            .edge_weight_mut(edge)
            .ok_or(PathfindingError::UnknownEdge(edge))?;
        data.velocity = traversal_velocity;
        Ok(())
    }

    /// Edges leaving `node`. Empty for unknown nodes.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = Edge> + '_ {
        self.edges_directed(node, Direction::Outgoing)
    }

    /// Edges arriving at `node`. Empty for unknown nodes.
    pub fn incoming(&self, node: NodeId) -> impl Iterator<Item = Edge> + '_ {
        self.edges_directed(node, Direction::Incoming)
    }

    fn edges_directed(&self, node: NodeId, direction: Direction) -> impl Iterator<Item = Edge> + '_ {
        self.contains_node(node)
            .then(|| self.inner.edges_directed(node, direction))
            .into_iter()
            .flatten()
            .map(|e| Edge {
                id: e.id(),
                start: e.source(),
                end: e.target(),
                distance: e.weight().distance,
                traversal_velocity: e.weight().velocity,
            })
    }

    /// The fastest traversal velocity of any edge, [None] if the graph has no edges.
    pub fn maximum_velocity(&self) -> Option<Velocity> {
        self.inner
            .edge_indices()
            .filter_map(|e| self.inner.edge_weight(e))
            .map(|e| e.velocity)
            .fold(None, |best: Option<Velocity>, v| match best {
                Some(b) if b >= v => Some(b),
                _ => Some(v),
            })
    }

    /// Checks whether any directed route leads from `start` to `goal`.
    pub fn reachable(&self, start: NodeId, goal: NodeId) -> bool {
        self.contains_node(start)
            && self.contains_node(goal)
            && petgraph::algo::has_path_connecting(&self.inner, start, goal, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Velocity {
        Velocity::from_meters_per_second(1.0)
    }

    fn line_graph() -> (Graph, NodeId, NodeId, NodeId) {
        let mut graph = Graph::new();
        let a = graph.add_node(Position::new(0.0, 0.0)).unwrap();
        let b = graph.add_node(Position::new(10.0, 0.0)).unwrap();
        let c = graph.add_node(Position::new(20.0, 0.0)).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn connect_records_edge_on_both_endpoints() {
        let (mut graph, a, b, _) = line_graph();
        let e = graph.connect(a, b, unit()).unwrap();
        assert_eq!(graph.outgoing(a).map(|e| e.id).collect::<Vec<_>>(), vec![e]);
        assert_eq!(graph.incoming(b).map(|e| e.id).collect::<Vec<_>>(), vec![e]);
        assert_eq!(graph.incoming(a).count(), 0);
        assert_eq!(graph.outgoing(b).count(), 0);
        let edge = graph.edge(e).unwrap();
        assert_eq!(edge.start, a);
        assert_eq!(edge.end, b);
        assert_eq!(edge.distance, Distance::from_meters(10.0));
        assert_eq!(edge.traversal_duration(), Duration::from_seconds(10.0));
    }

    #[test]
    fn add_node_rejects_non_finite_positions() {
        let mut graph = Graph::new();
        for position in [
            Position::new(f64::NAN, 0.0),
            Position::new(0.0, f64::INFINITY),
            Position::new(f64::NEG_INFINITY, f64::NAN),
        ] {
            assert!(matches!(
                graph.add_node(position),
                Err(PathfindingError::InvalidArgument { name: "position", .. })
            ));
        }
        assert_eq!(graph.node_count(), 0);
        assert!(graph.add_node(Position::new(-3.0, 1e9)).is_ok());
    }

    #[test]
    fn edges_of_unknown_node_are_empty() {
        let (mut graph, a, b, c) = line_graph();
        graph.connect(a, b, unit()).unwrap();
        graph.connect(c, b, unit()).unwrap();
        let stranger = NodeId::new(42);
        assert_eq!(graph.outgoing(stranger).count(), 0);
        assert_eq!(graph.incoming(stranger).count(), 0);
        let mut into_b: Vec<_> = graph.incoming(b).map(|e| (e.start, e.end)).collect();
        into_b.sort();
        assert_eq!(into_b, vec![(a, b), (c, b)]);
    }

    #[test]
    fn connect_rejects_non_positive_velocity() {
        let (mut graph, a, b, _) = line_graph();
        for v in [0.0, -2.0, f64::NAN] {
            let result = graph.connect(a, b, Velocity::from_meters_per_second(v));
            assert!(matches!(result, Err(PathfindingError::InvalidArgument { .. })));
        }
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn connect_rejects_unknown_nodes() {
        let (mut graph, a, _, _) = line_graph();
        let stranger = NodeId::new(42);
        assert_eq!(
            graph.connect(a, stranger, unit()),
            Err(PathfindingError::UnknownNode(stranger))
        );
    }

    #[test]
    fn velocity_change_updates_duration() {
        let (mut graph, a, b, _) = line_graph();
        let e = graph.connect(a, b, unit()).unwrap();
        graph
            .set_traversal_velocity(e, Velocity::from_meters_per_second(4.0))
            .unwrap();
        let edge = graph.edge(e).unwrap();
        assert_eq!(edge.distance, Distance::from_meters(10.0));
        assert_eq!(edge.traversal_duration(), Duration::from_seconds(2.5));
        assert!(graph
            .set_traversal_velocity(e, Velocity::from_meters_per_second(0.0))
            .is_err());
    }

    #[test]
    fn disconnect_node_clears_both_directions() {
        let (mut graph, a, b, c) = line_graph();
        graph.connect(a, b, unit()).unwrap();
        graph.connect(b, a, unit()).unwrap();
        graph.connect(b, c, unit()).unwrap();
        graph.connect(c, b, unit()).unwrap();
        graph.connect(a, c, unit()).unwrap();
        graph.connect(b, b, unit()).unwrap();

        graph.disconnect_node(b).unwrap();

        assert_eq!(graph.outgoing(b).count(), 0);
        assert_eq!(graph.incoming(b).count(), 0);
        assert!(graph.outgoing(a).all(|e| e.end == c));
        assert_eq!(graph.incoming(a).count(), 0);
        assert!(graph.incoming(c).all(|e| e.start == a));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn disconnect_is_directed() {
        let (mut graph, a, b, _) = line_graph();
        graph.connect(a, b, unit()).unwrap();
        graph.connect(a, b, unit()).unwrap();
        graph.connect(b, a, unit()).unwrap();
        assert_eq!(graph.disconnect(a, b).unwrap(), 2);
        assert_eq!(graph.outgoing(a).count(), 0);
        assert_eq!(graph.outgoing(b).count(), 1);
    }

    #[test]
    fn reachability_follows_direction() {
        let (mut graph, a, b, c) = line_graph();
        graph.connect(a, b, unit()).unwrap();
        graph.connect(b, c, unit()).unwrap();
        assert!(graph.reachable(a, c));
        assert!(!graph.reachable(c, a));
    }

    #[test]
    fn maximum_velocity_is_fastest_edge() {
        let (mut graph, a, b, c) = line_graph();
        assert_eq!(graph.maximum_velocity(), None);
        graph.connect(a, b, unit()).unwrap();
        graph
            .connect(b, c, Velocity::from_meters_per_second(3.0))
            .unwrap();
        assert_eq!(
            graph.maximum_velocity(),
            Some(Velocity::from_meters_per_second(3.0))
        );
    }
}
