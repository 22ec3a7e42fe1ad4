use weighted_pathfinding::{Graph, PathFinder, PathType, Position, Velocity};

/// A road network where the destination sits on an island. Instead of failing, the search
/// returns the route to the point on the mainland closest to the island.
fn main() {
    let walking = Velocity::from_kilometers_per_hour(5.0);
    let driving = Velocity::from_kilometers_per_hour(50.0);

    let mut graph = Graph::new();
    let home = graph.add_node(Position::new(0.0, 0.0)).unwrap();
    let junction = graph.add_node(Position::new(500.0, 0.0)).unwrap();
    let harbour = graph.add_node(Position::new(900.0, 300.0)).unwrap();
    let island = graph.add_node(Position::new(1200.0, 400.0)).unwrap();
    for (a, b, v) in [(home, junction, driving), (junction, harbour, walking)] {
        graph.connect(a, b, v).unwrap();
        graph.connect(b, a, v).unwrap();
    }

    let mut finder = PathFinder::new();
    let path = finder.find_path(&graph, home, island, driving).unwrap();
    match path.path_type {
        PathType::Complete => println!("Reached the island: {}", path),
        PathType::ClosestApproach => println!("Got as close as possible: {}", path),
    }
    for edge in &path.edges {
        println!(
            "{:?} -> {:?}: {} at {}",
            edge.start,
            edge.end,
            edge.distance,
            edge.traversal_velocity
        );
    }
}
