use weighted_pathfinding::{Grid, GridPosition, GridSize, PathFinder, Size, Velocity};

// In this example a path is found on a 5x5 grid with shape
// S....
// ..#..
// ..#..
// ..#..
// ....E
// S marks the start
// E marks the end
fn main() {
    let mut grid = Grid::create_with_lateral_and_diagonal_connections(
        GridSize::new(5, 5),
        Size::from_meters(1.0, 1.0),
        Velocity::from_kilometers_per_hour(5.0),
    )
    .unwrap();
    for y in 1..4 {
        let wall = GridPosition::new(2, y);
        grid.disconnect_node(wall).unwrap();
        grid.remove_diagonal_connections_intersecting_with_node(wall)
            .unwrap();
    }
    println!("{}", grid);

    let start = GridPosition::new(0, 0);
    let end = GridPosition::new(4, 4);
    let path = PathFinder::new()
        .find_path_in_grid(&grid, start, end)
        .unwrap();
    println!("{}", path);
    for p in grid.positions(&path) {
        println!("{:?}", p);
    }
}
