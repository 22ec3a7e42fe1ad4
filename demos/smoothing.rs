use weighted_pathfinding::{
    movement_patterns, path_cost, smooth_path, AgentShape, CostGrid, GridPosition,
    DEFAULT_CELL_COST, DEFAULT_MAX_STRING_LENGTH,
};

/// Finds a path across a cost grid with a marsh in the middle, then pulls it straight where
/// doing so does not make it more expensive.
fn main() {
    let mut grid = CostGrid::new(12, 8, DEFAULT_CELL_COST).unwrap();
    for x in 4..8 {
        for y in 2..6 {
            grid.set_cell_cost(GridPosition::new(x, y), 3.0).unwrap();
        }
    }
    grid.block_cell(GridPosition::new(6, 0)).unwrap();
    println!("{}", grid);

    let path = grid
        .get_path(
            GridPosition::new(0, 7),
            GridPosition::new(11, 0),
            &movement_patterns::FULL,
            &AgentShape::dot(),
        )
        .unwrap();
    println!("{:?}, cost {:.2}", path.result, path.cost);
    println!("Raw path: {:?}", path.positions);

    let smoothed = smooth_path(
        &grid,
        &path.positions,
        &movement_patterns::FULL,
        DEFAULT_MAX_STRING_LENGTH,
    )
    .unwrap();
    println!("Smoothed path: {:?}", smoothed);
    println!(
        "Cost before: {:.2}, after: {:.2}",
        path_cost(&grid, &path.positions),
        path_cost(&grid, &smoothed)
    );
}
