/// Fuzzes the search engines on many random grids, checking that a complete path is found
/// exactly when the goal is reachable, that the graph and cell engines agree on the optimal
/// cost, and that smoothing never makes a path more expensive nor steps along a missing edge.
use rand::prelude::*;
use weighted_pathfinding::min_heap::MinHeap;
use weighted_pathfinding::*;

fn random_grid(n: usize, rng: &mut StdRng, connectivity: Connectivity) -> (Grid, CostGrid) {
    let mut grid = Grid::create(
        GridSize::new(n, n),
        Size::from_meters(1.0, 1.0),
        Velocity::from_meters_per_second(1.0),
        connectivity,
    )
    .unwrap();
    let mut costs = CostGrid::new(n, n, DEFAULT_CELL_COST).unwrap();
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            if rng.gen_bool(0.4) {
                let p = GridPosition::new(x, y);
                grid.disconnect_node(p).unwrap();
                costs.block_cell(p).unwrap();
            }
        }
    }
    (grid, costs)
}

fn pattern(connectivity: Connectivity) -> &'static [Offset] {
    match connectivity {
        Connectivity::Lateral => &movement_patterns::LATERAL_ONLY,
        Connectivity::Diagonal => &movement_patterns::DIAGONAL_ONLY,
        Connectivity::LateralAndDiagonal => &movement_patterns::FULL,
    }
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    let mut finder = PathFinder::new();
    for connectivity in [
        Connectivity::Lateral,
        Connectivity::Diagonal,
        Connectivity::LateralAndDiagonal,
    ] {
        for _ in 0..N_GRIDS {
            let (grid, _) = random_grid(N, &mut rng, connectivity);
            let start = GridPosition::new(0, 0);
            let end = GridPosition::new(N as i32 - 1, N as i32 - 1);
            let reachable = grid
                .graph()
                .reachable(grid.get_node(start).unwrap(), grid.get_node(end).unwrap());
            let path = finder.find_path_in_grid(&grid, start, end).unwrap();
            // Show the grid if the outcome is wrong
            if path.is_complete() != reachable {
                println!("{}", grid);
            }
            assert_eq!(path.is_complete(), reachable);

            for pair in path.edges.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
            let duration: f64 = path
                .edges
                .iter()
                .map(|e| e.traversal_duration().seconds())
                .sum();
            assert!((path.duration.seconds() - duration).abs() < 1e-9);
            if let Some(first) = path.edges.first() {
                assert_eq!(Some(first.start), grid.get_node(start).ok());
            }
        }
    }
}

#[test]
fn fuzz_cost() {
    const N: usize = 6;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    let mut finder = PathFinder::new();
    let mut cell_finder = CellPathFinder::new();
    for connectivity in [Connectivity::Lateral, Connectivity::LateralAndDiagonal] {
        for _ in 0..N_GRIDS {
            let (grid, costs) = random_grid(N, &mut rng, connectivity);
            let start = GridPosition::new(0, 0);
            let end = GridPosition::new(N as i32 - 1, N as i32 - 1);
            let path = finder.find_path_in_grid(&grid, start, end).unwrap();
            if !path.is_complete() {
                continue;
            }
            let cell_path = cell_finder
                .find_path(&costs, start, end, pattern(connectivity), &AgentShape::dot())
                .unwrap();
            assert_eq!(cell_path.result, PathFindResult::PathFound);
            let delta = (cell_path.cost - path.duration.seconds()).abs();
            if delta >= 1e-9 {
                println!("{}", grid);
                println!("graph: {}, cells: {:?}", path, cell_path);
            }
            assert!(delta < 1e-9);
        }
    }
}

#[test]
fn fuzz_smoothing() {
    const N: usize = 12;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(0);
    let mut cell_finder = CellPathFinder::new();
    for connectivity in [Connectivity::Lateral, Connectivity::LateralAndDiagonal] {
        let movement_pattern = pattern(connectivity);
        for _ in 0..N_GRIDS {
            let mut costs = CostGrid::new(N, N, DEFAULT_CELL_COST).unwrap();
            for x in 0..N as i32 {
                for y in 0..N as i32 {
                    let p = GridPosition::new(x, y);
                    if rng.gen_bool(0.15) {
                        costs.block_cell(p).unwrap();
                    } else {
                        costs.set_cell_cost(p, rng.gen_range(1.0..4.0)).unwrap();
                    }
                }
            }
            let start = GridPosition::new(0, rng.gen_range(0..N as i32));
            let end = GridPosition::new(N as i32 - 1, rng.gen_range(0..N as i32));
            costs.set_cell_cost(start, 1.0).unwrap();
            costs.set_cell_cost(end, 1.0).unwrap();

            let cell_path = cell_finder
                .find_path(&costs, start, end, movement_pattern, &AgentShape::dot())
                .unwrap();
            let original = cell_path.positions;
            let smoothed =
                smooth_path(&costs, &original, movement_pattern, DEFAULT_MAX_STRING_LENGTH)
                    .unwrap();

            assert_eq!(smoothed.len(), original.len());
            assert_eq!(smoothed.first(), original.first());
            assert_eq!(smoothed.last(), original.last());
            assert!(path_cost(&costs, &smoothed) <= path_cost(&costs, &original) + 1e-9);
            for (new, old) in smoothed.iter().zip(&original) {
                let new_cost = CellCosts::cell_cost(&costs, *new).unwrap();
                let old_cost = CellCosts::cell_cost(&costs, *old).unwrap();
                assert!(new_cost <= old_cost);
            }
            for pair in smoothed.windows(2) {
                assert!(movement_pattern.contains(&Offset::between(pair[0], pair[1])));
            }
        }
    }
}

#[test]
fn fuzz_grid_smoothing() {
    const N: usize = 10;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(0);
    let mut finder = PathFinder::new();
    for _ in 0..N_GRIDS {
        let mut grid = Grid::create_with_lateral_and_diagonal_connections(
            GridSize::new(N, N),
            Size::from_meters(1.0, 1.0),
            Velocity::from_meters_per_second(1.0),
        )
        .unwrap();
        for x in 0..N as i32 {
            for y in 0..N as i32 {
                if rng.gen_bool(0.25) {
                    let p = GridPosition::new(x, y);
                    grid.disconnect_node(p).unwrap();
                    if rng.gen_bool(0.5) {
                        grid.remove_diagonal_connections_intersecting_with_node(p)
                            .unwrap();
                    }
                }
            }
        }
        let start = GridPosition::new(0, rng.gen_range(0..N as i32));
        let end = GridPosition::new(N as i32 - 1, rng.gen_range(0..N as i32));
        let path = finder.find_path_in_grid(&grid, start, end).unwrap();
        if !path.is_complete() || path.is_empty() {
            continue;
        }
        let cells = grid.positions(&path);
        let smoothed = smooth_path(
            &grid,
            &cells,
            &movement_patterns::FULL,
            DEFAULT_MAX_STRING_LENGTH,
        )
        .unwrap();

        assert_eq!(smoothed.first(), cells.first());
        assert_eq!(smoothed.last(), cells.last());
        assert!(path_cost(&grid, &smoothed) <= path_cost(&grid, &cells) + 1e-9);
        for pair in smoothed.windows(2) {
            let a = grid.get_node(pair[0]).unwrap();
            let b = grid.get_node(pair[1]).unwrap();
            if !grid.graph().outgoing(a).any(|e| e.end == b) {
                println!("{}", grid);
                println!("cells: {:?}\nsmoothed: {:?}", cells, smoothed);
            }
            assert!(grid.graph().outgoing(a).any(|e| e.end == b));
        }
    }
}

#[test]
fn fuzz_heap() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut heap = MinHeap::new();
    let mut model: Vec<u32> = Vec::new();
    for _ in 0..20000 {
        match rng.gen_range(0..10) {
            0..=4 => {
                let v = rng.gen_range(0..1000);
                heap.insert(v);
                model.push(v);
            }
            5..=7 => {
                let min = heap.extract_min();
                assert_eq!(min, model.iter().min().copied());
                if let Some(min) = min {
                    assert!(model.iter().all(|&v| v >= min));
                    let ix = model.iter().position(|&v| v == min).unwrap();
                    model.swap_remove(ix);
                }
            }
            _ => {
                if let Some(&v) = model.choose(&mut rng) {
                    assert_eq!(heap.remove(&v), Some(v));
                    let ix = model.iter().position(|&m| m == v).unwrap();
                    model.swap_remove(ix);
                }
            }
        }
        assert_eq!(heap.len(), model.len());
        assert_eq!(heap.peek().copied(), model.iter().min().copied());
    }
}
