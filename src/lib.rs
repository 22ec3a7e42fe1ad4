//! # weighted_pathfinding
//!
//! Time-optimal [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding over
//! directed graphs whose edges carry a traversal velocity. Searches minimise travel duration
//! rather than distance, using the straight-line distance at the fastest velocity in the
//! graph as an admissible heuristic. When the goal cannot be reached the path to the node
//! that came closest is returned instead of failing.
//!
//! Besides the graph search the crate contains:
//! - [Grid], a graph laid out on a lattice with lateral and/or diagonal connections,
//! - [CostGrid] and [CellPathFinder], a cell based search for agents covering several cells,
//! - [smooth_path], string pulling that straightens grid paths without raising their cost.
mod cost_grid;
mod error;
mod graph;
mod grid;
pub mod min_heap;
pub mod movement;
mod path;
mod primitives;
pub mod smoothing;
pub mod solver;

pub use cost_grid::CostGrid;
pub use error::{PathfindingError, Result};
pub use graph::{Edge, EdgeId, Graph, Node, NodeId};
pub use grid::{Connectivity, Grid};
pub use movement::{movement_patterns, AgentShape, Boundary, Offset};
pub use path::{Path, PathReconstructor, PathType};
pub use primitives::{Distance, Duration, GridPosition, GridSize, Position, Size, Velocity};
pub use smoothing::{path_cost, smooth_path, CellCosts};
pub use solver::astar::PathFinder;
pub use solver::cells::{CellPath, CellPathFinder, PathFindResult};
pub use solver::{NoopObserver, SearchObserver, SearchRecorder, SearchStep};

/// Default number of intermediate cells string pulling considers at once.
pub const DEFAULT_MAX_STRING_LENGTH: usize = 10;
/// Default weight of a [CostGrid] cell.
pub const DEFAULT_CELL_COST: f64 = 1.0;
