use crate::error::{PathfindingError, Result};
use crate::graph::{Graph, NodeId};
use crate::path::Path;
use crate::primitives::{Distance, GridPosition, GridSize, Position, Size, Velocity};
use crate::smoothing::CellCosts;
use core::fmt;
use log::info;

/// Which neighbours every cell of a [Grid] is connected to on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// North, east, south and west.
    Lateral,
    /// The four diagonal neighbours.
    Diagonal,
    LateralAndDiagonal,
}

/// A [Graph] laid out on a rectangular lattice. Cell (x, y) holds a node at
/// `(x * cell width, y * cell height)`, connected in both directions to its neighbours
/// according to a [Connectivity]. Cells are never removed, only disconnected.
#[derive(Clone, Debug)]
pub struct Grid {
    graph: Graph,
    size: GridSize,
    cell_size: Size,
    traversal_velocity: Velocity,
}

fn check_arguments(grid_size: GridSize, cell_size: Size, traversal_velocity: Velocity) -> Result<()> {
    if grid_size.columns < 1 {
        return Err(PathfindingError::invalid("columns", grid_size.columns, ">= 1"));
    }
    if grid_size.rows < 1 {
        return Err(PathfindingError::invalid("rows", grid_size.rows, ">= 1"));
    }
    // Written so that NaN fails as well.
    if !(cell_size.width > Distance::from_meters(0.0)) || !cell_size.width.meters().is_finite() {
        return Err(PathfindingError::invalid(
            "cell width",
            cell_size.width,
            "finite and > 0.00m",
        ));
    }
    if !(cell_size.height > Distance::from_meters(0.0)) || !cell_size.height.meters().is_finite() {
        return Err(PathfindingError::invalid(
            "cell height",
            cell_size.height,
            "finite and > 0.00m",
        ));
    }
    if !traversal_velocity.is_valid() {
        return Err(PathfindingError::invalid(
            "traversal_velocity",
            traversal_velocity,
            "> 0.0 m/s",
        ));
    }
    Ok(())
}

impl Grid {
    /// Builds a grid of `grid_size` cells wired according to `connectivity`, every edge
    /// traversed at `traversal_velocity`. All arguments are validated before any node is made.
    pub fn create(
        grid_size: GridSize,
        cell_size: Size,
        traversal_velocity: Velocity,
        connectivity: Connectivity,
    ) -> Result<Grid> {
        check_arguments(grid_size, cell_size, traversal_velocity)?;
        let mut grid = Grid::with_nodes(grid_size, cell_size, traversal_velocity)?;
        match connectivity {
            Connectivity::Lateral => grid.create_lateral_connections()?,
            Connectivity::Diagonal => grid.create_diagonal_connections()?,
            Connectivity::LateralAndDiagonal => {
                grid.create_diagonal_connections()?;
                grid.create_lateral_connections()?;
            }
        }
        info!(
            "Created {}x{} grid with {:?} connections ({} edges)",
            grid_size.columns,
            grid_size.rows,
            connectivity,
            grid.graph.edge_count()
        );
        Ok(grid)
    }

    pub fn create_with_lateral_connections(
        grid_size: GridSize,
        cell_size: Size,
        traversal_velocity: Velocity,
    ) -> Result<Grid> {
        Grid::create(grid_size, cell_size, traversal_velocity, Connectivity::Lateral)
    }

    pub fn create_with_diagonal_connections(
        grid_size: GridSize,
        cell_size: Size,
        traversal_velocity: Velocity,
    ) -> Result<Grid> {
        Grid::create(grid_size, cell_size, traversal_velocity, Connectivity::Diagonal)
    }

    pub fn create_with_lateral_and_diagonal_connections(
        grid_size: GridSize,
        cell_size: Size,
        traversal_velocity: Velocity,
    ) -> Result<Grid> {
        Grid::create(
            grid_size,
            cell_size,
            traversal_velocity,
            Connectivity::LateralAndDiagonal,
        )
    }

    fn with_nodes(size: GridSize, cell_size: Size, traversal_velocity: Velocity) -> Result<Grid> {
        let n = size.columns * size.rows;
        let mut graph = Graph::with_capacity(n, n * 8);
        // Column-major, so that the node index of (x, y) is x * rows + y.
        for x in 0..size.columns {
            for y in 0..size.rows {
                graph.add_node(Position::from_offset(
                    cell_size.width * x as f64,
                    cell_size.height * y as f64,
                ))?;
            }
        }
        Ok(Grid {
            graph,
            size,
            cell_size,
            traversal_velocity,
        })
    }

    fn connect_both_ways(&mut self, a: (usize, usize), b: (usize, usize)) -> Result<()> {
        let a = self.node_at(a.0, a.1);
        let b = self.node_at(b.0, b.1);
        self.graph.connect(a, b, self.traversal_velocity)?;
        self.graph.connect(b, a, self.traversal_velocity)?;
        Ok(())
    }

    fn create_lateral_connections(&mut self) -> Result<()> {
        let (columns, rows) = (self.size.columns, self.size.rows);
        for x in 0..columns {
            for y in 0..rows {
                if x + 1 < columns {
                    self.connect_both_ways((x, y), (x + 1, y))?;
                }
                if y + 1 < rows {
                    self.connect_both_ways((x, y), (x, y + 1))?;
                }
            }
        }
        Ok(())
    }

    fn create_diagonal_connections(&mut self) -> Result<()> {
        let (columns, rows) = (self.size.columns, self.size.rows);
        for x in 0..columns {
            for y in 0..rows {
                if x + 1 < columns && y + 1 < rows {
                    self.connect_both_ways((x, y), (x + 1, y + 1))?;
                }
                if x > 0 && y + 1 < rows {
                    self.connect_both_ways((x, y), (x - 1, y + 1))?;
                }
            }
        }
        Ok(())
    }

    fn node_at(&self, x: usize, y: usize) -> NodeId {
        NodeId::new(x * self.size.rows + y)
    }

    fn cell(&self, position: GridPosition) -> Option<(usize, usize)> {
        let in_bounds = position.x >= 0
            && position.y >= 0
            && (position.x as usize) < self.size.columns
            && (position.y as usize) < self.size.rows;
        in_bounds.then(|| (position.x as usize, position.y as usize))
    }

    pub fn in_bounds(&self, position: GridPosition) -> bool {
        self.cell(position).is_some()
    }

    pub fn columns(&self) -> usize {
        self.size.columns
    }

    pub fn rows(&self) -> usize {
        self.size.rows
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cell_size(&self) -> Size {
        self.cell_size
    }

    /// The velocity every edge was created with.
    pub fn default_velocity(&self) -> Velocity {
        self.traversal_velocity
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access for connecting cells or changing edge velocities.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn get_node(&self, position: GridPosition) -> Result<NodeId> {
        self.cell(position)
            .map(|(x, y)| self.node_at(x, y))
            .ok_or(PathfindingError::OutOfBounds {
                position,
                columns: self.size.columns,
                rows: self.size.rows,
            })
    }

    /// The cell holding `node`, [None] if the node is not part of this grid.
    pub fn grid_position(&self, node: NodeId) -> Option<GridPosition> {
        let ix = node.index();
        (ix < self.size.columns * self.size.rows && self.graph.contains_node(node)).then(|| {
            GridPosition::new((ix / self.size.rows) as i32, (ix % self.size.rows) as i32)
        })
    }

    /// Every node, column by column.
    pub fn all_nodes(&self) -> Vec<NodeId> {
        self.graph.nodes().collect()
    }

    /// The cells visited by `path`, start included.
    pub fn positions(&self, path: &Path) -> Vec<GridPosition> {
        path.nodes()
            .into_iter()
            .filter_map(|n| self.grid_position(n))
            .collect()
    }

    /// Removes every edge into and out of the cell at `position`.
    pub fn disconnect_node(&mut self, position: GridPosition) -> Result<()> {
        let node = self.get_node(position)?;
        self.graph.disconnect_node(node)
    }

    /// Removes the diagonal edges that pass the corners of the cell at `position`: those
    /// between its north and east, east and south, south and west, and west and north
    /// neighbours. Call after [disconnect_node](Self::disconnect_node) so agents do not cut
    /// across a blocked cell.
    pub fn remove_diagonal_connections_intersecting_with_node(
        &mut self,
        position: GridPosition,
    ) -> Result<()> {
        self.get_node(position)?;
        let (x, y) = (position.x, position.y);
        let north = GridPosition::new(x, y - 1);
        let east = GridPosition::new(x + 1, y);
        let south = GridPosition::new(x, y + 1);
        let west = GridPosition::new(x - 1, y);
        for (a, b) in [(north, east), (east, south), (south, west), (west, north)] {
            if let (Ok(a), Ok(b)) = (self.get_node(a), self.get_node(b)) {
                self.graph.disconnect(a, b)?;
                self.graph.disconnect(b, a)?;
            }
        }
        Ok(())
    }

    fn is_isolated(&self, node: NodeId) -> bool {
        self.graph.outgoing(node).next().is_none() && self.graph.incoming(node).next().is_none()
    }
}

/// Entering a cell costs the seconds per metre of its fastest incoming edge. A cell nothing
/// leads into cannot be entered.
impl CellCosts for Grid {
    fn cell_cost(&self, position: GridPosition) -> Option<f64> {
        let node = self.get_node(position).ok()?;
        let fastest = self
            .graph
            .incoming(node)
            .map(|e| e.traversal_velocity.meters_per_second())
            .fold(0.0, f64::max);
        Some(if fastest > 0.0 {
            1.0 / fastest
        } else {
            f64::INFINITY
        })
    }

    /// Only steps backed by an edge of the graph connect, so smoothing never brings back a
    /// removed edge such as a diagonal cutting the corner of a disconnected cell.
    fn connects(&self, from: GridPosition, to: GridPosition) -> bool {
        match (self.get_node(from), self.get_node(to)) {
            (Ok(from), Ok(to)) => self.graph.outgoing(from).any(|e| e.end == to),
            _ => false,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in 0..self.size.rows {
            let row = (0..self.size.columns)
                .map(|x| {
                    if self.is_isolated(self.node_at(x, y)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
