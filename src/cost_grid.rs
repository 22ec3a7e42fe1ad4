use crate::error::{PathfindingError, Result};
use crate::movement::{AgentShape, Offset};
use crate::primitives::GridPosition;
use crate::smoothing::CellCosts;
use crate::solver::cells::{CellPath, CellPathFinder};
use core::fmt;
use log::info;

/// Rectangular grid of cell weights. The cost of entering a cell is multiplied by the length
/// of the step, a blocked cell has infinite cost and can never be entered.
#[derive(Clone, Debug, PartialEq)]
pub struct CostGrid {
    columns: usize,
    rows: usize,
    default_cost: f64,
    costs: Vec<f64>,
}

fn check_cost(name: &'static str, cost: f64) -> Result<()> {
    // Written so that NaN fails as well.
    if cost > 0.0 {
        Ok(())
    } else {
        Err(PathfindingError::invalid(name, cost, "> 0.0"))
    }
}

impl CostGrid {
    /// Creates a `columns` x `rows` grid of cells all costing `default_cost`, see
    /// [DEFAULT_CELL_COST](crate::DEFAULT_CELL_COST).
    pub fn new(columns: usize, rows: usize, default_cost: f64) -> Result<CostGrid> {
        if columns < 1 {
            return Err(PathfindingError::invalid("columns", columns, ">= 1"));
        }
        if rows < 1 {
            return Err(PathfindingError::invalid("rows", rows, ">= 1"));
        }
        check_cost("default_cost", default_cost)?;
        info!("Created {}x{} cost grid", columns, rows);
        Ok(CostGrid {
            columns,
            rows,
            default_cost,
            costs: vec![default_cost; columns * rows],
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn default_cost(&self) -> f64 {
        self.default_cost
    }

    pub fn in_bounds(&self, position: GridPosition) -> bool {
        self.index(position).is_some()
    }

    fn index(&self, p: GridPosition) -> Option<usize> {
        let in_bounds = p.x >= 0
            && p.y >= 0
            && (p.x as usize) < self.columns
            && (p.y as usize) < self.rows;
        in_bounds.then(|| p.y as usize * self.columns + p.x as usize)
    }

    fn checked_index(&self, position: GridPosition) -> Result<usize> {
        self.index(position).ok_or(PathfindingError::OutOfBounds {
            position,
            columns: self.columns,
            rows: self.rows,
        })
    }

    /// Sets the weight of a cell. Use [f64::INFINITY] or [block_cell](Self::block_cell) to
    /// make it impassable.
    pub fn set_cell_cost(&mut self, position: GridPosition, cost: f64) -> Result<()> {
        check_cost("cost", cost)?;
        let ix = self.checked_index(position)?;
        self.costs[ix] = cost;
        Ok(())
    }

    pub fn block_cell(&mut self, position: GridPosition) -> Result<()> {
        self.set_cell_cost(position, f64::INFINITY)
    }

    /// Restores the default cost of a cell.
    pub fn unblock_cell(&mut self, position: GridPosition) -> Result<()> {
        self.set_cell_cost(position, self.default_cost)
    }

    pub fn cell_cost(&self, position: GridPosition) -> Result<f64> {
        Ok(self.costs[self.checked_index(position)?])
    }

    /// Cost of entering `position` for an agent of `shape` centred there: the most expensive
    /// cell it covers. Cells past the edge of the grid count as blocked.
    pub fn cell_cost_for_shape(&self, position: GridPosition, shape: &AgentShape) -> f64 {
        shape
            .occupied(position)
            .map(|p| self.index(p).map_or(f64::INFINITY, |ix| self.costs[ix]))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Cheapest cell that can be entered, [None] if all cells are blocked.
    pub fn minimum_cell_cost(&self) -> Option<f64> {
        self.costs
            .iter()
            .copied()
            .filter(|c| c.is_finite())
            .reduce(f64::min)
    }

    /// Finds the cheapest path for an agent of `shape` with a fresh [CellPathFinder].
    pub fn get_path(
        &self,
        start: GridPosition,
        end: GridPosition,
        movement_pattern: &[Offset],
        shape: &AgentShape,
    ) -> Result<CellPath> {
        CellPathFinder::new().find_path(self, start, end, movement_pattern, shape)
    }
}

impl CellCosts for CostGrid {
    fn cell_cost(&self, position: GridPosition) -> Option<f64> {
        self.index(position).map(|ix| self.costs[ix])
    }
}

impl fmt::Display for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for row in self.costs.chunks(self.columns) {
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}
