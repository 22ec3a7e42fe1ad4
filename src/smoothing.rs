//! String pulling: straightens the zig-zags a cell search leaves behind without making the
//! path more expensive.
//!
//! For every window of up to `max_string_length` intermediate cells, the cells on the
//! rasterized line between the window's ends are tried in place of the original cells. A
//! candidate cell is taken only when it costs no more than the cell it replaces and the
//! movement pattern and the cost source both still connect it to its already smoothed
//! predecessor and to its successor. The rewritten window is kept only if its total cost did not increase. Windows
//! grow from one intermediate cell up to the bound, so longer windows refine what shorter
//! ones already straightened.
use crate::error::{PathfindingError, Result};
use crate::movement::{is_permitted, Offset};
use crate::primitives::GridPosition;
use itertools::Itertools;
use log::debug;

/// Source of the cost of entering a cell. [None] marks a cell that does not exist.
pub trait CellCosts {
    fn cell_cost(&self, position: GridPosition) -> Option<f64>;

    /// Whether a single step from `from` to `to` can be taken. Sources without per-step
    /// connectivity leave this to the movement pattern.
    fn connects(&self, _from: GridPosition, _to: GridPosition) -> bool {
        true
    }
}

fn steps_to<C: CellCosts + ?Sized>(
    costs: &C,
    movement_pattern: &[Offset],
    from: GridPosition,
    to: GridPosition,
) -> bool {
    is_permitted(movement_pattern, from, to) && costs.connects(from, to)
}

/// Sum over all steps of the cost of the entered cell times the step length. Missing cells
/// cost infinity.
pub fn path_cost<C: CellCosts + ?Sized>(costs: &C, positions: &[GridPosition]) -> f64 {
    positions
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| {
            costs.cell_cost(b).unwrap_or(f64::INFINITY) * Offset::between(a, b).cost()
        })
        .sum()
}

/// Cells on the 8-connected line from `a` to `b`, both included.
pub fn bresenham(a: GridPosition, b: GridPosition) -> Vec<GridPosition> {
    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (a.x, a.y);
    let mut line = Vec::with_capacity(dx.max(dy) as usize + 1);
    loop {
        line.push(GridPosition::new(x, y));
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    line
}

/// Cells on the 4-connected line from `a` to `b`, both included. Each step moves along the
/// axis whose next cell boundary the ideal line crosses first.
pub fn lateral_line(a: GridPosition, b: GridPosition) -> Vec<GridPosition> {
    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let (mut x, mut y) = (a.x, a.y);
    let (mut ix, mut iy) = (0, 0);
    let mut line = Vec::with_capacity((dx + dy) as usize + 1);
    line.push(a);
    while ix < dx || iy < dy {
        if (1 + 2 * ix) * dy < (1 + 2 * iy) * dx {
            x += sx;
            ix += 1;
        } else {
            y += sy;
            iy += 1;
        }
        line.push(GridPosition::new(x, y));
    }
    line
}

fn check_steps(positions: &[GridPosition], movement_pattern: &[Offset]) -> Result<()> {
    for (index, (&from, &to)) in positions.iter().tuple_windows().enumerate() {
        if !is_permitted(movement_pattern, from, to) {
            return Err(PathfindingError::IllegalStep { index, from, to });
        }
    }
    Ok(())
}

/// Returns a copy of `positions` with detours pulled straight, see the module documentation.
/// Every consecutive pair of the input must be one step of `movement_pattern` apart.
pub fn smooth_path<C: CellCosts + ?Sized>(
    costs: &C,
    positions: &[GridPosition],
    movement_pattern: &[Offset],
    max_string_length: usize,
) -> Result<Vec<GridPosition>> {
    if movement_pattern.is_empty() {
        return Err(PathfindingError::invalid(
            "movement_pattern",
            "empty",
            "at least one offset",
        ));
    }
    check_steps(positions, movement_pattern)?;

    let mut path = positions.to_vec();
    let diagonal = movement_pattern.iter().any(Offset::is_diagonal);
    let mut swaps = 0;
    // A window of `steps` steps holds `steps - 1` intermediate cells.
    for steps in 2..=max_string_length.saturating_add(1) {
        if steps >= path.len() {
            break;
        }
        for start in 0..path.len() - steps {
            let end = start + steps;
            let line = if diagonal {
                bresenham(path[start], path[end])
            } else {
                lateral_line(path[start], path[end])
            };
            if line.len() != steps + 1 {
                continue;
            }

            let original = &path[start..=end];
            let mut candidate = original.to_vec();
            let mut changed = false;
            for k in 1..steps {
                let cell = line[k];
                let replaced = candidate[k];
                if cell == replaced {
                    continue;
                }
                let (Some(new_cost), Some(old_cost)) =
                    (costs.cell_cost(cell), costs.cell_cost(replaced))
                else {
                    continue;
                };
                if !(new_cost <= old_cost) {
                    continue;
                }
                if !steps_to(costs, movement_pattern, candidate[k - 1], cell)
                    || !steps_to(costs, movement_pattern, cell, candidate[k + 1])
                {
                    continue;
                }
                candidate[k] = cell;
                changed = true;
            }

            if changed && path_cost(costs, &candidate) <= path_cost(costs, original) {
                path[start..=end].copy_from_slice(&candidate);
                swaps += 1;
            }
        }
    }
    debug!("Smoothed path of {} cells with {} rewrites", path.len(), swaps);
    Ok(path)
}
