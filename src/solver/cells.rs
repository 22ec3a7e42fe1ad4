use fxhash::FxHashMap;
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::hash_map::Entry;

use super::{NoopObserver, SearchObserver};
use crate::cost_grid::CostGrid;
use crate::error::{PathfindingError, Result};
use crate::min_heap::MinHeap;
use crate::movement::{AgentShape, Offset};
use crate::primitives::GridPosition;

/// Outcome of a [CellPathFinder] search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathFindResult {
    PathFound,
    /// The end could not be reached within the iteration limit or at all. The path leads to
    /// the expanded cell closest to the end.
    PartialPathFound,
    AlreadyAtTheEnd,
    /// The agent does not fit on the grid when centred on the start.
    StartOutsideBoundaries,
    /// The agent does not fit on the grid when centred on the end.
    EndOutsideBoundaries,
}

/// Cells visited from start to end, both included, and the summed cost of every step.
#[derive(Clone, Debug, PartialEq)]
pub struct CellPath {
    pub result: PathFindResult,
    pub positions: Vec<GridPosition>,
    pub cost: f64,
}

impl CellPath {
    fn rejected(result: PathFindResult) -> CellPath {
        CellPath {
            result,
            positions: Vec::new(),
            cost: 0.0,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(
            self.result,
            PathFindResult::PathFound | PathFindResult::AlreadyAtTheEnd
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct CellEntry {
    position: GridPosition,
    cost: f64,
    expected_cost: f64,
}

impl PartialEq for CellEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellEntry {}

impl PartialOrd for CellEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.expected_cost.total_cmp(&other.expected_cost)
    }
}

fn euclidean(a: GridPosition, b: GridPosition) -> f64 {
    Offset::between(a, b).cost()
}

/// A* over the cells of a [CostGrid] for an agent that may cover several cells. Every step
/// costs the most expensive cell under the agent after the move times the length of the move;
/// the heuristic is the straight-line distance at the cheapest cell cost of the grid.
#[derive(Default)]
pub struct CellPathFinder {
    open: MinHeap<CellEntry>,
    parents: FxHashMap<GridPosition, (f64, Option<GridPosition>)>,
    /// Maximum number of cells to expand, unbounded when [None].
    pub iteration_limit: Option<usize>,
}

impl CellPathFinder {
    pub fn new() -> CellPathFinder {
        CellPathFinder::default()
    }

    pub fn with_iteration_limit(iteration_limit: usize) -> CellPathFinder {
        CellPathFinder {
            iteration_limit: Some(iteration_limit),
            ..CellPathFinder::default()
        }
    }

    pub fn find_path(
        &mut self,
        grid: &CostGrid,
        start: GridPosition,
        end: GridPosition,
        movement_pattern: &[Offset],
        shape: &AgentShape,
    ) -> Result<CellPath> {
        self.find_path_observed(grid, start, end, movement_pattern, shape, &mut NoopObserver)
    }

    pub fn find_path_observed<O>(
        &mut self,
        grid: &CostGrid,
        start: GridPosition,
        end: GridPosition,
        movement_pattern: &[Offset],
        shape: &AgentShape,
        observer: &mut O,
    ) -> Result<CellPath>
    where
        O: SearchObserver<GridPosition> + ?Sized,
    {
        if movement_pattern.is_empty() {
            return Err(PathfindingError::invalid(
                "movement_pattern",
                "empty",
                "at least one offset",
            ));
        }
        self.open.clear();
        self.parents.clear();
        if start == end {
            return Ok(CellPath {
                result: PathFindResult::AlreadyAtTheEnd,
                positions: vec![start],
                cost: 0.0,
            });
        }
        let boundary = shape.boundary(grid.columns(), grid.rows());
        if !boundary.is_inside(start) {
            return Ok(CellPath::rejected(PathFindResult::StartOutsideBoundaries));
        }
        if !boundary.is_inside(end) {
            return Ok(CellPath::rejected(PathFindResult::EndOutsideBoundaries));
        }

        let heuristic_factor = grid.minimum_cell_cost().unwrap_or(0.0);
        let heuristic = |p: GridPosition| euclidean(p, end) * heuristic_factor;

        self.open.insert(CellEntry {
            position: start,
            cost: 0.0,
            expected_cost: heuristic(start),
        });
        self.parents.insert(start, (0.0, None));
        observer.on_node_opened(start);

        let mut closest = (start, euclidean(start, end));
        let mut iterations = 0;
        debug!("Searching cells from {:?} to {:?}", start, end);
        while !self.open.is_empty() {
            if self.iteration_limit.is_some_and(|limit| iterations >= limit) {
                warn!(
                    "Cell search from {:?} to {:?} stopped after {} iterations",
                    start, end, iterations
                );
                break;
            }
            let Some(CellEntry { position, cost, .. }) = self.open.extract_min() else {
                break;
            };
            // A cell is pushed again whenever a cheaper way to it is found, skip the
            // outdated entries.
            if self.parents.get(&position).is_some_and(|&(best, _)| cost > best) {
                continue;
            }
            iterations += 1;
            observer.on_node_visited(position);

            if position == end {
                debug!("Reached {:?} after {} iterations", end, iterations);
                return Ok(CellPath {
                    result: PathFindResult::PathFound,
                    positions: self.reverse_path(end),
                    cost,
                });
            }
            let remaining = euclidean(position, end);
            if remaining < closest.1 {
                closest = (position, remaining);
            }

            for offset in movement_pattern {
                let next = offset.apply(position);
                if !boundary.is_inside(next) {
                    continue;
                }
                let cell_cost = grid.cell_cost_for_shape(next, shape);
                if cell_cost.is_infinite() {
                    continue;
                }
                let new_cost = cost + cell_cost * offset.cost();
                match self.parents.entry(next) {
                    Entry::Occupied(mut e) => {
                        if e.get().0 <= new_cost {
                            continue;
                        }
                        e.insert((new_cost, Some(position)));
                    }
                    Entry::Vacant(e) => {
                        e.insert((new_cost, Some(position)));
                    }
                }
                self.open.insert(CellEntry {
                    position: next,
                    cost: new_cost,
                    expected_cost: new_cost + heuristic(next),
                });
                observer.on_node_opened(next);
            }
            observer.on_node_closed(position);
        }

        let (closest, _) = closest;
        warn!(
            "No path from {:?} to {:?} found, returning partial path to {:?}",
            start, end, closest
        );
        Ok(CellPath {
            result: PathFindResult::PartialPathFound,
            positions: self.reverse_path(closest),
            cost: self.parents.get(&closest).map_or(0.0, |&(c, _)| c),
        })
    }

    fn reverse_path(&self, end: GridPosition) -> Vec<GridPosition> {
        let mut path: Vec<GridPosition> = itertools::unfold(Some(end), |current| {
            let position = (*current)?;
            *current = self.parents.get(&position).and_then(|&(_, parent)| parent);
            Some(position)
        })
        .take(self.parents.len())
        .collect();
        path.reverse();
        path
    }
}
