//! Movement offsets, agent shapes and the boundary an agent's centre must stay within.
use crate::error::{PathfindingError, Result};
use crate::primitives::GridPosition;
use itertools::{Itertools, MinMaxResult};

/// Displacement between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const fn new(x: i32, y: i32) -> Offset {
        Offset { x, y }
    }

    /// The offset leading from `a` to `b`.
    pub fn between(a: GridPosition, b: GridPosition) -> Offset {
        Offset::new(b.x - a.x, b.y - a.y)
    }

    /// Length of the step, 1 for lateral and √2 for diagonal moves.
    pub fn cost(&self) -> f64 {
        (self.x as f64).hypot(self.y as f64)
    }

    pub fn is_diagonal(&self) -> bool {
        self.x != 0 && self.y != 0
    }

    pub fn apply(&self, position: GridPosition) -> GridPosition {
        GridPosition::new(position.x + self.x, position.y + self.y)
    }
}

pub mod movement_patterns {
    use super::Offset;

    pub const FULL: [Offset; 8] = [
        Offset::new(-1, -1),
        Offset::new(0, -1),
        Offset::new(1, -1),
        Offset::new(-1, 0),
        Offset::new(1, 0),
        Offset::new(-1, 1),
        Offset::new(0, 1),
        Offset::new(1, 1),
    ];

    pub const LATERAL_ONLY: [Offset; 4] = [
        Offset::new(0, -1),
        Offset::new(-1, 0),
        Offset::new(1, 0),
        Offset::new(0, 1),
    ];

    pub const DIAGONAL_ONLY: [Offset; 4] = [
        Offset::new(-1, -1),
        Offset::new(1, -1),
        Offset::new(-1, 1),
        Offset::new(1, 1),
    ];
}

/// Whether `movement_pattern` allows stepping from `a` to `b` in one move.
pub fn is_permitted(movement_pattern: &[Offset], a: GridPosition, b: GridPosition) -> bool {
    movement_pattern.contains(&Offset::between(a, b))
}

/// Cells covered by an agent, relative to its centre at (0, 0). Agents do not rotate, so
/// shapes are best kept symmetrical.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentShape {
    cells: Vec<Offset>,
    top_left: Offset,
    bottom_right: Offset,
}

fn bounds(values: impl Iterator<Item = i32>) -> (i32, i32) {
    match values.minmax() {
        MinMaxResult::NoElements => (0, 0),
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(min, max) => (min, max),
    }
}

impl AgentShape {
    pub fn new(cells: Vec<Offset>) -> Result<AgentShape> {
        if cells.is_empty() {
            return Err(PathfindingError::invalid(
                "agent shape",
                "empty",
                "at least one cell",
            ));
        }
        let (min_x, max_x) = bounds(cells.iter().map(|c| c.x));
        let (min_y, max_y) = bounds(cells.iter().map(|c| c.y));
        Ok(AgentShape {
            cells,
            top_left: Offset::new(min_x, min_y),
            bottom_right: Offset::new(max_x, max_y),
        })
    }

    /// A single cell.
    pub fn dot() -> AgentShape {
        AgentShape {
            cells: vec![Offset::new(0, 0)],
            top_left: Offset::new(0, 0),
            bottom_right: Offset::new(0, 0),
        }
    }

    /// A plus sign, the centre and its four lateral neighbours.
    pub fn circle_r1() -> AgentShape {
        AgentShape {
            cells: vec![
                Offset::new(0, -1),
                Offset::new(-1, 0),
                Offset::new(0, 0),
                Offset::new(1, 0),
                Offset::new(0, 1),
            ],
            top_left: Offset::new(-1, -1),
            bottom_right: Offset::new(1, 1),
        }
    }

    /// A 3x3 block around the centre.
    pub fn square_w3() -> AgentShape {
        let cells = (-1..=1)
            .cartesian_product(-1..=1)
            .map(|(y, x)| Offset::new(x, y))
            .collect();
        AgentShape {
            cells,
            top_left: Offset::new(-1, -1),
            bottom_right: Offset::new(1, 1),
        }
    }

    pub fn cells(&self) -> &[Offset] {
        &self.cells
    }

    pub fn top_left(&self) -> Offset {
        self.top_left
    }

    pub fn bottom_right(&self) -> Offset {
        self.bottom_right
    }

    /// The cells covered when the agent is centred on `center`.
    pub fn occupied(&self, center: GridPosition) -> impl Iterator<Item = GridPosition> + '_ {
        self.cells.iter().map(move |c| c.apply(center))
    }

    /// Positions the centre of this shape may take on a `columns` x `rows` grid.
    pub fn boundary(&self, columns: usize, rows: usize) -> Boundary {
        Boundary {
            x1: -self.top_left.x,
            y1: -self.top_left.y,
            x2: columns as i32 - self.bottom_right.x - 1,
            y2: rows as i32 - self.bottom_right.y - 1,
        }
    }
}

/// Inclusive rectangle of cells. Empty when `x1 > x2` or `y1 > y2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Boundary {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Boundary {
    pub fn is_inside(&self, p: GridPosition) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_costs() {
        assert_eq!(Offset::new(1, 0).cost(), 1.0);
        assert_eq!(Offset::new(0, -1).cost(), 1.0);
        assert!((Offset::new(-1, 1).cost() - 2f64.sqrt()).abs() < 1e-12);
        assert!(Offset::new(1, 1).is_diagonal());
        assert!(!Offset::new(1, 0).is_diagonal());
    }

    #[test]
    fn patterns_have_expected_moves() {
        assert!(movement_patterns::LATERAL_ONLY.iter().all(|o| !o.is_diagonal()));
        assert!(movement_patterns::DIAGONAL_ONLY.iter().all(|o| o.is_diagonal()));
        assert_eq!(
            movement_patterns::FULL.iter().filter(|o| o.is_diagonal()).count(),
            4
        );
        let a = GridPosition::new(3, 3);
        assert!(is_permitted(
            &movement_patterns::FULL,
            a,
            GridPosition::new(4, 4)
        ));
        assert!(!is_permitted(
            &movement_patterns::LATERAL_ONLY,
            a,
            GridPosition::new(4, 4)
        ));
        assert!(!is_permitted(&movement_patterns::FULL, a, a));
    }

    #[test]
    fn shape_bounds() {
        let shape = AgentShape::new(vec![Offset::new(0, 0), Offset::new(2, -1)]).unwrap();
        assert_eq!(shape.top_left(), Offset::new(0, -1));
        assert_eq!(shape.bottom_right(), Offset::new(2, 0));
        assert!(AgentShape::new(Vec::new()).is_err());

        assert_eq!(AgentShape::square_w3().cells().len(), 9);
        assert_eq!(
            AgentShape::new(AgentShape::circle_r1().cells().to_vec()).unwrap(),
            AgentShape::circle_r1()
        );
    }

    #[test]
    fn boundary_keeps_shape_on_grid() {
        let boundary = AgentShape::square_w3().boundary(5, 4);
        assert_eq!(
            boundary,
            Boundary {
                x1: 1,
                y1: 1,
                x2: 3,
                y2: 2
            }
        );
        assert!(boundary.is_inside(GridPosition::new(1, 1)));
        assert!(boundary.is_inside(GridPosition::new(3, 2)));
        assert!(!boundary.is_inside(GridPosition::new(0, 1)));
        assert!(!boundary.is_inside(GridPosition::new(3, 3)));

        let dot = AgentShape::dot().boundary(5, 4);
        assert!(dot.is_inside(GridPosition::new(0, 0)));
        assert!(dot.is_inside(GridPosition::new(4, 3)));
    }
}
