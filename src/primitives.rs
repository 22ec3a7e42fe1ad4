//! Physical quantities used to weigh the graph. Distances are in metres, durations in seconds
//! and velocities in metres per second.
use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Sub};
use num_traits::Zero;

/// Integer cell coordinate on a [Grid](crate::Grid) or [CostGrid](crate::CostGrid).
pub type GridPosition = grid_util::point::Point;

/// A point on the 2D surface in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Position {
        Position { x, y }
    }

    pub fn from_offset(x: Distance, y: Distance) -> Position {
        Position::new(x.meters(), y.meters())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(f64);

impl Distance {
    pub fn from_meters(meters: f64) -> Distance {
        Distance(meters)
    }

    pub fn meters(&self) -> f64 {
        self.0
    }

    /// Euclidean distance between two positions.
    pub fn between(a: Position, b: Position) -> Distance {
        Distance((b.x - a.x).hypot(b.y - a.y))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Duration(f64);

impl Duration {
    pub fn from_seconds(seconds: f64) -> Duration {
        Duration(seconds)
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }

    /// Total order over durations, NaN sorting last.
    pub fn total_cmp(&self, other: &Duration) -> core::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Velocity(f64);

impl Velocity {
    pub fn from_meters_per_second(meters_per_second: f64) -> Velocity {
        Velocity(meters_per_second)
    }

    pub fn from_kilometers_per_hour(kilometers_per_hour: f64) -> Velocity {
        Velocity(kilometers_per_hour / 3.6)
    }

    pub fn meters_per_second(&self) -> f64 {
        self.0
    }

    pub fn kilometers_per_hour(&self) -> f64 {
        self.0 * 3.6
    }

    /// Only strictly positive, finite velocities can be traversed.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

/// Width and height of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: Distance,
    pub height: Distance,
}

impl Size {
    pub fn new(width: Distance, height: Distance) -> Size {
        Size { width, height }
    }

    pub fn from_meters(width: f64, height: f64) -> Size {
        Size::new(Distance::from_meters(width), Distance::from_meters(height))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub columns: usize,
    pub rows: usize,
}

impl GridSize {
    pub fn new(columns: usize, rows: usize) -> GridSize {
        GridSize { columns, rows }
    }
}

impl Add for Distance {
    type Output = Distance;
    fn add(self, rhs: Distance) -> Distance {
        Distance(self.0 + rhs.0)
    }
}

impl AddAssign for Distance {
    fn add_assign(&mut self, rhs: Distance) {
        self.0 += rhs.0;
    }
}

impl Sub for Distance {
    type Output = Distance;
    fn sub(self, rhs: Distance) -> Distance {
        Distance(self.0 - rhs.0)
    }
}

impl Mul<f64> for Distance {
    type Output = Distance;
    fn mul(self, rhs: f64) -> Distance {
        Distance(self.0 * rhs)
    }
}

impl Div<Velocity> for Distance {
    type Output = Duration;
    fn div(self, rhs: Velocity) -> Duration {
        Duration(self.0 / rhs.0)
    }
}

impl Zero for Distance {
    fn zero() -> Distance {
        Distance(0.0)
    }
    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Add for Duration {
    type Output = Duration;
    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs.0;
    }
}

impl Sub for Duration {
    type Output = Duration;
    fn sub(self, rhs: Duration) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl Zero for Duration {
    fn zero() -> Duration {
        Duration(0.0)
    }
    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}m", self.0)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}s", self.0)
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2} m/s", self.0)
    }
}
