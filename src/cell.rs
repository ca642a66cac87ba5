//! Grid coordinates and orthogonal directions.

use serde::{Deserialize, Serialize};

/// A tile coordinate on the ground grid.
///
/// Both axes fit in a byte, so the grid is at most 255 x 255 tiles.
/// Cells order by `x` first, then `y`, which is the order the tracker scans in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl Cell {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction`, or `None` past the coordinate range.
    pub fn step(self, direction: Direction) -> Option<Cell> {
        let (dx, dy) = direction.offset();
        let x = u8::try_from(self.x as i16 + dx as i16).ok()?;
        let y = u8::try_from(self.y as i16 + dy as i16).ok()?;
        Some(Cell { x, y })
    }

    /// Signed coordinates of the neighbour in `direction`; may lie outside the grid.
    pub fn offset_signed(self, direction: Direction) -> (i32, i32) {
        let (dx, dy) = direction.offset();
        (self.x as i32 + dx, self.y as i32 + dy)
    }

    /// Sum of absolute coordinate differences.
    pub fn manhattan(self, other: Cell) -> u16 {
        self.x.abs_diff(other.x) as u16 + self.y.abs_diff(other.y) as u16
    }

    /// Squared straight-line distance. Orders pairs the same way as the true
    /// Euclidean distance while staying integral.
    pub fn squared_distance(self, other: Cell) -> u32 {
        let dx = self.x.abs_diff(other.x) as u32;
        let dy = self.y.abs_diff(other.y) as u32;
        dx * dx + dy * dy
    }

    pub fn as_usize(self) -> (usize, usize) {
        (self.x as usize, self.y as usize)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four orthogonal directions. `Up` is towards `y = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Offset (dx, dy) for this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}
