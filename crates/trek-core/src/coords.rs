//! Grid coordinate types and Moore-neighborhood iteration.
//! All cell addressing uses signed integers so neighbor arithmetic can
//! step off the grid before the bounds check rejects it.

use serde::{Deserialize, Serialize};

/// A single grid cell, addressed by (column, row).
/// Two cells with equal coordinates are the same cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The 8 surrounding cells (Moore neighborhood), in row-major offset
    /// order. The cell itself is not included. Off-grid coordinates are
    /// yielded here; callers reject them with their own bounds check.
    pub fn moore(self) -> impl Iterator<Item = Cell> {
        MOORE_OFFSETS
            .iter()
            .map(move |&(dx, dy)| Cell::new(self.x + dx, self.y + dy))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Offsets of the Moore neighborhood, (0,0) excluded.
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];
