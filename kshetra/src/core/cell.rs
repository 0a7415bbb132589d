//! Integer grid coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::heading::Heading;

/// A grid cell coordinate.
///
/// Screen convention: x grows East, y grows South.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another cell.
    #[inline]
    pub fn manhattan_distance(&self, other: &Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The adjacent cell one step along `heading`.
    #[inline]
    pub fn step(self, heading: Heading) -> Cell {
        let (dx, dy) = heading.offset();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours, in heading order (N, E, S, W).
    pub fn neighbors_4(self) -> [Cell; 4] {
        Heading::ALL.map(|h| self.step(h))
    }

    /// Heading that leads from this cell to an orthogonally adjacent one.
    ///
    /// Returns `None` when `other` is not a 4-neighbour.
    pub fn heading_to(&self, other: &Cell) -> Option<Heading> {
        Heading::ALL.into_iter().find(|h| self.step(*h) == *other)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell::new(x, y)
    }
}
