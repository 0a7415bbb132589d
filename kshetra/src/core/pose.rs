//! Robot pose on the grid.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Cell, Heading, Side};

/// Cell plus heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pose {
    pub cell: Cell,
    pub heading: Heading,
}

impl Pose {
    pub const fn new(cell: Cell, heading: Heading) -> Self {
        Self { cell, heading }
    }

    /// The adjacent cell on the given robot-relative side.
    #[inline]
    pub fn adjacent(&self, side: Side) -> Cell {
        self.cell.step(self.heading.toward(side))
    }

    /// Cell directly ahead.
    #[inline]
    pub fn front(&self) -> Cell {
        self.adjacent(Side::Front)
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {}", self.cell, self.heading)
    }
}
