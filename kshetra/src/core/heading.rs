//! Cardinal headings and the rotation table.
//!
//! All per-heading logic indexes into [`Heading::ALL`] and its offset table
//! instead of branching on the four directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid offsets indexed by [`Heading::index`] (screen convention, North is y - 1).
const OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// A robot's facing direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    North,
    East,
    South,
    West,
}

/// A 90° rotation in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
}

/// A sensing direction relative to the robot's heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Left,
    Right,
}

impl Side {
    /// All sensed sides, in sensing order.
    pub const ALL: [Side; 3] = [Side::Front, Side::Left, Side::Right];
}

impl Heading {
    /// Clockwise rotation order.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Heading {
        Self::ALL[index % 4]
    }

    /// Grid offset `(dx, dy)` of one step along this heading.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        OFFSETS[self.index()]
    }

    #[inline]
    pub const fn turn_right(self) -> Heading {
        Self::from_index(self.index() + 1)
    }

    #[inline]
    pub const fn turn_left(self) -> Heading {
        Self::from_index(self.index() + 3)
    }

    #[inline]
    pub const fn reverse(self) -> Heading {
        Self::from_index(self.index() + 2)
    }

    pub const fn turned(self, turn: Turn) -> Heading {
        match turn {
            Turn::Left => self.turn_left(),
            Turn::Right => self.turn_right(),
        }
    }

    /// Absolute heading of a robot-relative side.
    pub const fn toward(self, side: Side) -> Heading {
        match side {
            Side::Front => self,
            Side::Left => self.turn_left(),
            Side::Right => self.turn_right(),
        }
    }

    /// Number of 90° turns (0, 1 or 2) needed to face `other`.
    #[inline]
    pub const fn quarter_turns_to(self, other: Heading) -> u32 {
        match (other.index() + 4 - self.index()) % 4 {
            0 => 0,
            2 => 2,
            _ => 1,
        }
    }

    /// Cost of one move along `next` after arriving with this heading:
    /// 1 straight, 2 after one turn, 3 for a reversal.
    #[inline]
    pub const fn move_cost(self, next: Heading) -> u32 {
        1 + self.quarter_turns_to(next)
    }

    /// The single turn that brings this heading closer to `desired`.
    ///
    /// Reversals turn left. Returns `None` when already facing `desired`.
    pub fn turn_toward(self, desired: Heading) -> Option<Turn> {
        if desired == self {
            None
        } else if desired == self.turn_right() {
            Some(Turn::Right)
        } else {
            Some(Turn::Left)
        }
    }

    /// Glyph used in text dumps of the map.
    pub const fn as_char(self) -> char {
        match self {
            Heading::North => '^',
            Heading::East => '>',
            Heading::South => 'v',
            Heading::West => '<',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::North => "North",
            Heading::East => "East",
            Heading::South => "South",
            Heading::West => "West",
        };
        f.write_str(name)
    }
}
