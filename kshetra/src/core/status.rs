//! Per-cell knowledge states and their transition rules.

use serde::{Deserialize, Serialize};

/// Why a cell is recorded as an obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleSource {
    /// Sensed against the ground truth. Permanent.
    Sensed,
    /// Selected as a target by an agent in coordinated mode.
    Claimed,
    /// The planner found no route to it.
    Unreachable,
}

/// What the shared map knows about a cell.
///
/// Absence from the map means "not yet discovered".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    /// Discovered as a neighbour of an open cell, content unknown.
    Unexplored,
    /// Sensed and passable.
    Open,
    /// Impassable for planning.
    Obstacle(ObstacleSource),
}

impl CellStatus {
    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, CellStatus::Open)
    }

    #[inline]
    pub fn is_unexplored(self) -> bool {
        matches!(self, CellStatus::Unexplored)
    }

    #[inline]
    pub fn is_obstacle(self) -> bool {
        matches!(self, CellStatus::Obstacle(_))
    }

    /// Sensed obstacle. Never changes once recorded.
    #[inline]
    pub fn is_sensed_obstacle(self) -> bool {
        matches!(self, CellStatus::Obstacle(ObstacleSource::Sensed))
    }

    /// Anything other than `Unexplored`.
    #[inline]
    pub fn is_characterized(self) -> bool {
        !self.is_unexplored()
    }

    /// Resolves a write of `incoming` over the current status.
    ///
    /// Sensed values overwrite provisional marks (claims and unreachable
    /// targets) since they are ground truth. Provisional marks only ever
    /// replace `Unexplored` or other provisional marks. A sensed obstacle is
    /// final.
    pub fn merge(self, incoming: CellStatus) -> CellStatus {
        use CellStatus::*;
        use ObstacleSource::*;

        match (self, incoming) {
            (Obstacle(Sensed), _) => self,
            (_, Unexplored) => self,
            (_, Open) | (_, Obstacle(Sensed)) => incoming,
            (Unexplored, Obstacle(Claimed)) => incoming,
            (Unexplored | Obstacle(Claimed), Obstacle(Unreachable)) => incoming,
            _ => self,
        }
    }

    /// Glyph used in text dumps of the map.
    pub const fn as_char(self) -> char {
        match self {
            CellStatus::Unexplored => '?',
            CellStatus::Open => '.',
            CellStatus::Obstacle(ObstacleSource::Sensed) => '#',
            CellStatus::Obstacle(ObstacleSource::Claimed) => '*',
            CellStatus::Obstacle(ObstacleSource::Unreachable) => 'x',
        }
    }
}
