//! Exploration policies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Cell, Side};
use crate::sensor::Readings;

/// Local move selection, consulted when no route is queued.
pub trait ExplorationPolicy: Send + fmt::Debug {
    fn kind(&self) -> PolicyKind;

    /// Adjacent cell to move into without planning, if any.
    fn local_move(&self, readings: &Readings) -> Option<Cell>;
}

/// Always plans to the nearest frontier.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrontierPolicy;

impl ExplorationPolicy for FrontierPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Frontier
    }

    fn local_move(&self, _readings: &Readings) -> Option<Cell> {
        None
    }
}

/// Takes fresh openings, checked left, front, right, before planning.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallFollowerPolicy;

impl WallFollowerPolicy {
    const PREFERENCE: [Side; 3] = [Side::Left, Side::Front, Side::Right];
}

impl ExplorationPolicy for WallFollowerPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::WallFollower
    }

    fn local_move(&self, readings: &Readings) -> Option<Cell> {
        Self::PREFERENCE
            .iter()
            .map(|side| readings.get(*side))
            .find(|reading| reading.is_fresh_opening())
            .map(|reading| reading.cell)
    }
}

/// Policy selector, fixed for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Frontier,
    WallFollower,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn ExplorationPolicy> {
        match self {
            PolicyKind::Frontier => Box::new(FrontierPolicy),
            PolicyKind::WallFollower => Box::new(WallFollowerPolicy),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Frontier => "frontier",
            PolicyKind::WallFollower => "wall-follower",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
