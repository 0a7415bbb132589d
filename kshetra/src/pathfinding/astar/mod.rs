//! Turn-aware A* search.
//!
//! Implements A* on the knowledge map with:
//! - Expansion restricted to `Open` cells, the target always admissible
//! - Orientation-dependent move costs
//! - Short-circuit or exhaustive goal handling

mod planner;
mod types;

pub use planner::AStarPlanner;
pub use types::{AStarConfig, GoalMode, PathFailure, Route};

use crate::core::{Cell, Pose};
use crate::knowledge::KnowledgeMap;

/// Plan with default configuration, marking the target on failure.
pub fn plan_route(map: &KnowledgeMap, start: Pose, target: Cell) -> Result<Route, PathFailure> {
    AStarPlanner::with_defaults(map).plan(start, target)
}
