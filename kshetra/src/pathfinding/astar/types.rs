//! A* search types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Cell, Heading};

/// A search state in the node arena.
#[derive(Clone, Debug)]
pub(super) struct PathNode {
    pub cell: Cell,
    /// Heading on arrival at `cell`.
    pub heading: Heading,
    /// Arena index of the predecessor, `None` for the start.
    pub parent: Option<usize>,
    pub g: u32,
    pub h: u32,
}

impl PathNode {
    #[inline]
    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    /// Identity of the node in the open and closed sets.
    #[inline]
    pub(super) fn key(&self, mode: GoalMode) -> SearchKey {
        mode.search_key(self.cell, self.heading)
    }
}

/// Open/closed set key. The heading is only part of the state in
/// exhaustive mode.
pub(super) type SearchKey = (Cell, Option<Heading>);

/// When the search considers the target reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalMode {
    /// The target jumps to the front of the open set as soon as it is
    /// enqueued and ends the search on the next expansion. Cells are closed
    /// on first expansion.
    #[default]
    ShortCircuit,
    /// The target is ordered by f like any node and tested on expansion.
    /// Searches (cell, heading) states, so routes are cost-optimal.
    Exhaustive,
}

impl GoalMode {
    /// Short-circuit search holds one node per cell and closes cells as
    /// they are expanded. Exhaustive search closes (cell, heading) states
    /// so that a later arrival with a cheaper heading is still expanded.
    #[inline]
    pub(super) fn search_key(self, cell: Cell, heading: Heading) -> SearchKey {
        match self {
            GoalMode::ShortCircuit => (cell, None),
            GoalMode::Exhaustive => (cell, Some(heading)),
        }
    }
}

/// A* configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AStarConfig {
    pub goal_mode: GoalMode,
    /// Maximum number of node expansions before giving up
    pub max_iterations: usize,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            goal_mode: GoalMode::ShortCircuit,
            max_iterations: 200_000,
        }
    }
}

impl AStarConfig {
    /// Cost-optimal configuration.
    pub fn exhaustive() -> Self {
        Self {
            goal_mode: GoalMode::Exhaustive,
            ..Default::default()
        }
    }

    pub fn with_goal_mode(mut self, mode: GoalMode) -> Self {
        self.goal_mode = mode;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// A planned route.
///
/// Waypoints are stored target first; the next cell to visit is at the end
/// and is consumed with [`Route::next_waypoint`]. The start cell is not part
/// of the route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    waypoints: Vec<Cell>,
    cost: u32,
    nodes_expanded: usize,
}

impl Route {
    pub(super) fn new(waypoints: Vec<Cell>, cost: u32, nodes_expanded: usize) -> Self {
        Self {
            waypoints,
            cost,
            nodes_expanded,
        }
    }

    /// Pop the next cell to move into.
    pub fn next_waypoint(&mut self) -> Option<Cell> {
        self.waypoints.pop()
    }

    pub fn peek(&self) -> Option<Cell> {
        self.waypoints.last().copied()
    }

    /// Final cell of the route.
    pub fn target(&self) -> Option<Cell> {
        self.waypoints.first().copied()
    }

    /// Remaining waypoints in travel order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.waypoints.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Turn-weighted cost from the start pose to the target.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }
}

/// Reason for path failure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PathFailure {
    /// Open set exhausted without reaching the target
    #[error("no path to target")]
    NoPath,
    /// Maximum iterations exceeded
    #[error("search exceeded iteration limit")]
    MaxIterationsExceeded,
}
