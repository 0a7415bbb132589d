//! Proximity sensor model.
//!
//! A robot senses the three cells adjacent to its heading (front, left,
//! right) against the ground-truth world and records what it finds in the
//! shared knowledge map. Sensing an open cell also discovers its four
//! neighbours as frontier cells.

use crate::core::{Cell, Pose, Side};
use crate::knowledge::KnowledgeMap;
use crate::world::GridWorld;

/// One sensed side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    pub side: Side,
    pub cell: Cell,
    pub blocked: bool,
    /// Whether the cell was already characterized before this scan.
    pub previously_sensed: bool,
}

impl Reading {
    /// Open and seen for the first time in this scan.
    #[inline]
    pub fn is_fresh_opening(&self) -> bool {
        !self.blocked && !self.previously_sensed
    }
}

/// Readings for all three sides from a single pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Readings {
    pub front: Reading,
    pub left: Reading,
    pub right: Reading,
}

impl Readings {
    pub fn get(&self, side: Side) -> &Reading {
        match side {
            Side::Front => &self.front,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Sensor bound to a world and a knowledge map.
pub struct Sensor<'a> {
    world: &'a GridWorld,
    map: &'a KnowledgeMap,
}

impl<'a> Sensor<'a> {
    pub fn new(world: &'a GridWorld, map: &'a KnowledgeMap) -> Self {
        Self { world, map }
    }

    /// Sense one side and record the result. Returns true if blocked.
    pub fn sense(&self, pose: Pose, side: Side) -> bool {
        let cell = pose.adjacent(side);
        if self.world.is_obstacle(cell) {
            self.map.record_obstacle(cell);
            return true;
        }

        self.map.record_open(cell);
        for neighbor in cell.neighbors_4() {
            self.map.insert_frontier(neighbor);
        }
        false
    }

    /// True if the side's cell already holds a non-`Unexplored` status.
    pub fn already_sensed(&self, pose: Pose, side: Side) -> bool {
        self.map.is_characterized(pose.adjacent(side))
    }

    /// Check prior knowledge for all three sides, then sense them.
    pub fn scan(&self, pose: Pose) -> Readings {
        let previously = Side::ALL.map(|side| self.already_sensed(pose, side));
        let [front, left, right] = [0, 1, 2].map(|i| {
            let side = Side::ALL[i];
            Reading {
                side,
                cell: pose.adjacent(side),
                blocked: self.sense(pose, side),
                previously_sensed: previously[i],
            }
        });
        Readings { front, left, right }
    }
}
