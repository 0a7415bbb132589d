//! Robot state and read-only handles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use super::shared::Telemetry;
use crate::core::{Cell, Heading, Pose, Turn};

/// 1-based robot number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RobotId(pub u8);

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Robot {}", self.0)
    }
}

/// A robot's pose and step counters.
///
/// Mutated only by its own runner. Other threads observe it through a
/// [`RobotHandle`].
#[derive(Debug)]
pub struct Robot {
    id: RobotId,
    name: Arc<str>,
    pose: Pose,
    steps: u64,
    turns: u64,
    moves: u64,
    telemetry: Arc<Telemetry>,
}

impl Robot {
    pub fn new(id: RobotId, name: impl Into<Arc<str>>, start: Pose) -> Self {
        Self {
            id,
            name: name.into(),
            pose: start,
            steps: 0,
            turns: 0,
            moves: 0,
            telemetry: Arc::new(Telemetry::new(start)),
        }
    }

    pub fn id(&self) -> RobotId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn position(&self) -> Cell {
        self.pose.cell
    }

    pub fn heading(&self) -> Heading {
        self.pose.heading
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn turn(&mut self, turn: Turn) {
        self.pose.heading = self.pose.heading.turned(turn);
        self.turns += 1;
        self.complete_step();
    }

    pub fn move_forward(&mut self) {
        self.pose.cell = self.pose.front();
        self.moves += 1;
        self.complete_step();
    }

    fn complete_step(&mut self) {
        self.steps += 1;
        self.telemetry.publish(self.pose, self.steps);
    }

    pub(super) fn mark_finished(&self) {
        self.telemetry.finished.store(true, Ordering::Release);
    }

    /// Read-only view for other threads.
    pub fn handle(&self) -> RobotHandle {
        RobotHandle {
            id: self.id,
            name: Arc::clone(&self.name),
            telemetry: Arc::clone(&self.telemetry),
        }
    }
}

/// Cloneable, thread-safe observer of a running robot.
#[derive(Clone, Debug)]
pub struct RobotHandle {
    id: RobotId,
    name: Arc<str>,
    telemetry: Arc<Telemetry>,
}

impl RobotHandle {
    pub fn id(&self) -> RobotId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pose(&self) -> Pose {
        self.telemetry.pose.load(Ordering::Acquire)
    }

    pub fn position(&self) -> Cell {
        self.pose().cell
    }

    pub fn heading(&self) -> Heading {
        self.pose().heading
    }

    pub fn steps(&self) -> u64 {
        self.telemetry.steps.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.telemetry.finished.load(Ordering::Acquire)
    }
}
