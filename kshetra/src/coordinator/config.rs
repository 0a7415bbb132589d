//! Simulation configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::agent::AgentConfig;
use crate::core::{Cell, Heading, Pose};
use crate::error::{Error, Result};
use crate::exploration::PolicyKind;
use crate::pathfinding::AStarConfig;
use crate::world::WorldConfig;

/// How many robots run and whether they claim frontiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotMode {
    #[default]
    Single,
    /// Two robots sharing the map without claiming targets.
    Independent,
    /// Two robots claiming each selected frontier.
    Coordinated,
}

impl RobotMode {
    pub fn robot_count(self) -> usize {
        match self {
            RobotMode::Single => 1,
            RobotMode::Independent | RobotMode::Coordinated => 2,
        }
    }

    pub fn claims_frontiers(self) -> bool {
        matches!(self, RobotMode::Coordinated)
    }
}

impl fmt::Display for RobotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RobotMode::Single => "single",
            RobotMode::Independent => "independent",
            RobotMode::Coordinated => "coordinated",
        };
        f.write_str(name)
    }
}

/// Full simulation setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub mode: RobotMode,
    pub agent: AgentConfig,
    /// Delay after every step, zero to run flat out.
    pub step_delay: Duration,
    /// Start poses; the default corners are used when empty.
    pub starts: Vec<Pose>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            mode: RobotMode::Single,
            agent: AgentConfig::default(),
            step_delay: Duration::ZERO,
            starts: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn with_world(mut self, world: WorldConfig) -> Self {
        self.world = world;
        self
    }

    pub fn with_mode(mut self, mode: RobotMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.agent.policy = policy;
        self
    }

    pub fn with_planner(mut self, planner: AStarConfig) -> Self {
        self.agent.planner = planner;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.agent.max_steps = max_steps;
        self
    }

    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn with_starts(mut self, starts: Vec<Pose>) -> Self {
        self.starts = starts;
        self
    }

    /// Robot 1 in the top-left interior corner, robot 2 in the bottom-right,
    /// both facing South.
    pub fn default_starts(width: i32, height: i32) -> [Pose; 2] {
        [
            Pose::new(Cell::new(1, 1), Heading::South),
            Pose::new(Cell::new(width - 2, height - 2), Heading::South),
        ]
    }

    /// Start poses for the configured robot count.
    pub fn start_poses(&self) -> Vec<Pose> {
        self.start_poses_for(self.world.width, self.world.height)
    }

    /// Start poses on a grid of the given size.
    pub fn start_poses_for(&self, width: i32, height: i32) -> Vec<Pose> {
        let count = self.mode.robot_count();
        if self.starts.is_empty() {
            Self::default_starts(width, height)[..count].to_vec()
        } else {
            self.starts.iter().take(count).copied().collect()
        }
    }

    /// Agent configuration with the claiming flag set by the mode.
    pub fn agent_config(&self) -> AgentConfig {
        self.agent
            .clone()
            .with_claim_frontiers(self.mode.claims_frontiers())
    }

    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;

        let count = self.mode.robot_count();
        if !self.starts.is_empty() && self.starts.len() < count {
            return Err(Error::InvalidConfig(format!(
                "{} mode needs {count} start poses, got {}",
                self.mode,
                self.starts.len()
            )));
        }
        let starts = self.start_poses();
        check_distinct_starts(&starts)?;
        for pose in starts {
            let Cell { x, y } = pose.cell;
            if x < 1 || y < 1 || x > self.world.width - 2 || y > self.world.height - 2 {
                return Err(Error::InvalidConfig(format!(
                    "start {} is outside the grid interior",
                    pose.cell
                )));
            }
        }
        if self.agent.max_steps == 0 {
            return Err(Error::InvalidConfig("max_steps must be positive".into()));
        }
        Ok(())
    }
}

/// Robots may not share a start cell.
pub(super) fn check_distinct_starts(starts: &[Pose]) -> Result<()> {
    for (i, pose) in starts.iter().enumerate() {
        if starts[..i].iter().any(|other| other.cell == pose.cell) {
            return Err(Error::InvalidConfig(format!(
                "two robots cannot start at {}",
                pose.cell
            )));
        }
    }
    Ok(())
}
