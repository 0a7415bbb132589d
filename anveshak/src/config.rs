//! Configuration loading for Anveshak

use crate::error::{AnveshakError, Result};
use kshetra::{AStarConfig, GoalMode, PolicyKind, RobotMode, SimulationConfig, WorldConfig};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AnveshakConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub robots: RobotSection,
    #[serde(default)]
    pub planner: PlannerSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// Grid and obstacle generation
#[derive(Clone, Debug, Deserialize)]
pub struct WorldSection {
    /// Columns including the border (default: 50)
    #[serde(default = "default_width")]
    pub width: i32,

    /// Rows including the border (default: 33)
    #[serde(default = "default_height")]
    pub height: i32,

    /// Obstacle probability in percent, 1-100 (default: 1)
    #[serde(default = "default_obstacle_probability")]
    pub obstacle_probability: u8,

    /// Base seed; simulation k uses seed + k - 1. Random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Robot team and behaviour
#[derive(Clone, Debug, Deserialize)]
pub struct RobotSection {
    /// Number of robots, 1 or 2 (default: 1)
    #[serde(default = "default_robot_count")]
    pub count: u8,

    /// Claim frontiers when two robots run (default: true)
    #[serde(default = "default_coordinated")]
    pub coordinated: bool,

    /// Exploration policy (default: frontier)
    #[serde(default)]
    pub policy: PolicyKind,

    /// Delay after each step in milliseconds (default: 0)
    #[serde(default)]
    pub step_delay_ms: u64,

    /// Safety cap on steps per robot (default: 100000)
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,
}

/// Route planner settings
#[derive(Clone, Debug, Deserialize)]
pub struct PlannerSection {
    /// Goal handling (default: short_circuit)
    #[serde(default)]
    pub goal_mode: GoalMode,

    /// Expansion cap per search (default: 200000)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

/// Output settings
#[derive(Clone, Debug, Deserialize)]
pub struct OutputSection {
    /// Number of simulations to run (default: 1)
    #[serde(default = "default_runs")]
    pub runs: usize,

    /// Print the final knowledge map of each simulation (default: false)
    #[serde(default)]
    pub show_map: bool,
}

// Default value functions
fn default_width() -> i32 {
    50
}
fn default_height() -> i32 {
    33
}
fn default_obstacle_probability() -> u8 {
    1
}
fn default_robot_count() -> u8 {
    1
}
fn default_coordinated() -> bool {
    true
}
fn default_max_steps() -> u64 {
    100_000
}
fn default_max_iterations() -> usize {
    200_000
}
fn default_runs() -> usize {
    1
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            obstacle_probability: default_obstacle_probability(),
            seed: None,
        }
    }
}

impl Default for RobotSection {
    fn default() -> Self {
        Self {
            count: default_robot_count(),
            coordinated: default_coordinated(),
            policy: PolicyKind::default(),
            step_delay_ms: 0,
            max_steps: default_max_steps(),
        }
    }
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            goal_mode: GoalMode::default(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            show_map: false,
        }
    }
}

impl AnveshakConfig {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnveshakError::Config(format!("Failed to read config file: {}", e)))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: AnveshakConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.world.obstacle_probability) {
            return Err(AnveshakError::Config(format!(
                "obstacle_probability must be 1-100, got {}",
                self.world.obstacle_probability
            )));
        }
        if !(1..=2).contains(&self.robots.count) {
            return Err(AnveshakError::Config(format!(
                "robot count must be 1 or 2, got {}",
                self.robots.count
            )));
        }
        if self.output.runs == 0 {
            return Err(AnveshakError::Config("runs must be at least 1".into()));
        }
        self.simulation(1).validate()?;
        Ok(())
    }

    pub fn mode(&self) -> RobotMode {
        match (self.robots.count, self.robots.coordinated) {
            (1, _) => RobotMode::Single,
            (_, true) => RobotMode::Coordinated,
            (_, false) => RobotMode::Independent,
        }
    }

    /// Simulation setup for the 1-based run number.
    pub fn simulation(&self, run: usize) -> SimulationConfig {
        let mut world = WorldConfig::default()
            .with_size(self.world.width, self.world.height)
            .with_obstacle_probability(self.world.obstacle_probability);
        if let Some(seed) = self.world.seed {
            world = world.with_seed(seed.wrapping_add(run as u64 - 1));
        }

        SimulationConfig::default()
            .with_world(world)
            .with_mode(self.mode())
            .with_policy(self.robots.policy)
            .with_planner(
                AStarConfig::default()
                    .with_goal_mode(self.planner.goal_mode)
                    .with_max_iterations(self.planner.max_iterations),
            )
            .with_max_steps(self.robots.max_steps)
            .with_step_delay(Duration::from_millis(self.robots.step_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AnveshakConfig::parse("").unwrap();
        assert_eq!(config.world.width, 50);
        assert_eq!(config.world.height, 33);
        assert_eq!(config.robots.count, 1);
        assert_eq!(config.output.runs, 1);
        assert_eq!(config.mode(), RobotMode::Single);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_file() {
        let config = AnveshakConfig::parse(
            r#"
            [world]
            obstacle_probability = 5
            seed = 10

            [robots]
            count = 2
            coordinated = false
            policy = "wall_follower"

            [planner]
            goal_mode = "exhaustive"

            [output]
            runs = 3
            "#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode(), RobotMode::Independent);

        let sim = config.simulation(3);
        assert_eq!(sim.world.seed, Some(12));
        assert_eq!(sim.world.obstacle_probability, 5);
        assert_eq!(sim.agent.policy, PolicyKind::WallFollower);
        assert_eq!(sim.agent.planner.goal_mode, GoalMode::Exhaustive);
        assert_eq!(sim.start_poses().len(), 2);
    }

    #[test]
    fn test_validation_bounds() {
        let mut config = AnveshakConfig::default();
        config.world.obstacle_probability = 0;
        assert!(config.validate().is_err());

        let mut config = AnveshakConfig::default();
        config.robots.count = 3;
        assert!(config.validate().is_err());

        let mut config = AnveshakConfig::default();
        config.output.runs = 0;
        assert!(config.validate().is_err());

        let mut config = AnveshakConfig::default();
        config.world.width = 2;
        assert!(matches!(config.validate(), Err(AnveshakError::Simulation(_))));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = AnveshakConfig::parse("[robots]\npolicy = \"spiral\"\n");
        assert!(matches!(result, Err(AnveshakError::Config(_))));
    }
}
