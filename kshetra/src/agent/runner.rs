//! Agent step loop: sense, decide, act.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::pacing::{NoPacing, Pacer};
use super::robot::{Robot, RobotHandle, RobotId};
use crate::core::{Cell, Pose, Turn};
use crate::exploration::{Action, Decision, Navigator, NavigatorStats, PolicyKind};
use crate::knowledge::KnowledgeMap;
use crate::pathfinding::AStarConfig;
use crate::sensor::Sensor;
use crate::world::GridWorld;

/// Per-agent behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub policy: PolicyKind,
    /// Claim each selected frontier before planning (coordinated mode).
    pub claim_frontiers: bool,
    pub planner: AStarConfig,
    /// Safety cap on physical steps.
    pub max_steps: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Frontier,
            claim_frontiers: false,
            planner: AStarConfig::default(),
            max_steps: 100_000,
        }
    }
}

impl AgentConfig {
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_claim_frontiers(mut self, claim: bool) -> Self {
        self.claim_frontiers = claim;
        self
    }

    pub fn with_planner(mut self, planner: AStarConfig) -> Self {
        self.planner = planner;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }
}

/// Result of a single [`AgentRunner::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Turned(Turn),
    Moved(Cell),
    Complete,
    StepLimit,
}

impl StepOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, StepOutcome::Complete | StepOutcome::StepLimit)
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// No frontier left.
    Complete,
    /// Hit the step cap first.
    StepLimit,
}

/// Statistics of one finished agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub robot: RobotId,
    pub name: String,
    pub steps: u64,
    pub turns: u64,
    pub moves: u64,
    pub plans: u32,
    pub unreachable_targets: u32,
    pub final_pose: Pose,
    pub outcome: RunOutcome,
}

/// Drives one robot until exploration completes.
pub struct AgentRunner {
    robot: Robot,
    navigator: Navigator,
    world: Arc<GridWorld>,
    map: Arc<KnowledgeMap>,
    pacer: Arc<dyn Pacer>,
    max_steps: u64,
    outcome: Option<RunOutcome>,
}

impl AgentRunner {
    /// Create a runner. The start cell is recorded as open.
    pub fn new(robot: Robot, world: Arc<GridWorld>, map: Arc<KnowledgeMap>, config: &AgentConfig) -> Self {
        map.record_open(robot.position());
        debug!(
            "[{}] Starting at {} with {} policy{}",
            robot.name(),
            robot.pose(),
            config.policy,
            if config.claim_frontiers { ", claiming frontiers" } else { "" }
        );
        Self {
            navigator: Navigator::new(config.policy, config.planner.clone(), config.claim_frontiers),
            robot,
            world,
            map,
            pacer: Arc::new(NoPacing),
            max_steps: config.max_steps,
            outcome: None,
        }
    }

    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn handle(&self) -> RobotHandle {
        self.robot.handle()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Frontier cell this agent is travelling to, if any.
    pub fn current_target(&self) -> Option<Cell> {
        self.navigator.target()
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Sense the three sides, decide, and execute at most one physical step.
    pub fn step(&mut self) -> StepOutcome {
        match self.outcome {
            Some(RunOutcome::Complete) => return StepOutcome::Complete,
            Some(RunOutcome::StepLimit) => return StepOutcome::StepLimit,
            None => {}
        }

        if self.robot.steps() >= self.max_steps {
            warn!(
                "[{}] Step limit of {} reached before exploration completed",
                self.robot.name(),
                self.max_steps
            );
            self.finish(RunOutcome::StepLimit);
            return StepOutcome::StepLimit;
        }

        let pose = self.robot.pose();
        let readings = Sensor::new(&self.world, &self.map).scan(pose);

        match self.navigator.decide(pose, &readings, &self.map) {
            Decision::Complete => {
                self.finish(RunOutcome::Complete);
                StepOutcome::Complete
            }
            Decision::Act(Action::Turn(turn)) => {
                self.robot.turn(turn);
                StepOutcome::Turned(turn)
            }
            Decision::Act(Action::Forward) => {
                debug_assert!(!self.world.is_obstacle(pose.front()));
                self.robot.move_forward();
                StepOutcome::Moved(self.robot.position())
            }
        }
    }

    /// Step until finished, pausing between steps.
    pub fn run(mut self) -> RunSummary {
        while !self.step().is_finished() {
            self.pacer.pause();
        }
        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        let NavigatorStats {
            plans,
            unreachable_targets,
            ..
        } = self.navigator.stats();
        RunSummary {
            robot: self.robot.id(),
            name: self.robot.name().to_string(),
            steps: self.robot.steps(),
            turns: self.robot.turns(),
            moves: self.robot.moves(),
            plans,
            unreachable_targets,
            final_pose: self.robot.pose(),
            outcome: self.outcome.unwrap_or(RunOutcome::StepLimit),
        }
    }

    fn finish(&mut self, outcome: RunOutcome) {
        self.outcome = Some(outcome);
        self.robot.mark_finished();
        info!(
            "[{}] Finished ({:?}) after {} steps at {}",
            self.robot.name(),
            outcome,
            self.robot.steps(),
            self.robot.pose()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Heading;

    fn runner(world: GridWorld, config: AgentConfig) -> AgentRunner {
        let robot = Robot::new(RobotId(1), "Robot 1", Pose::new(Cell::new(1, 1), Heading::South));
        AgentRunner::new(robot, Arc::new(world), Arc::new(KnowledgeMap::new()), &config)
    }

    #[test]
    fn test_start_cell_recorded_open() {
        let runner = runner(GridWorld::empty(4, 4).unwrap(), AgentConfig::default());
        assert!(runner.map.is_open(Cell::new(1, 1)));
        assert!(!runner.is_finished());
    }

    #[test]
    fn test_step_limit() {
        let config = AgentConfig::default().with_max_steps(3);
        let summary = runner(GridWorld::empty(10, 10).unwrap(), config).run();
        assert_eq!(summary.outcome, RunOutcome::StepLimit);
        assert_eq!(summary.steps, 3);
    }

    #[test]
    fn test_corridor_completes() {
        let world = GridWorld::from_ascii(
            "
            ###
            #.#
            #.#
            #.#
            ###
            ",
        )
        .unwrap();
        let summary = runner(world, AgentConfig::default()).run();
        assert_eq!(summary.outcome, RunOutcome::Complete);
        assert_eq!(summary.moves, 2);
        assert_eq!(summary.final_pose.cell, Cell::new(1, 3));
        assert_eq!(summary.steps, summary.turns + summary.moves);
    }

    #[test]
    fn test_finished_runner_stays_finished() {
        let world = GridWorld::from_ascii("###\n#.#\n###").unwrap();
        let mut runner = runner(world, AgentConfig::default());
        assert_eq!(runner.step(), StepOutcome::Complete);
        assert_eq!(runner.step(), StepOutcome::Complete);
        assert!(runner.handle().is_finished());
        assert_eq!(runner.summary().steps, 0);
    }
}
