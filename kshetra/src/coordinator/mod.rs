//! Simulation orchestration.
//!
//! The [`Coordinator`] builds the world, the shared knowledge map and one
//! runner per robot. [`Coordinator::start`] moves each runner onto its own
//! named OS thread; the returned [`SimulationHandle`] exposes live robot
//! poses, the knowledge map and a channel of [`RunComplete`] events, and
//! joins everything into a [`SimulationReport`].
//!
//! ```rust,ignore
//! let config = SimulationConfig::default().with_mode(RobotMode::Coordinated);
//! let report = Coordinator::new(config)?.run()?;
//! println!("coverage {:.1}%", report.coverage() * 100.0);
//! ```

mod config;
mod report;

pub use config::{RobotMode, SimulationConfig};
pub use report::{RunComplete, SimulationReport};

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::agent::{AgentRunner, Robot, RobotHandle, RobotId, RunSummary, pacer_for};
use crate::core::{Cell, Pose};
use crate::error::{Error, Result};
use crate::knowledge::KnowledgeMap;
use crate::world::GridWorld;

/// Owns a prepared simulation before its agents are started.
pub struct Coordinator {
    world: Arc<GridWorld>,
    map: Arc<KnowledgeMap>,
    starts: Vec<Pose>,
    runners: Vec<AgentRunner>,
}

impl Coordinator {
    /// Generate a world from the configuration and prepare the runners.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let starts = config.start_poses();
        let keep_clear: Vec<Cell> = starts.iter().map(|p| p.cell).collect();
        let world = GridWorld::generate(&config.world, &keep_clear)?;
        Self::with_world(config, world)
    }

    /// Prepare runners against an existing world.
    ///
    /// Default start poses are placed relative to this world's size.
    pub fn with_world(config: SimulationConfig, world: GridWorld) -> Result<Self> {
        let starts = config.start_poses_for(world.width(), world.height());
        config::check_distinct_starts(&starts)?;
        if starts.len() < config.mode.robot_count() {
            return Err(Error::InvalidConfig(format!(
                "{} mode needs {} start poses, got {}",
                config.mode,
                config.mode.robot_count(),
                starts.len()
            )));
        }
        for pose in &starts {
            if world.is_obstacle(pose.cell) {
                return Err(Error::InvalidConfig(format!(
                    "start {} is blocked or outside the grid",
                    pose.cell
                )));
            }
        }

        let world = Arc::new(world);
        let map = Arc::new(KnowledgeMap::new());
        let agent = config.agent_config();
        let pacer = pacer_for(config.step_delay);

        let runners = starts
            .iter()
            .enumerate()
            .map(|(i, pose)| {
                let id = RobotId(i as u8 + 1);
                let robot = Robot::new(id, id.to_string(), *pose);
                AgentRunner::new(robot, Arc::clone(&world), Arc::clone(&map), &agent)
                    .with_pacer(Arc::clone(&pacer))
            })
            .collect();

        info!(
            "[Coordinator] {} mode, {} policy, {}x{} grid",
            config.mode,
            agent.policy,
            world.width(),
            world.height()
        );

        Ok(Self {
            world,
            map,
            starts,
            runners,
        })
    }

    pub fn world(&self) -> &Arc<GridWorld> {
        &self.world
    }

    pub fn map(&self) -> &Arc<KnowledgeMap> {
        &self.map
    }

    pub fn robots(&self) -> Vec<RobotHandle> {
        self.runners.iter().map(AgentRunner::handle).collect()
    }

    /// Hand out the runners for stepping them manually.
    pub fn into_runners(self) -> Vec<AgentRunner> {
        self.runners
    }

    /// Spawn one thread per robot.
    ///
    /// If a spawn fails, the agents already started are joined before the
    /// error is returned, so no thread outlives the failed start.
    pub fn start(self) -> Result<SimulationHandle> {
        self.start_with(spawn_agent)
    }

    fn start_with<F>(self, mut spawn: F) -> Result<SimulationHandle>
    where
        F: FnMut(AgentRunner, Sender<RunComplete>) -> Result<JoinHandle<RunSummary>>,
    {
        let (tx, rx) = unbounded();
        let robots = self.robots();
        let mut workers: Vec<(RobotHandle, JoinHandle<RunSummary>)> =
            Vec::with_capacity(self.runners.len());

        for runner in self.runners {
            let handle = runner.handle();
            match spawn(runner, tx.clone()) {
                Ok(worker) => workers.push((handle, worker)),
                Err(err) => {
                    warn!(
                        "[Coordinator] Failed to start {}: {err}, joining {} running agent(s)",
                        handle.name(),
                        workers.len()
                    );
                    for (robot, worker) in workers {
                        if worker.join().is_err() {
                            warn!("[Coordinator] {} panicked", robot.name());
                        }
                    }
                    return Err(err);
                }
            }
        }

        Ok(SimulationHandle {
            world: self.world,
            map: self.map,
            starts: self.starts,
            robots,
            workers,
            completions: rx,
        })
    }

    /// Start and wait for every agent.
    pub fn run(self) -> Result<SimulationReport> {
        self.start()?.join()
    }
}

fn spawn_agent(runner: AgentRunner, events: Sender<RunComplete>) -> Result<JoinHandle<RunSummary>> {
    let name = runner.robot().name().to_string();
    let thread_name = format!("robot-{}", runner.robot().id().0);
    let handle = thread::Builder::new().name(thread_name).spawn(move || {
        let summary = runner.run();
        if events.send(RunComplete::from(&summary)).is_err() {
            debug!("[{}] Completion listener dropped", summary.name);
        }
        summary
    })?;
    debug!("[Coordinator] Spawned {name}");
    Ok(handle)
}

/// A running simulation.
pub struct SimulationHandle {
    world: Arc<GridWorld>,
    map: Arc<KnowledgeMap>,
    starts: Vec<Pose>,
    robots: Vec<RobotHandle>,
    workers: Vec<(RobotHandle, JoinHandle<RunSummary>)>,
    completions: Receiver<RunComplete>,
}

impl SimulationHandle {
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// Live knowledge map. Iteration may observe a torn snapshot.
    pub fn map(&self) -> &KnowledgeMap {
        &self.map
    }

    pub fn robots(&self) -> &[RobotHandle] {
        &self.robots
    }

    /// One event per agent, in completion order.
    pub fn completions(&self) -> &Receiver<RunComplete> {
        &self.completions
    }

    pub fn is_finished(&self) -> bool {
        self.robots.iter().all(RobotHandle::is_finished)
    }

    /// Wait for all agents and build the report.
    pub fn join(self) -> Result<SimulationReport> {
        let mut summaries = Vec::with_capacity(self.workers.len());
        for (robot, worker) in self.workers {
            let summary = worker
                .join()
                .map_err(|_| Error::AgentPanicked(robot.name().to_string()))?;
            summaries.push(summary);
        }
        summaries.sort_by_key(|s| s.robot);

        let reachable: HashSet<Cell> = self
            .starts
            .iter()
            .flat_map(|pose| self.world.reachable_open_cells(pose.cell))
            .collect();
        let discovered_open = reachable.iter().filter(|c| self.map.is_open(**c)).count();

        let report = SimulationReport {
            summaries,
            counts: self.map.counts(),
            reachable_open: reachable.len(),
            discovered_open,
        };
        info!(
            "[Coordinator] Simulation finished: {} steps total, {:.1}% coverage",
            report.total_steps(),
            report.coverage() * 100.0
        );
        Ok(report)
    }
}
