//! # Kshetra: Grid Exploration Engine
//!
//! Simulates one or two robots exploring an unknown grid with nothing but
//! proximity sensing, building a shared map until every reachable cell has
//! been seen.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kshetra::{Coordinator, PolicyKind, RobotMode, SimulationConfig, WorldConfig};
//!
//! let config = SimulationConfig::default()
//!     .with_world(WorldConfig::default().with_obstacle_probability(5).with_seed(42))
//!     .with_mode(RobotMode::Coordinated)
//!     .with_policy(PolicyKind::WallFollower);
//!
//! let report = Coordinator::new(config)?.run()?;
//! for summary in &report.summaries {
//!     println!("{}: {} steps", summary.name, summary.steps);
//! }
//! # Ok::<(), kshetra::Error>(())
//! ```
//!
//! ## Coordinate Frame
//!
//! Screen convention: x grows East, y grows South, so North is `y - 1`.
//! Cell `(0, 0)` is the top-left border corner.
//!
//! ## Architecture
//!
//! - [`core`]: Cells, headings, poses and cell states
//! - [`world`]: Ground-truth obstacle grid
//! - [`knowledge`]: Shared, concurrently mutated knowledge map
//! - [`sensor`]: Three-sided proximity sensing
//! - [`pathfinding`]: Turn-aware A* over the knowledge map
//! - [`exploration`]: Policies and the per-agent navigator
//! - [`agent`]: Robots and the sense/decide/act loop
//! - [`coordinator`]: Threads, claiming and reports
//!
//! ## Data Flow
//!
//! ```text
//!   GridWorld ──sense──▶ KnowledgeMap ◀──sense── GridWorld
//!                          │     ▲
//!          select/plan     │     │  claim (coordinated)
//!                          ▼     │
//!   AgentRunner 1 ──▶ Navigator ─┘   AgentRunner 2 ──▶ Navigator
//!        │                                  │
//!        └────────── RunComplete ───────────┘──▶ Coordinator
//! ```

pub mod agent;
pub mod coordinator;
pub mod core;
pub mod error;
pub mod exploration;
pub mod knowledge;
pub mod pathfinding;
pub mod sensor;
pub mod world;

pub use agent::{
    AgentConfig, AgentRunner, FixedDelay, NoPacing, Pacer, Robot, RobotHandle, RobotId,
    RunOutcome, RunSummary, StepOutcome,
};
pub use coordinator::{
    Coordinator, RobotMode, RunComplete, SimulationConfig, SimulationHandle, SimulationReport,
};
pub use crate::core::{Cell, CellStatus, Heading, ObstacleSource, Pose, Side, Turn};
pub use error::{Error, Result};
pub use exploration::{ExplorationPolicy, Navigator, NavigatorState, PolicyKind};
pub use knowledge::{CellCounts, KnowledgeMap};
pub use pathfinding::{AStarConfig, AStarPlanner, GoalMode, PathFailure, Route};
pub use sensor::{Reading, Readings, Sensor};
pub use world::{GridWorld, WorldConfig};
