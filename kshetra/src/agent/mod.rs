//! Robots and the per-agent step loop.

mod pacing;
mod robot;
mod runner;
mod shared;

pub use pacing::{FixedDelay, NoPacing, Pacer, pacer_for};
pub use robot::{Robot, RobotHandle, RobotId};
pub use runner::{AgentConfig, AgentRunner, RunOutcome, RunSummary, StepOutcome};
pub use shared::AtomicPose;
