//! Run events and simulation reports.

use serde::{Deserialize, Serialize};

use crate::agent::{RobotId, RunOutcome, RunSummary};
use crate::knowledge::CellCounts;

/// Published once per agent when its run ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunComplete {
    pub robot: RobotId,
    pub name: String,
    pub total_steps: u64,
    pub outcome: RunOutcome,
}

impl From<&RunSummary> for RunComplete {
    fn from(summary: &RunSummary) -> Self {
        Self {
            robot: summary.robot,
            name: summary.name.clone(),
            total_steps: summary.steps,
            outcome: summary.outcome,
        }
    }
}

/// Final state of a simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Per-robot summaries, ordered by robot id.
    pub summaries: Vec<RunSummary>,
    pub counts: CellCounts,
    /// Open cells reachable from any start in the ground truth.
    pub reachable_open: usize,
    /// Of those, the ones recorded open in the knowledge map.
    pub discovered_open: usize,
}

impl SimulationReport {
    /// Fraction of reachable open cells that were discovered.
    pub fn coverage(&self) -> f64 {
        if self.reachable_open == 0 {
            return 1.0;
        }
        self.discovered_open as f64 / self.reachable_open as f64
    }

    pub fn total_steps(&self) -> u64 {
        self.summaries.iter().map(|s| s.steps).sum()
    }

    pub fn all_complete(&self) -> bool {
        self.summaries
            .iter()
            .all(|s| s.outcome == RunOutcome::Complete)
    }

    pub fn summary(&self, robot: RobotId) -> Option<&RunSummary> {
        self.summaries.iter().find(|s| s.robot == robot)
    }
}
