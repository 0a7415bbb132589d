//! Aggregate statistics over several simulations.

use kshetra::SimulationReport;
use std::collections::BTreeMap;
use std::fmt;

/// Step statistics for one robot across runs.
#[derive(Clone, Debug, PartialEq)]
pub struct StepStats {
    pub runs: usize,
    pub mean: f64,
    pub min: u64,
    pub max: u64,
}

impl StepStats {
    fn from_steps(steps: &[u64]) -> Option<Self> {
        let min = *steps.iter().min()?;
        let max = *steps.iter().max()?;
        let mean = steps.iter().sum::<u64>() as f64 / steps.len() as f64;
        Some(Self {
            runs: steps.len(),
            mean,
            min,
            max,
        })
    }
}

/// Summary printed after all simulations finish.
#[derive(Clone, Debug, Default)]
pub struct BatchSummary {
    pub simulations: usize,
    pub incomplete: usize,
    /// Keyed by robot name.
    pub steps: BTreeMap<String, StepStats>,
    pub mean_coverage: f64,
}

impl BatchSummary {
    pub fn from_reports(reports: &[SimulationReport]) -> Self {
        let mut per_robot: BTreeMap<String, Vec<u64>> = BTreeMap::new();
        let mut incomplete = 0;
        for report in reports {
            if !report.all_complete() {
                incomplete += 1;
            }
            for summary in &report.summaries {
                per_robot
                    .entry(summary.name.clone())
                    .or_default()
                    .push(summary.steps);
            }
        }

        let mean_coverage = if reports.is_empty() {
            0.0
        } else {
            reports.iter().map(SimulationReport::coverage).sum::<f64>() / reports.len() as f64
        };

        Self {
            simulations: reports.len(),
            incomplete,
            steps: per_robot
                .into_iter()
                .filter_map(|(name, steps)| StepStats::from_steps(&steps).map(|s| (name, s)))
                .collect(),
            mean_coverage,
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} simulation(s), {} incomplete", self.simulations, self.incomplete)?;
        for (name, stats) in &self.steps {
            writeln!(
                f,
                "  {name}: mean {:.1} steps (min {}, max {}) over {} run(s)",
                stats.mean, stats.min, stats.max, stats.runs
            )?;
        }
        write!(f, "  mean coverage {:.1}%", self.mean_coverage * 100.0)
    }
}
