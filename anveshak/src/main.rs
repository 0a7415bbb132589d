//! Anveshak - Grid Exploration Simulator
//!
//! Runs one or more kshetra exploration simulations from the command line.
//! Each simulation generates a random world, starts one or two robots on
//! their own threads and reports the step count of every robot when
//! exploration completes.
//!
//! Configuration comes from a TOML file (`--config`, or `anveshak.toml` in
//! the working directory when present); command-line flags override it.

mod config;
mod error;
mod report;

use clap::{Parser, ValueEnum};
use config::AnveshakConfig;
use crossbeam_channel::RecvTimeoutError;
use error::{AnveshakError, Result};
use kshetra::{Coordinator, PolicyKind, RobotHandle, SimulationReport};
use report::BatchSummary;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "anveshak.toml";
const DEFAULT_LOG_FILTER: &str = "anveshak=info,kshetra=info";
const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// Grid exploration simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Obstacle probability in percent
    #[arg(short = 'p', long, value_parser = clap::value_parser!(u8).range(1..=100))]
    obstacles: Option<u8>,

    /// Number of robots
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    robots: Option<u8>,

    /// Two robots share the map without claiming targets
    #[arg(long)]
    independent: bool,

    /// Exploration policy
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Number of simulations to run
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    runs: Option<u32>,

    /// Base seed for reproducible worlds
    #[arg(long)]
    seed: Option<u64>,

    /// Grid columns including the border
    #[arg(long)]
    width: Option<i32>,

    /// Grid rows including the border
    #[arg(long)]
    height: Option<i32>,

    /// Delay after each robot step in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print the final knowledge map of each simulation
    #[arg(long)]
    show_map: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Frontier,
    WallFollower,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Frontier => PolicyKind::Frontier,
            PolicyArg::WallFollower => PolicyKind::WallFollower,
        }
    }
}

impl Args {
    /// Override file values with the flags that were given.
    fn apply(&self, config: &mut AnveshakConfig) {
        if let Some(p) = self.obstacles {
            config.world.obstacle_probability = p;
        }
        if let Some(seed) = self.seed {
            config.world.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.world.width = width;
        }
        if let Some(height) = self.height {
            config.world.height = height;
        }
        if let Some(count) = self.robots {
            config.robots.count = count;
        }
        if self.independent {
            config.robots.coordinated = false;
        }
        if let Some(policy) = self.policy {
            config.robots.policy = policy.into();
        }
        if let Some(delay) = self.delay_ms {
            config.robots.step_delay_ms = delay;
        }
        if let Some(runs) = self.runs {
            config.output.runs = runs as usize;
        }
        if self.show_map {
            config.output.show_map = true;
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    info!("Anveshak v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "{} simulation(s) on {}x{} grid, {}% obstacles, {} mode, {} policy",
        config.output.runs,
        config.world.width,
        config.world.height,
        config.world.obstacle_probability,
        config.mode(),
        config.robots.policy
    );

    let reports = run_batch(&config)?;
    if reports.len() > 1 {
        println!("{}", BatchSummary::from_reports(&reports));
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AnveshakConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            AnveshakConfig::load(path)
        }
        None if Path::new(DEFAULT_CONFIG).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG);
            AnveshakConfig::load(Path::new(DEFAULT_CONFIG))
        }
        None => {
            debug!("Using default configuration");
            Ok(AnveshakConfig::default())
        }
    }
}

/// Run all simulations, at most one per available core at a time.
fn run_batch(config: &AnveshakConfig) -> Result<Vec<SimulationReport>> {
    let parallel = thread::available_parallelism().map_or(2, |n| n.get());
    let runs: Vec<usize> = (1..=config.output.runs).collect();
    let mut reports = Vec::with_capacity(runs.len());

    for chunk in runs.chunks(parallel) {
        let batch = thread::scope(|scope| -> Result<Vec<SimulationReport>> {
            let workers = chunk
                .iter()
                .map(|&run| {
                    thread::Builder::new()
                        .name(format!("simulation-{run}"))
                        .spawn_scoped(scope, move || run_simulation(config, run))
                })
                .collect::<std::io::Result<Vec<_>>>()?;

            workers
                .into_iter()
                .zip(chunk)
                .map(|(worker, run)| {
                    worker.join().unwrap_or_else(|_| {
                        Err(AnveshakError::Simulation(kshetra::Error::AgentPanicked(
                            format!("simulation-{run}"),
                        )))
                    })
                })
                .collect()
        })?;
        reports.extend(batch);
    }
    Ok(reports)
}

fn run_simulation(config: &AnveshakConfig, run: usize) -> Result<SimulationReport> {
    let handle = Coordinator::new(config.simulation(run))?.start()?;

    // Monitor until every robot reports completion
    let expected = handle.robots().len();
    let mut finished = 0;
    while finished < expected {
        match handle.completions().recv_timeout(PROGRESS_INTERVAL) {
            Ok(event) => {
                finished += 1;
                info!(
                    "simulation #{run}: {} finished ({:?}) after {} steps",
                    event.name, event.outcome, event.total_steps
                );
            }
            Err(RecvTimeoutError::Timeout) => {
                for robot in handle.robots() {
                    debug!(
                        "simulation #{run}: {} at {} ({} steps)",
                        robot.name(),
                        robot.pose(),
                        robot.steps()
                    );
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let map_text = config.output.show_map.then(|| {
        let poses: Vec<_> = handle.robots().iter().map(RobotHandle::pose).collect();
        handle
            .map()
            .render_ascii(handle.world().width(), handle.world().height(), &poses)
    });

    let report = handle.join()?;
    if !report.all_complete() {
        warn!("simulation #{run}: a robot stopped at the step limit");
    }

    let steps: Vec<String> = report
        .summaries
        .iter()
        .map(|s| format!("{} steps = {}", s.name, s.steps))
        .collect();
    println!(
        "simulation #{run}: {} (coverage {:.1}%)",
        steps.join(", "),
        report.coverage() * 100.0
    );
    if let Some(text) = map_text {
        println!("{text}");
    }
    Ok(report)
}
