//! Two-agent runs over one shared knowledge map.

mod common;

use std::time::Duration;

use kshetra::{
    Coordinator, GridWorld, PolicyKind, RobotId, RobotMode, RunOutcome, SimulationConfig,
    WorldConfig,
};

fn seeded_world(seed: u64) -> GridWorld {
    let config = WorldConfig::default()
        .with_size(24, 16)
        .with_obstacle_probability(10)
        .with_seed(seed);
    let starts = SimulationConfig::default_starts(config.width, config.height);
    GridWorld::generate(&config, &[starts[0].cell, starts[1].cell]).unwrap()
}

#[test]
fn test_claims_are_exclusive_under_interleaving() {
    for seed in 0..6 {
        for policy in [PolicyKind::Frontier, PolicyKind::WallFollower] {
            let config = SimulationConfig::default()
                .with_mode(RobotMode::Coordinated)
                .with_policy(policy);
            let coordinator = Coordinator::with_world(config, seeded_world(seed)).unwrap();
            let mut runners = coordinator.into_runners();
            assert_eq!(runners.len(), 2);

            let mut rounds = 0;
            while runners.iter().any(|r| !r.is_finished()) {
                for i in 0..runners.len() {
                    runners[i].step();

                    let a = runners[0].current_target();
                    let b = runners[1].current_target();
                    if let (Some(a), Some(b)) = (a, b) {
                        assert_ne!(a, b, "seed {seed} {policy}: both agents target {a}");
                    }
                }
                rounds += 1;
                assert!(rounds < 50_000, "interleaved run did not terminate");
            }

            for runner in &runners {
                assert_eq!(runner.outcome(), Some(RunOutcome::Complete));
            }
        }
    }
}

#[test]
fn test_coordinated_threads_complete() {
    let config = SimulationConfig::default()
        .with_mode(RobotMode::Coordinated)
        .with_world(
            WorldConfig::default()
                .with_obstacle_probability(5)
                .with_seed(17),
        );
    let handle = Coordinator::new(config).unwrap().start().unwrap();
    assert_eq!(handle.robots().len(), 2);

    let events: Vec<_> = handle.completions().iter().take(2).collect();
    assert_eq!(events.len(), 2);

    let report = handle.join().unwrap();
    assert!(report.all_complete());
    assert_eq!(report.counts.unexplored, 0);
    assert!(report.coverage() > 0.5);
    for event in events {
        let summary = report.summary(event.robot).unwrap();
        assert_eq!(summary.steps, event.total_steps);
    }
}

#[test]
fn test_independent_threads_complete() {
    let config = SimulationConfig::default()
        .with_mode(RobotMode::Independent)
        .with_policy(PolicyKind::WallFollower)
        .with_world(WorldConfig::default().with_size(20, 12).with_seed(5));
    let report = Coordinator::new(config).unwrap().run().unwrap();

    assert_eq!(report.summaries.len(), 2);
    assert_eq!(report.summaries[0].robot, RobotId(1));
    assert_eq!(report.summaries[1].robot, RobotId(2));
    assert!(report.all_complete());
    assert_eq!(report.counts.claimed, 0);
}

#[test]
fn test_single_robot_report_full_coverage() {
    let config = SimulationConfig::default()
        .with_world(WorldConfig::default().with_size(12, 9).with_obstacle_probability(0))
        .with_step_delay(Duration::from_micros(1));
    let report = Coordinator::new(config).unwrap().run().unwrap();

    assert_eq!(report.summaries.len(), 1);
    assert_eq!(report.reachable_open, 70);
    assert_eq!(report.discovered_open, 70);
    assert!((report.coverage() - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_blocked_start_is_rejected() {
    let world = GridWorld::from_ascii(
        "
        #####
        ##..#
        #...#
        #####
        ",
    )
    .unwrap();
    let result = Coordinator::with_world(SimulationConfig::default(), world);
    assert!(result.is_err());
}
