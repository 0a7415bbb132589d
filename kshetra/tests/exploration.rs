//! End-to-end exploration behaviour of a single agent.

mod common;

use std::collections::HashMap;

use kshetra::{
    AgentConfig, Cell, CellStatus, GridWorld, PolicyKind, RunOutcome, StepOutcome, WorldConfig,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use common::{START, empty_room, fully_explored, run_single, single_runner};

#[test]
fn test_empty_room_frontier_policy() {
    let config = AgentConfig::default().with_policy(PolicyKind::Frontier);
    let (summary, map) = run_single(empty_room(), START, &config);

    assert_eq!(summary.outcome, RunOutcome::Complete);
    for y in 1..9 {
        for x in 1..9 {
            assert_eq!(
                map.status(Cell::new(x, y)),
                Some(CellStatus::Open),
                "interior cell ({x}, {y}) not open"
            );
        }
    }
    let counts = map.counts();
    assert_eq!(counts.open, 64);
    assert_eq!(counts.unexplored, 0);
    assert_eq!(counts.claimed, 0);
    assert!(summary.moves > 0);
    assert_eq!(summary.steps, summary.turns + summary.moves);
}

#[test]
fn test_empty_room_step_count_is_deterministic() {
    let config = AgentConfig::default();
    let (first, map) = run_single(empty_room(), START, &config);
    let (second, _) = run_single(empty_room(), START, &config);
    assert_eq!(first, second);

    assert_eq!(first.steps, 64);
    assert_eq!(first.turns, 14);
    assert_eq!(first.moves, 50);
    let reachable = map.counts().open as u64;
    assert_eq!(reachable, 64);
    assert!(first.steps <= 2 * reachable);
}

#[test]
fn test_empty_room_wall_follower_step_count() {
    let config = AgentConfig::default().with_policy(PolicyKind::WallFollower);
    let (summary, _) = run_single(empty_room(), START, &config);
    assert_eq!(summary.steps, 52);
    assert_eq!(summary.turns, 9);
    assert_eq!(summary.moves, 43);
}

#[test]
fn test_empty_room_wall_follower() {
    let config = AgentConfig::default().with_policy(PolicyKind::WallFollower);
    let (summary, map) = run_single(empty_room(), START, &config);

    assert_eq!(summary.outcome, RunOutcome::Complete);
    assert_eq!(map.counts().open, 64);
    assert_eq!(map.counts().unexplored, 0);
}

#[test]
fn test_knowledge_is_monotonic() {
    let world = GridWorld::generate(
        &WorldConfig::default()
            .with_size(16, 12)
            .with_obstacle_probability(15)
            .with_seed(3),
        &[START.cell],
    )
    .unwrap();
    let (mut runner, map) = single_runner(world, START, &AgentConfig::default());

    let mut known: HashMap<Cell, CellStatus> = HashMap::new();
    for _ in 0..10_000 {
        let outcome = runner.step();

        let current: HashMap<Cell, CellStatus> = map.snapshot().into_iter().collect();
        for (cell, before) in &known {
            let after = current.get(cell).copied();
            assert!(after.is_some(), "{cell} disappeared from the map");
            if before.is_sensed_obstacle() {
                assert_eq!(after, Some(*before), "sensed obstacle {cell} changed");
            }
            if before.is_open() {
                assert_eq!(after, Some(CellStatus::Open), "open cell {cell} changed");
            }
        }
        known = current;

        if outcome.is_finished() {
            break;
        }
    }
    assert!(runner.is_finished());
}

#[test]
fn test_terminates_with_full_coverage_on_random_worlds() {
    for seed in 0..12u64 {
        for policy in [PolicyKind::Frontier, PolicyKind::WallFollower] {
            let world_config = WorldConfig::default()
                .with_size(20, 14)
                .with_obstacle_probability(20)
                .with_seed(seed);
            let world = GridWorld::generate(&world_config, &[START.cell]).unwrap();
            let truth = world.clone();

            let config = AgentConfig::default().with_policy(policy);
            let (summary, map) = run_single(world, START, &config);

            assert_eq!(summary.outcome, RunOutcome::Complete, "seed {seed} {policy}");
            assert_eq!(map.counts().unexplored, 0);
            assert!(
                fully_explored(&truth, &map, START.cell),
                "seed {seed} {policy}: reachable cells left undiscovered"
            );
            // Every open cell recorded is truly open
            for (cell, status) in map.snapshot() {
                if status.is_open() {
                    assert!(!truth.is_obstacle(cell));
                }
            }
        }
    }
}

#[test]
fn test_random_generator_worlds_match_seeded_rng() {
    let config = WorldConfig::default().with_obstacle_probability(10);
    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    let a = GridWorld::generate_with_rng(&config, &[START.cell], &mut rng_a).unwrap();
    let b = GridWorld::generate_with_rng(&config, &[START.cell], &mut rng_b).unwrap();
    assert_eq!(a.to_ascii(), b.to_ascii());
}

#[test]
fn test_moves_only_into_open_cells() {
    let world = GridWorld::generate(
        &WorldConfig::default()
            .with_size(14, 10)
            .with_obstacle_probability(25)
            .with_seed(11),
        &[START.cell],
    )
    .unwrap();
    let truth = world.clone();
    let (mut runner, _map) = single_runner(world, START, &AgentConfig::default());

    loop {
        match runner.step() {
            StepOutcome::Moved(cell) => assert!(!truth.is_obstacle(cell)),
            StepOutcome::Turned(_) => {}
            StepOutcome::Complete => break,
            StepOutcome::StepLimit => panic!("step limit reached"),
        }
    }
}
