//! Route planner properties on synthetic maps.

mod common;

use kshetra::{
    AStarConfig, AStarPlanner, AgentConfig, Cell, CellStatus, Heading, ObstacleSource,
    PathFailure, Pose,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use common::{
    brute_force_cost, random_heading, random_knowledge_map, run_single, split_world, walk_cost,
};

const TRIALS: usize = 400;
const SIZE: i32 = 5;

/// Random open start and any distinct target on the patch.
fn random_query(rng: &mut StdRng, map: &kshetra::KnowledgeMap) -> Option<(Pose, Cell)> {
    let open: Vec<Cell> = map
        .snapshot()
        .into_iter()
        .filter(|(_, s)| s.is_open())
        .map(|(c, _)| c)
        .collect();
    if open.is_empty() {
        return None;
    }
    let start = open[rng.random_range(0..open.len())];
    let target = Cell::new(rng.random_range(0..SIZE), rng.random_range(0..SIZE));
    if target == start {
        return None;
    }
    Some((Pose::new(start, random_heading(rng)), target))
}

#[test]
fn test_exhaustive_mode_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut routed = 0;

    for _ in 0..TRIALS {
        let map = random_knowledge_map(&mut rng, SIZE);
        let Some((start, target)) = random_query(&mut rng, &map) else {
            continue;
        };

        let planner = AStarPlanner::new(&map, AStarConfig::exhaustive());
        let expected = brute_force_cost(&map, start, target);
        match (planner.search(start, target), expected) {
            (Ok(route), Some(cost)) => {
                routed += 1;
                assert_eq!(route.cost(), cost, "start {start} target {target}");
                assert_eq!(walk_cost(start, route.cells()), cost);
                assert_eq!(route.target(), Some(target));
            }
            (Err(PathFailure::NoPath), None) => {}
            (result, expected) => {
                panic!("start {start} target {target}: got {result:?}, brute force {expected:?}")
            }
        }
    }

    assert!(routed > TRIALS / 4, "too few routable queries: {routed}");
}

#[test]
fn test_short_circuit_routes_are_valid() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..TRIALS {
        let map = random_knowledge_map(&mut rng, SIZE);
        let Some((start, target)) = random_query(&mut rng, &map) else {
            continue;
        };

        let planner = AStarPlanner::with_defaults(&map);
        let expected = brute_force_cost(&map, start, target);
        match planner.search(start, target) {
            Ok(route) => {
                let optimal = expected.expect("route found where brute force found none");
                assert!(route.cost() >= optimal);
                assert_eq!(walk_cost(start, route.cells()), route.cost());
                // Every cell before the target is open
                let cells: Vec<Cell> = route.cells().collect();
                for cell in &cells[..cells.len() - 1] {
                    assert!(map.is_open(*cell));
                }
                assert_eq!(cells.last(), Some(&target));
            }
            Err(failure) => {
                assert_eq!(failure, PathFailure::NoPath);
                assert!(expected.is_none());
            }
        }
    }
}

#[test]
fn test_split_world_forced_target_is_unreachable() {
    let start = Pose::new(Cell::new(1, 1), Heading::South);
    let (summary, map) = run_single(split_world(), start, &AgentConfig::default());
    assert_eq!(map.counts().open, 15, "left region fully explored");

    // A frontier in the right-hand region can only be known by fiat
    let target = Cell::new(6, 3);
    assert!(map.insert_frontier(target));

    let planner = AStarPlanner::with_defaults(&map);
    assert_eq!(
        planner.plan(summary.final_pose, target),
        Err(PathFailure::NoPath)
    );
    assert_eq!(
        map.status(target),
        Some(CellStatus::Obstacle(ObstacleSource::Unreachable))
    );
    assert_eq!(map.nearest_unexplored(summary.final_pose.cell), None);
}
