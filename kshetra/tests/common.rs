//! Test utilities for kshetra exploration tests.
//!
//! Builders for worlds and synthetic knowledge maps, a brute-force
//! reference for route costs, and single-threaded run helpers.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use kshetra::{
    AgentConfig, AgentRunner, Cell, CellStatus, GridWorld, Heading, KnowledgeMap, ObstacleSource,
    Pose, Robot, RobotId, RunSummary,
};
use rand::Rng;
use rand::rngs::StdRng;

/// Robot 1's default start.
pub const START: Pose = Pose::new(Cell::new(1, 1), Heading::South);

/// 10x10 room with only the border blocked.
pub fn empty_room() -> GridWorld {
    GridWorld::empty(10, 10).expect("valid room")
}

/// 9x7 grid split by a full-height wall at x = 4.
pub fn split_world() -> GridWorld {
    GridWorld::from_ascii(
        "
        #########
        #...#...#
        #...#...#
        #...#...#
        #...#...#
        #...#...#
        #########
        ",
    )
    .expect("valid split world")
}

/// Runner for a single robot on its own map, stepped on the calling thread.
pub fn single_runner(world: GridWorld, start: Pose, config: &AgentConfig) -> (AgentRunner, Arc<KnowledgeMap>) {
    let map = Arc::new(KnowledgeMap::new());
    let robot = Robot::new(RobotId(1), "Robot 1", start);
    let runner = AgentRunner::new(robot, Arc::new(world), Arc::clone(&map), config);
    (runner, map)
}

/// Run a single robot to completion.
pub fn run_single(world: GridWorld, start: Pose, config: &AgentConfig) -> (RunSummary, Arc<KnowledgeMap>) {
    let (runner, map) = single_runner(world, start, config);
    (runner.run(), map)
}

/// Random statuses on a `size` x `size` patch: mostly open, some obstacles,
/// a few frontier cells, and holes with no entry.
pub fn random_knowledge_map(rng: &mut StdRng, size: i32) -> KnowledgeMap {
    let mut cells = Vec::new();
    for y in 0..size {
        for x in 0..size {
            let roll: u8 = rng.random_range(0..100);
            let status = match roll {
                0..65 => CellStatus::Open,
                65..85 => CellStatus::Obstacle(ObstacleSource::Sensed),
                85..95 => CellStatus::Unexplored,
                _ => continue,
            };
            cells.push((Cell::new(x, y), status));
        }
    }
    cells.into_iter().collect()
}

pub fn random_heading(rng: &mut StdRng) -> Heading {
    Heading::from_index(rng.random_range(0..4))
}

/// Exhaustive relaxation over (cell, heading) states until nothing improves.
///
/// Uses the same cost model as the planner: entering through an open cell,
/// the target always admissible, 1 + quarter turns per move.
pub fn brute_force_cost(map: &KnowledgeMap, start: Pose, target: Cell) -> Option<u32> {
    if start.cell == target {
        return Some(0);
    }

    let mut best: HashMap<(Cell, Heading), u32> = HashMap::new();
    best.insert((start.cell, start.heading), 0);

    loop {
        let mut changed = false;
        let states: Vec<((Cell, Heading), u32)> = best.iter().map(|(k, v)| (*k, *v)).collect();
        for ((cell, heading), cost) in states {
            if cell == target {
                continue;
            }
            for next_heading in Heading::ALL {
                let next = cell.step(next_heading);
                if next != target && !map.is_open(next) {
                    continue;
                }
                let next_cost = cost + heading.move_cost(next_heading);
                let entry = best.entry((next, next_heading)).or_insert(u32::MAX);
                if next_cost < *entry {
                    *entry = next_cost;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    Heading::ALL
        .iter()
        .filter_map(|h| best.get(&(target, *h)).copied())
        .min()
}

/// Cost of walking `cells` in order from `start`, checking adjacency.
pub fn walk_cost(start: Pose, cells: impl IntoIterator<Item = Cell>) -> u32 {
    let mut pose = start;
    let mut cost = 0;
    for cell in cells {
        let heading = pose
            .cell
            .heading_to(&cell)
            .expect("consecutive route cells must be adjacent");
        cost += pose.heading.move_cost(heading);
        pose = Pose::new(cell, heading);
    }
    cost
}

/// Every reachable open cell of `world` from `start` is open in `map`.
pub fn fully_explored(world: &GridWorld, map: &KnowledgeMap, start: Cell) -> bool {
    world
        .reachable_open_cells(start)
        .into_iter()
        .all(|cell| map.is_open(cell))
}
