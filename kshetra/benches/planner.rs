//! Benchmark route planning and full exploration runs.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;

use kshetra::{
    AStarConfig, AStarPlanner, AgentConfig, AgentRunner, Cell, CellStatus, GoalMode, GridWorld,
    Heading, KnowledgeMap, Pose, Robot, RobotId, WorldConfig,
};

/// Fully known open room with a frontier cell in the far corner.
fn known_room(width: i32, height: i32) -> KnowledgeMap {
    let map: KnowledgeMap = (1..height - 1)
        .flat_map(|y| (1..width - 1).map(move |x| (Cell::new(x, y), CellStatus::Open)))
        .collect();
    map.record(Cell::new(width - 2, height - 1), CellStatus::Unexplored);
    map
}

fn bench_plan_across_room(c: &mut Criterion) {
    let mut group = c.benchmark_group("astar_room");
    let start = Pose::new(Cell::new(1, 1), Heading::South);

    for size in [16, 32, 50] {
        let map = known_room(size, size);
        let target = Cell::new(size - 2, size - 1);

        for mode in [GoalMode::ShortCircuit, GoalMode::Exhaustive] {
            let planner = AStarPlanner::new(&map, AStarConfig::default().with_goal_mode(mode));
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), size),
                &target,
                |b, target| b.iter(|| black_box(planner.search(start, *target))),
            );
        }
    }

    group.finish();
}

fn bench_full_exploration(c: &mut Criterion) {
    let world_config = WorldConfig::default().with_obstacle_probability(5).with_seed(42);
    let start = Pose::new(Cell::new(1, 1), Heading::South);
    let world = Arc::new(GridWorld::generate(&world_config, &[start.cell]).unwrap());

    c.bench_function("explore_50x33_frontier", |b| {
        b.iter(|| {
            let map = Arc::new(KnowledgeMap::new());
            let robot = Robot::new(RobotId(1), "bench", start);
            let runner = AgentRunner::new(robot, Arc::clone(&world), map, &AgentConfig::default());
            black_box(runner.run())
        })
    });
}

criterion_group!(benches, bench_plan_across_room, bench_full_exploration);
criterion_main!(benches);
