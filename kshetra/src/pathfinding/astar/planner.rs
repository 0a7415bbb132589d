//! A* planner implementation.

use log::{debug, trace};
use std::collections::{HashMap, HashSet};

use super::types::{AStarConfig, GoalMode, PathFailure, PathNode, Route, SearchKey};
use crate::core::{Cell, Heading, Pose};
use crate::knowledge::KnowledgeMap;

/// A* pathfinder over the shared knowledge map
pub struct AStarPlanner<'a> {
    map: &'a KnowledgeMap,
    config: AStarConfig,
}

/// Open set: arena indices sorted ascending by f.
struct OpenList {
    mode: GoalMode,
    order: Vec<usize>,
    index: HashMap<SearchKey, usize>,
}

impl OpenList {
    fn new(mode: GoalMode) -> Self {
        Self {
            mode,
            order: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert before the first node whose f is not lower, so the newest of
    /// equal-f nodes is expanded first.
    fn insert_sorted(&mut self, arena: &[PathNode], idx: usize) {
        let f = arena[idx].f();
        let pos = self
            .order
            .iter()
            .position(|&other| arena[other].f() >= f)
            .unwrap_or(self.order.len());
        self.order.insert(pos, idx);
        self.index.insert(arena[idx].key(self.mode), idx);
    }

    fn push_front(&mut self, arena: &[PathNode], idx: usize) {
        self.order.insert(0, idx);
        self.index.insert(arena[idx].key(self.mode), idx);
    }

    fn remove(&mut self, key: SearchKey) {
        if let Some(idx) = self.index.remove(&key)
            && let Some(pos) = self.order.iter().position(|&other| other == idx)
        {
            self.order.remove(pos);
        }
    }

    fn get(&self, key: &SearchKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    fn pop_front(&mut self, arena: &[PathNode]) -> Option<usize> {
        if self.order.is_empty() {
            return None;
        }
        let idx = self.order.remove(0);
        let key = arena[idx].key(self.mode);
        if self.index.get(&key) == Some(&idx) {
            self.index.remove(&key);
        }
        Some(idx)
    }
}

impl<'a> AStarPlanner<'a> {
    /// Create a new A* planner
    pub fn new(map: &'a KnowledgeMap, config: AStarConfig) -> Self {
        Self { map, config }
    }

    /// Create with default configuration
    pub fn with_defaults(map: &'a KnowledgeMap) -> Self {
        Self::new(map, AStarConfig::default())
    }

    pub fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Plan a route and mark the target as an obstacle if none exists.
    pub fn plan(&self, start: Pose, target: Cell) -> Result<Route, PathFailure> {
        let result = self.search(start, target);
        if let Err(failure) = result {
            debug!("[AStar] {failure} from {start} to {target}, marking target unreachable");
            self.map.mark_unreachable(target);
        }
        result
    }

    /// Search without touching the map.
    pub fn search(&self, start: Pose, target: Cell) -> Result<Route, PathFailure> {
        trace!("[AStar] search: start={start} target={target}");

        let mut arena = vec![PathNode {
            cell: start.cell,
            heading: start.heading,
            parent: None,
            g: 0,
            h: start.cell.manhattan_distance(&target),
        }];
        let mode = self.config.goal_mode;
        let mut open = OpenList::new(mode);
        open.insert_sorted(&arena, 0);
        let mut closed: HashSet<SearchKey> = HashSet::new();
        let mut nodes_expanded = 0;

        while let Some(current_idx) = open.pop_front(&arena) {
            nodes_expanded += 1;
            if nodes_expanded > self.config.max_iterations {
                debug!("[AStar] FAILED: MaxIterationsExceeded ({nodes_expanded} nodes)");
                return Err(PathFailure::MaxIterationsExceeded);
            }

            let current = arena[current_idx].clone();
            if current.cell == target {
                return Ok(self.reconstruct(&arena, current_idx, nodes_expanded));
            }
            if !closed.insert(current.key(mode)) {
                continue;
            }

            for heading in Heading::ALL {
                let cell = current.cell.step(heading);
                let is_target = cell == target;
                if !is_target && !self.map.is_open(cell) {
                    continue;
                }

                let node = PathNode {
                    cell,
                    heading,
                    parent: Some(current_idx),
                    g: current.g + current.heading.move_cost(heading),
                    h: cell.manhattan_distance(&target),
                };

                if is_target && mode == GoalMode::ShortCircuit {
                    arena.push(node);
                    open.push_front(&arena, arena.len() - 1);
                    continue;
                }

                let key = node.key(mode);
                if closed.contains(&key) {
                    continue;
                }

                if let Some(existing) = open.get(&key) {
                    if arena[existing].g < node.g {
                        continue;
                    }
                    open.remove(key);
                }
                arena.push(node);
                open.insert_sorted(&arena, arena.len() - 1);
            }
        }

        debug!("[AStar] FAILED: NoPath after {nodes_expanded} expansions");
        Err(PathFailure::NoPath)
    }

    /// Walk parents from the goal node. The start node is excluded.
    fn reconstruct(&self, arena: &[PathNode], goal_idx: usize, nodes_expanded: usize) -> Route {
        let mut waypoints = Vec::new();
        let mut idx = goal_idx;
        while let Some(parent) = arena[idx].parent {
            waypoints.push(arena[idx].cell);
            idx = parent;
        }

        let cost = arena[goal_idx].g;
        trace!(
            "[AStar] Route found: {} cells, cost {cost}, {nodes_expanded} expansions",
            waypoints.len()
        );
        Route::new(waypoints, cost, nodes_expanded)
    }
}
