//! Navigator state machine.

use log::{debug, trace, warn};

use super::policy::{ExplorationPolicy, PolicyKind};
use crate::core::{Cell, Pose, Turn};
use crate::knowledge::KnowledgeMap;
use crate::pathfinding::{AStarConfig, AStarPlanner, Route};
use crate::sensor::Readings;

/// Which source produced the current waypoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigatorState {
    /// Heading for an adjacent opening chosen by the policy.
    AdjacentMove,
    /// Consuming a planned route.
    FollowPath,
    /// Selecting a frontier and planning to it.
    Replan,
    /// No frontier left.
    Complete,
}

impl NavigatorState {
    pub fn name(&self) -> &'static str {
        match self {
            NavigatorState::AdjacentMove => "AdjacentMove",
            NavigatorState::FollowPath => "FollowPath",
            NavigatorState::Replan => "Replan",
            NavigatorState::Complete => "Complete",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, NavigatorState::Complete)
    }
}

/// One physical step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Turn(Turn),
    Forward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Act(Action),
    Complete,
}

/// Planning statistics for one agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigatorStats {
    pub plans: u32,
    pub unreachable_targets: u32,
    pub abandoned_routes: u32,
}

pub struct Navigator {
    policy: Box<dyn ExplorationPolicy>,
    planner: AStarConfig,
    claim_frontiers: bool,
    waypoint: Option<Cell>,
    route: Option<Route>,
    target: Option<Cell>,
    state: NavigatorState,
    stats: NavigatorStats,
}

impl Navigator {
    pub fn new(policy: PolicyKind, planner: AStarConfig, claim_frontiers: bool) -> Self {
        Self {
            policy: policy.build(),
            planner,
            claim_frontiers,
            waypoint: None,
            route: None,
            target: None,
            state: NavigatorState::Replan,
            stats: NavigatorStats::default(),
        }
    }

    pub fn state(&self) -> NavigatorState {
        self.state
    }

    /// Frontier cell the agent is currently travelling to.
    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn stats(&self) -> NavigatorStats {
        self.stats
    }

    pub fn policy(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// Choose the next physical step from the current pose and fresh readings.
    ///
    /// Order: pending waypoint, queued route, policy's local move, frontier
    /// selection and planning. Loops internally until one of them yields a
    /// step or no frontier remains.
    pub fn decide(&mut self, pose: Pose, readings: &Readings, map: &KnowledgeMap) -> Decision {
        loop {
            if let Some(waypoint) = self.waypoint {
                if let Some(action) = self.step_toward(pose, waypoint, map) {
                    return Decision::Act(action);
                }
                continue;
            }

            if let Some(route) = self.route.as_mut() {
                match route.next_waypoint() {
                    Some(next) => {
                        self.waypoint = Some(next);
                        self.state = NavigatorState::FollowPath;
                    }
                    None => {
                        self.route = None;
                        self.target = None;
                    }
                }
                continue;
            }

            if let Some(cell) = self.policy.local_move(readings) {
                trace!("[Navigator] Local move to {cell}");
                self.waypoint = Some(cell);
                self.state = NavigatorState::AdjacentMove;
                continue;
            }

            self.state = NavigatorState::Replan;
            let Some(target) = map.select_frontier(pose.cell, self.claim_frontiers) else {
                debug!("[Navigator] No frontier left from {}", pose.cell);
                self.state = NavigatorState::Complete;
                self.target = None;
                return Decision::Complete;
            };

            self.target = Some(target);
            match AStarPlanner::new(map, self.planner.clone()).plan(pose, target) {
                Ok(route) => {
                    self.stats.plans += 1;
                    trace!(
                        "[Navigator] Planned {} waypoints to {target}, cost {}",
                        route.len(),
                        route.cost()
                    );
                    self.route = Some(route);
                }
                Err(failure) => {
                    self.stats.unreachable_targets += 1;
                    debug!("[Navigator] Target {target} unreachable: {failure}");
                    self.target = None;
                }
            }
        }
    }

    /// Single step toward an adjacent waypoint, or `None` after abandoning it.
    fn step_toward(&mut self, pose: Pose, waypoint: Cell, map: &KnowledgeMap) -> Option<Action> {
        let Some(desired) = pose.cell.heading_to(&waypoint) else {
            warn!("[Navigator] Waypoint {waypoint} not adjacent to {}, dropping route", pose.cell);
            self.abandon();
            return None;
        };

        let status = map.status(waypoint);
        if status.is_some_and(|s| s.is_sensed_obstacle()) {
            debug!("[Navigator] Waypoint {waypoint} is blocked, dropping route");
            self.abandon();
            return None;
        }

        if let Some(turn) = pose.heading.turn_toward(desired) {
            return Some(Action::Turn(turn));
        }

        if status.is_some_and(|s| s.is_open()) {
            self.waypoint = None;
            return Some(Action::Forward);
        }

        debug!("[Navigator] Waypoint {waypoint} not open after sensing, dropping route");
        self.abandon();
        None
    }

    fn abandon(&mut self) {
        if self.route.is_some() {
            self.stats.abandoned_routes += 1;
        }
        self.waypoint = None;
        self.route = None;
        self.target = None;
    }
}
