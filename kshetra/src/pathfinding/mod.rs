//! Route planning over the knowledge map.
//!
//! The planner searches over (cell, heading) states so that turning is
//! priced into the route: a straight move costs 1, a move after a single
//! 90° turn costs 2 and a reversal costs 3.
//!
//! ```rust,ignore
//! use kshetra::pathfinding::{AStarConfig, AStarPlanner};
//!
//! let planner = AStarPlanner::new(&map, AStarConfig::default());
//! match planner.plan(robot.pose(), target) {
//!     Ok(route) => println!("{} waypoints, cost {}", route.len(), route.cost()),
//!     Err(failure) => println!("no route: {failure}"),
//! }
//! ```

pub mod astar;

pub use astar::{AStarConfig, AStarPlanner, GoalMode, PathFailure, Route, plan_route};
