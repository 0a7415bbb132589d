//! Per-step exploration decisions.
//!
//! A [`Navigator`] owns one agent's decision state: the waypoint it is
//! heading for, the queued route and the current frontier target. Each
//! call to [`Navigator::decide`] produces exactly one physical action (a
//! turn or a forward move) or signals completion.
//!
//! Two policies decide whether an adjacent opening is worth taking before
//! falling back to frontier planning:
//! - [`FrontierPolicy`]: always plan to the nearest frontier
//! - [`WallFollowerPolicy`]: prefer fresh openings left, then front, then right

mod navigator;
mod policy;

pub use navigator::{Action, Decision, Navigator, NavigatorState, NavigatorStats};
pub use policy::{ExplorationPolicy, FrontierPolicy, PolicyKind, WallFollowerPolicy};
