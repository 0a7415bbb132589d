//! Core value types: cells, headings, poses and cell knowledge states.

mod cell;
mod heading;
mod pose;
mod status;

pub use cell::Cell;
pub use heading::{Heading, Side, Turn};
pub use pose::Pose;
pub use status::{CellStatus, ObstacleSource};
