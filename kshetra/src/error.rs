//! Error types for the exploration engine.

use thiserror::Error;

/// Result type alias using the crate error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced at the boundaries of the engine.
///
/// Exploration itself has no fatal error class: unreachable targets are
/// reported as [`crate::PathFailure`] values and handled locally by the
/// navigator.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid map: {0}")]
    InvalidMap(String),

    #[error("Failed to spawn agent thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Agent thread '{0}' panicked")]
    AgentPanicked(String),
}
