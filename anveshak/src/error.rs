//! Error types for Anveshak

use thiserror::Error;

/// Anveshak error type
#[derive(Error, Debug)]
pub enum AnveshakError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Simulation error: {0}")]
    Simulation(#[from] kshetra::Error),
}

impl From<toml::de::Error> for AnveshakError {
    fn from(e: toml::de::Error) -> Self {
        AnveshakError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnveshakError>;
