//! Centralized error types for the simulation.
//!
//! The per-frame loop never fails: invalid transitions are no-ops and missing visuals degrade silently.
//! These types only surface at construction and configuration boundaries.

use std::io;

/// Main error type for the simulation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Save error: {0}")]
    Save(#[from] SaveError),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors related to the level table.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LevelError {
    #[error("Unknown level: {0}")]
    Unknown(u8),
}

/// Errors raised by save backends.
#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
