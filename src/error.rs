//! Centralized error types for the game.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur during game operation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Board parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("Score log error: {0}")]
    Score(#[from] ScoreError),

    #[error("Failed to start {role} thread: {source}")]
    Startup { role: String, source: io::Error },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Error type for board parsing operations.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Unknown character in board: {0}")]
    UnknownCharacter(char),

    #[error("Board row {row} has width {found}, expected {expected}")]
    RaggedRow { row: usize, found: usize, expected: usize },

    #[error("Board is empty")]
    EmptyBoard,

    #[error("House door must be one contiguous horizontal run, found {0} cells")]
    InvalidDoorRun(usize),

    #[error("Pac-Man's starting position not found")]
    MissingSpawn,
}

/// Errors related to the score log.
///
/// Malformed data lines are skipped during recomputation, never surfaced;
/// only genuine IO failures end up here.
#[derive(thiserror::Error, Debug)]
pub enum ScoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
