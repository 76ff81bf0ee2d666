use alloc::string::String;
use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid must be at least {min}x{min}", min = crate::MIN_SIDE)]
    InvalidDimensions,
    #[error("Mine count must be between 1 and {max}")]
    InvalidMineCount { max: CellCount },
    #[error("Grid state is inconsistent")]
    CorruptState,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Malformed player input, always recoverable by asking again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("No command given")]
    Empty,
    #[error("Unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` expects a row and a column")]
    WrongArity(&'static str),
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    #[error("Cell ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: u32,
        col: u32,
        height: Coord,
        width: Coord,
    },
}

/// Rejected answers to the size and mine-count questions of a new game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("Enter two numbers separated by a space")]
    MalformedSize,
    #[error("A grid side must be between {} and {}", crate::MIN_SIDE, Coord::MAX)]
    SideOutOfRange,
    #[error("That is not a number")]
    MalformedCount,
    #[error("Mine count must be between 1 and {max}")]
    CountOutOfRange { max: CellCount },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("`{0}` is not a usable save name")]
    InvalidName(String),
    #[error("No saved game named `{0}`")]
    NotFound(String),
    #[error("Could not access saved game: {0}")]
    Io(String),
    #[error("Saved game is damaged: {0}")]
    Corrupt(String),
}
