use thiserror::Error;

use crate::Hex;

/// Construction-time configuration failures. Gameplay operations are total
/// and never return errors; hitting a mine is a state transition, not an
/// error.
#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum GameError {
    #[error("ring radius {rings} is too small, the board needs at least 2 rings")]
    InvalidRings { rings: u16 },
    #[error("density {density} is out of range for the level schedule")]
    InvalidDensity { density: f64 },
    #[error("mine at {0} lies outside the board")]
    MineOutsideBoard(Hex),
}

pub type Result<T> = core::result::Result<T, GameError>;
